use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    pub title: String,
    pub author: String,
    pub copies: i64,
}

impl AddBookCommandRequest {
    pub fn new(title: &str, author: &str, copies: i64) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            copies,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        self.catalog_service.add_book(req.title.as_str(), req.author.as_str(), req.copies).await
            .map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}
