use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl GetBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetBookCommandRequest {
    pub book_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetBookCommandResponse {
    pub book: BookDto,
}

impl GetBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<GetBookCommandRequest, GetBookCommandResponse> for GetBookCommand {
    async fn execute(&self, req: GetBookCommandRequest) -> Result<GetBookCommandResponse, CommandError> {
        self.catalog_service.find_book_by_id(req.book_id.as_str()).await
            .map_err(CommandError::from).map(GetBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_get_book() {
        let svc = factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::Memory).await.expect("should create service");
        let book = svc.add_book("Dune", "Herbert", 1).await.expect("should add book");
        let cmd = GetBookCommand::new(svc);

        let res = cmd.execute(GetBookCommandRequest { book_id: book.book_id.to_string() }).await.expect("should return book");
        assert_eq!(book, res.book);

        let res = cmd.execute(GetBookCommandRequest { book_id: "B0404".to_string() }).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
