use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct ListBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl ListBooksCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// available restricts the listing to books with at least one copy on the shelf
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListBooksCommandRequest {
    #[serde(default)]
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListBooksCommandResponse {
    pub books: Vec<BookDto>,
}

#[async_trait]
impl Command<ListBooksCommandRequest, ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, req: ListBooksCommandRequest) -> Result<ListBooksCommandResponse, CommandError> {
        let books = if req.available {
            self.catalog_service.list_available_books().await?
        } else {
            self.catalog_service.list_books().await?
        };
        Ok(ListBooksCommandResponse { books })
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_list_books() {
        let svc = factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::Memory).await.expect("should create service");
        let dune = svc.add_book("Dune", "Herbert", 1).await.expect("should add book");
        svc.add_book("Emma", "Austen", 1).await.expect("should add book");
        let alice = svc.add_member("Alice", "a@x.com").await.expect("should add member");
        svc.borrow(&alice.member_id, &dune.book_id).await.expect("should borrow");
        let cmd = ListBooksCommand::new(svc);

        let res = cmd.execute(ListBooksCommandRequest::default()).await.expect("should list books");
        assert_eq!(2, res.books.len());
        let res = cmd.execute(ListBooksCommandRequest { available: true }).await.expect("should list books");
        assert_eq!(1, res.books.len());
        assert_eq!("Emma", res.books[0].title.as_str());
    }
}
