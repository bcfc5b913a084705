use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::members::dto::LoanDto;

pub(crate) struct ReturnBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl ReturnBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReturnBookCommandRequest {
    pub member_id: String,
    pub book_id: String,
}

impl ReturnBookCommandRequest {
    pub fn new(member_id: &str, book_id: &str) -> Self {
        Self {
            member_id: member_id.to_string(),
            book_id: book_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReturnBookCommandResponse {
    pub loan: LoanDto,
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        let loan = self.catalog_service.return_book(req.member_id.as_str(), req.book_id.as_str()).await?;
        Ok(ReturnBookCommandResponse { loan })
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_return_book() {
        let svc = factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::Memory).await.expect("should create service");
        let book = svc.add_book("Dune", "Herbert", 1).await.expect("should add book");
        let alice = svc.add_member("Alice", "a@x.com").await.expect("should add member");
        svc.borrow(&alice.member_id, &book.book_id).await.expect("should borrow");
        let cmd = ReturnBookCommand::new(svc.clone());

        let res = cmd.execute(ReturnBookCommandRequest::new(&alice.member_id, &book.book_id)).await.expect("should return");
        assert_eq!(alice.member_id, res.loan.member_id);
        let book = svc.find_book_by_id(&book.book_id).await.expect("should return book");
        assert_eq!(1, book.available_copies);

        let res = cmd.execute(ReturnBookCommandRequest::new(&alice.member_id, &book.book_id)).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
