use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::members::dto::LoanDto;

pub(crate) struct BorrowBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl BorrowBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BorrowBookCommandRequest {
    pub member_id: String,
    pub book_id: String,
}

impl BorrowBookCommandRequest {
    pub fn new(member_id: &str, book_id: &str) -> Self {
        Self {
            member_id: member_id.to_string(),
            book_id: book_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BorrowBookCommandResponse {
    pub loan: LoanDto,
}

impl BorrowBookCommandResponse {
    pub fn new(loan: LoanDto) -> Self {
        Self {
            loan,
        }
    }
}

#[async_trait]
impl Command<BorrowBookCommandRequest, BorrowBookCommandResponse> for BorrowBookCommand {
    async fn execute(&self, req: BorrowBookCommandRequest) -> Result<BorrowBookCommandResponse, CommandError> {
        self.catalog_service.borrow(req.member_id.as_str(), req.book_id.as_str()).await
            .map_err(CommandError::from).map(BorrowBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_borrow_book() {
        let svc = factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::Memory).await.expect("should create service");
        let book = svc.add_book("Dune", "Herbert", 1).await.expect("should add book");
        let alice = svc.add_member("Alice", "a@x.com").await.expect("should add member");
        let bob = svc.add_member("Bob", "b@x.com").await.expect("should add member");
        let cmd = BorrowBookCommand::new(svc);

        let res = cmd.execute(BorrowBookCommandRequest::new(&alice.member_id, &book.book_id)).await.expect("should borrow");
        assert_eq!(book.book_id, res.loan.book_id);
        assert!(res.loan.due_on > res.loan.borrowed_on);

        let res = cmd.execute(BorrowBookCommandRequest::new(&bob.member_id, &book.book_id)).await;
        assert!(matches!(res, Err(CommandError::Unavailable { .. })));
        let res = cmd.execute(BorrowBookCommandRequest::new("M0404", &book.book_id)).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
