use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::CatalogSummaryDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetSummaryCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl GetSummaryCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct GetSummaryCommandRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct GetSummaryCommandResponse {
    pub summary: CatalogSummaryDto,
}

#[async_trait]
impl Command<GetSummaryCommandRequest, GetSummaryCommandResponse> for GetSummaryCommand {
    async fn execute(&self, _req: GetSummaryCommandRequest) -> Result<GetSummaryCommandResponse, CommandError> {
        let summary = self.catalog_service.summary().await?;
        Ok(GetSummaryCommandResponse { summary })
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::get_summary_cmd::{GetSummaryCommand, GetSummaryCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_get_summary() {
        let svc = factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::Memory).await.expect("should create service");
        let cmd = GetSummaryCommand::new(svc.clone());
        let res = cmd.execute(GetSummaryCommandRequest {}).await.expect("should summarize");
        assert_eq!(0, res.summary.total_copies);
        assert!(res.summary.recent_books.is_empty());

        let book = svc.add_book("Dune", "Herbert", 3).await.expect("should add book");
        let alice = svc.add_member("Alice", "a@x.com").await.expect("should add member");
        svc.borrow(&alice.member_id, &book.book_id).await.expect("should borrow");

        let res = cmd.execute(GetSummaryCommandRequest {}).await.expect("should summarize");
        assert_eq!(3, res.summary.total_copies);
        assert_eq!(2, res.summary.available_copies);
        assert_eq!(1, res.summary.total_members);
        assert_eq!(1, res.summary.active_loans);
        assert_eq!(1, res.summary.recent_books.len());
        assert_eq!(book.book_id, res.summary.recent_books[0].book_id);
        assert_eq!(1, res.summary.recent_books[0].on_loan);
    }
}
