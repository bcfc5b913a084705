use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::members::dto::LoanDto;

pub(crate) struct QueryOverdueCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl QueryOverdueCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct QueryOverdueCommandRequest {
    pub as_of: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryOverdueCommandResponse {
    pub loans: Vec<LoanDto>,
}

#[async_trait]
impl Command<QueryOverdueCommandRequest, QueryOverdueCommandResponse> for QueryOverdueCommand {
    async fn execute(&self, req: QueryOverdueCommandRequest) -> Result<QueryOverdueCommandResponse, CommandError> {
        let loans = self.catalog_service.query_overdue(req.as_of).await?;
        Ok(QueryOverdueCommandResponse { loans })
    }
}
