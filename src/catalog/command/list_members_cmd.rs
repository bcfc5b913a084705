use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::members::dto::MemberDto;

pub(crate) struct ListMembersCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl ListMembersCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ListMembersCommandRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct ListMembersCommandResponse {
    pub members: Vec<MemberDto>,
}

#[async_trait]
impl Command<ListMembersCommandRequest, ListMembersCommandResponse> for ListMembersCommand {
    async fn execute(&self, _req: ListMembersCommandRequest) -> Result<ListMembersCommandResponse, CommandError> {
        let members = self.catalog_service.list_members().await?;
        Ok(ListMembersCommandResponse { members })
    }
}
