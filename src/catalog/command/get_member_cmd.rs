use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::members::dto::MemberDto;

pub(crate) struct GetMemberCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl GetMemberCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetMemberCommandRequest {
    pub member_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetMemberCommandResponse {
    pub member: MemberDto,
}

#[async_trait]
impl Command<GetMemberCommandRequest, GetMemberCommandResponse> for GetMemberCommand {
    async fn execute(&self, req: GetMemberCommandRequest) -> Result<GetMemberCommandResponse, CommandError> {
        let member = self.catalog_service.find_member_by_id(req.member_id.as_str()).await?;
        Ok(GetMemberCommandResponse { member })
    }
}
