use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::members::dto::MemberDto;

pub(crate) struct AddMemberCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddMemberCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddMemberCommandRequest {
    pub name: String,
    pub email: String,
}

impl AddMemberCommandRequest {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddMemberCommandResponse {
    pub member: MemberDto,
}

impl AddMemberCommandResponse {
    pub fn new(member: MemberDto) -> Self {
        Self {
            member,
        }
    }
}

#[async_trait]
impl Command<AddMemberCommandRequest, AddMemberCommandResponse> for AddMemberCommand {
    async fn execute(&self, req: AddMemberCommandRequest) -> Result<AddMemberCommandResponse, CommandError> {
        self.catalog_service.add_member(req.name.as_str(), req.email.as_str()).await
            .map_err(CommandError::from).map(AddMemberCommandResponse::new)
    }
}
