use std::sync::Arc;
use axum::http::StatusCode;
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) service: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(service: Arc<dyn CatalogService>) -> AppState {
        AppState {
            service,
        }
    }
}

pub(crate) type ServerError = (StatusCode, String);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, format!("{}", err))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, format!("{:?}", err))
            }
            CommandError::Unavailable { .. } => {
                (StatusCode::CONFLICT, format!("{:?}", err))
            }
            CommandError::Runtime { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", err))
            }
            CommandError::Serialization { .. } => {
                (StatusCode::BAD_REQUEST, format!("{:?}", err))
            }
            CommandError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, format!("{:?}", err))
            }
        }
    }
}
