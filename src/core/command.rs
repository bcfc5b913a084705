use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    NotFound {
        message: String,
    },
    Unavailable {
        message: String,
        reason_code: Option<String>,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::Unavailable { message, reason_code } => {
                CommandError::Unavailable { message, reason_code }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code }
            }
        }
    }
}
