use std::fmt;
use std::fmt::{Display, Formatter};

pub(crate) const REASON_EMPTY_TITLE: &str = "empty_title";
pub(crate) const REASON_EMPTY_AUTHOR: &str = "empty_author";
pub(crate) const REASON_INVALID_COPIES: &str = "invalid_copies";
pub(crate) const REASON_EMPTY_NAME: &str = "empty_name";
pub(crate) const REASON_EMPTY_EMAIL: &str = "empty_email";
pub(crate) const REASON_INVALID_SNAPSHOT: &str = "invalid_snapshot";
pub(crate) const REASON_INVALID_CONFIG: &str = "invalid_config";
pub(crate) const REASON_NO_COPIES: &str = "no_copies_available";
pub(crate) const REASON_LOAN_LIMIT: &str = "loan_limit_reached";
pub(crate) const REASON_IDS_EXHAUSTED: &str = "ids_exhausted";

#[derive(Debug)]
pub enum LibraryError {
    NotFound {
        message: String,
    },
    // Raised when a borrow cannot be granted right now: no copy on the shelf or the
    // member already holds the maximum number of loans. Returning a copy clears it.
    Unavailable {
        message: String,
        reason_code: Option<String>,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Unavailable { message: message.to_string(), reason_code }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn reason_code(&self) -> Option<&str> {
        match self {
            LibraryError::Unavailable { reason_code, .. } => { reason_code.as_deref() }
            LibraryError::Validation { reason_code, .. } => { reason_code.as_deref() }
            LibraryError::Runtime { reason_code, .. } => { reason_code.as_deref() }
            LibraryError::NotFound { .. } => { None }
            LibraryError::Serialization { .. } => { None }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("io {:?}", err).as_str(), Some(format!("{:?}", err.kind())))
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Unavailable { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for catalog operations.
pub type LibraryResult<T> = Result<T, LibraryError>;
