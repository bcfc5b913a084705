use std::str::FromStr;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult, REASON_INVALID_CONFIG};

#[async_trait]
pub trait Repository<Snapshot>: Sync + Send {
    // loads the stored state, None when nothing has been saved yet
    async fn load(&self) -> LibraryResult<Option<Snapshot>>;

    // replaces the stored state
    async fn save(&self, snapshot: &Snapshot) -> LibraryResult<()>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    JsonFile,
    Memory,
}

impl FromStr for RepositoryStore {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "jsonfile" | "file" => Ok(RepositoryStore::JsonFile),
            "memory" | "mem" => Ok(RepositoryStore::Memory),
            other => Err(LibraryError::validation(
                format!("unknown repository store {:?}", other).as_str(), Some(REASON_INVALID_CONFIG.to_string()))),
        }
    }
}
