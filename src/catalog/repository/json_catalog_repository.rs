use std::io::ErrorKind;
use std::path::PathBuf;
use async_trait::async_trait;
use tracing::{debug, info, warn};
use crate::catalog::domain::model::CatalogSnapshot;
use crate::catalog::repository::CatalogRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// JsonCatalogRepository keeps the whole catalog as one JSON document on disk.
// Saves go to a sibling .tmp file first and are renamed over the target.
#[derive(Debug)]
pub struct JsonCatalogRepository {
    path: PathBuf,
}

impl JsonCatalogRepository {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(path),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[async_trait]
impl Repository<CatalogSnapshot> for JsonCatalogRepository {
    async fn load(&self) -> LibraryResult<Option<CatalogSnapshot>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let snapshot: CatalogSnapshot = serde_json::from_slice(&bytes)?;
                debug!(path = %self.path.display(), books = snapshot.books.len(),
                    members = snapshot.members.len(), "loaded catalog file");
                Ok(Some(snapshot))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no catalog file yet, starting empty");
                Ok(None)
            }
            Err(err) => {
                Err(LibraryError::from(err))
            }
        }
    }

    async fn save(&self, snapshot: &CatalogSnapshot) -> LibraryResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json).await?;
        if let Err(err) = tokio::fs::rename(&tmp, &self.path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                warn!(path = %tmp.display(), error = %cleanup, "failed to remove temporary catalog file");
            }
            return Err(LibraryError::from(err));
        }
        debug!(path = %self.path.display(), "saved catalog file");
        Ok(())
    }
}

impl CatalogRepository for JsonCatalogRepository {
    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
