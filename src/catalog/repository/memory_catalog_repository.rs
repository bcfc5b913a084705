use async_trait::async_trait;
use tokio::sync::Mutex;
use crate::catalog::domain::model::CatalogSnapshot;
use crate::catalog::repository::CatalogRepository;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

#[derive(Debug, Default)]
pub struct MemoryCatalogRepository {
    saved: Mutex<Option<CatalogSnapshot>>,
}

impl MemoryCatalogRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            saved: Mutex::new(Some(snapshot)),
        }
    }
}

#[async_trait]
impl Repository<CatalogSnapshot> for MemoryCatalogRepository {
    async fn load(&self) -> LibraryResult<Option<CatalogSnapshot>> {
        Ok(self.saved.lock().await.clone())
    }

    async fn save(&self, snapshot: &CatalogSnapshot) -> LibraryResult<()> {
        *self.saved.lock().await = Some(snapshot.clone());
        Ok(())
    }
}

impl CatalogRepository for MemoryCatalogRepository {
    fn location(&self) -> String {
        "memory".to_string()
    }
}
