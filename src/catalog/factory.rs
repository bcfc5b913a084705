use std::sync::Arc;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::catalog::repository::CatalogRepository;
use crate::catalog::repository::json_catalog_repository::JsonCatalogRepository;
use crate::catalog::repository::memory_catalog_repository::MemoryCatalogRepository;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;

pub(crate) fn create_catalog_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn CatalogRepository> {
    match store {
        RepositoryStore::JsonFile => Box::new(JsonCatalogRepository::new(config.data_file.as_str())),
        RepositoryStore::Memory => Box::new(MemoryCatalogRepository::new()),
    }
}

pub(crate) async fn create_catalog_service(config: &Configuration, store: RepositoryStore) -> LibraryResult<Arc<dyn CatalogService>> {
    let catalog_repo = create_catalog_repository(config, store);
    let publisher = create_publisher();
    let svc = CatalogServiceImpl::load(config, catalog_repo, publisher).await?;
    Ok(Arc::new(svc))
}
