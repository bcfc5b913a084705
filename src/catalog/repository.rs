pub mod json_catalog_repository;
pub mod memory_catalog_repository;

use crate::catalog::domain::model::CatalogSnapshot;
use crate::core::repository::Repository;

pub(crate) trait CatalogRepository: Repository<CatalogSnapshot> {
    // where the catalog is kept, for log lines
    fn location(&self) -> String;
}
