use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::model::Catalog;

// CatalogSummaryDto is the dashboard view of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CatalogSummaryDto {
    pub total_copies: u64,
    pub available_copies: u64,
    pub total_members: usize,
    pub active_loans: usize,
    pub recent_books: Vec<BookDto>,
}

impl CatalogSummaryDto {
    pub fn from_catalog(catalog: &Catalog, recent: usize) -> Self {
        Self {
            total_copies: catalog.total_copies(),
            available_copies: catalog.available_copies(),
            total_members: catalog.members().len(),
            active_loans: catalog.active_loans(),
            recent_books: catalog.recent_books(recent).into_iter().map(BookDto::from).collect(),
        }
    }
}
