use crate::core::domain::Identifiable;

pub mod model;

pub(crate) trait Member: Identifiable {
    fn loan_count(&self) -> usize;
    fn holds_book(&self, book_id: &str) -> bool;
}
