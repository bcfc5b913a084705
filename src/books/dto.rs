use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub total_copies: u32,
    pub available_copies: u32,
    pub on_loan: u32,
    #[serde(with = "serializer")]
    pub added_on: NaiveDateTime,
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.book_id.to_string()
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            total_copies: other.total_copies,
            available_copies: other.available_copies,
            on_loan: other.on_loan(),
            added_on: other.added_on,
        }
    }
}
