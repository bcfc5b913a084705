use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, REASON_NO_COPIES};
use crate::utils::date::serializer;

// BookEntity abstracts a title in the catalog together with its physical copies.
// Invariant: available_copies <= total_copies and total_copies >= 1.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BookEntity {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub total_copies: u32,
    pub available_copies: u32,
    #[serde(with = "serializer")]
    pub added_on: NaiveDateTime,
}

impl BookEntity {
    pub fn new(book_id: &str, title: &str, author: &str, copies: u32, added_on: NaiveDateTime) -> Self {
        Self {
            book_id: book_id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            total_copies: copies,
            available_copies: copies,
            added_on,
        }
    }

    pub fn on_loan(&self) -> u32 {
        self.total_copies.saturating_sub(self.available_copies)
    }

    pub(crate) fn take_copy(&mut self) -> LibraryResult<()> {
        match self.available_copies.checked_sub(1) {
            Some(left) => {
                self.available_copies = left;
                Ok(())
            }
            None => {
                Err(LibraryError::unavailable(format!("no copies of book {} available",
                                                      self.book_id).as_str(), Some(REASON_NO_COPIES.to_string())))
            }
        }
    }

    pub(crate) fn put_back_copy(&mut self) -> LibraryResult<()> {
        if self.available_copies >= self.total_copies {
            return Err(LibraryError::runtime(format!("all {} copies of book {} are already on the shelf",
                                                     self.total_copies, self.book_id).as_str(), None));
        }
        self.available_copies += 1;
        Ok(())
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.book_id.to_string()
    }
}

impl Book for BookEntity {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn is_available(&self) -> bool {
        self.available_copies > 0
    }
}
