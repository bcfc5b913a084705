use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::{Identifiable, MAX_LOAN_DAYS};
use crate::core::library::{LibraryError, LibraryResult, REASON_INVALID_CONFIG};
use crate::members::domain::Member;
use crate::utils::date::serializer;

// LoanEntity records one copy of one book held by a member, pending return.
// It only lives inside the member that holds it.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct LoanEntity {
    pub book_id: String,
    pub title: String,
    #[serde(with = "serializer")]
    pub borrowed_on: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_on: NaiveDateTime,
}

impl LoanEntity {
    pub fn for_book(book: &dyn Book, borrowed_on: NaiveDateTime, loan_days: i64) -> LibraryResult<Self> {
        let due_on = Some(loan_days)
            .filter(|days| (1..=MAX_LOAN_DAYS).contains(days))
            .and_then(|days| borrowed_on.checked_add_signed(Duration::days(days)))
            .ok_or_else(|| LibraryError::validation(
                format!("loan of {} days from {} has no valid due date", loan_days, borrowed_on).as_str(),
                Some(REASON_INVALID_CONFIG.to_string())))?;
        Ok(Self {
            book_id: book.id(),
            title: book.title().to_string(),
            borrowed_on,
            due_on,
        })
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.due_on < now
    }
}

// MemberEntity abstracts library member and the loans it currently holds,
// oldest loan first.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MemberEntity {
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub loans: Vec<LoanEntity>,
    #[serde(with = "serializer")]
    pub joined_on: NaiveDateTime,
}

impl MemberEntity {
    pub fn new(member_id: &str, name: &str, email: &str, joined_on: NaiveDateTime) -> Self {
        Self {
            member_id: member_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            loans: vec![],
            joined_on,
        }
    }

    // removes the earliest loan of book_id
    pub(crate) fn release_loan(&mut self, book_id: &str) -> Option<LoanEntity> {
        let pos = self.loans.iter().position(|l| l.book_id == book_id)?;
        Some(self.loans.remove(pos))
    }
}

impl Identifiable for MemberEntity {
    fn id(&self) -> String {
        self.member_id.to_string()
    }
}

impl Member for MemberEntity {
    fn loan_count(&self) -> usize {
        self.loans.len()
    }

    fn holds_book(&self, book_id: &str) -> bool {
        self.loans.iter().any(|l| l.book_id == book_id)
    }
}
