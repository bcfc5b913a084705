use std::collections::{HashMap, HashSet};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult, REASON_EMPTY_AUTHOR, REASON_EMPTY_EMAIL,
                           REASON_EMPTY_NAME, REASON_EMPTY_TITLE, REASON_INVALID_COPIES,
                           REASON_IDS_EXHAUSTED, REASON_INVALID_SNAPSHOT, REASON_LOAN_LIMIT};
use crate::members::domain::Member;
use crate::members::domain::model::{LoanEntity, MemberEntity};

const BOOK_PREFIX: char = 'B';
const MEMBER_PREFIX: char = 'M';

// CatalogSnapshot is the persisted form of a catalog, identifier counters included.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct CatalogSnapshot {
    pub next_book_seq: u64,
    pub next_member_seq: u64,
    pub books: Vec<BookEntity>,
    pub members: Vec<MemberEntity>,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) struct LoanPolicy {
    pub max_loans: usize,
    pub loan_days: i64,
}

impl From<&Configuration> for LoanPolicy {
    fn from(config: &Configuration) -> Self {
        Self {
            max_loans: config.max_loans,
            loan_days: config.loan_days,
        }
    }
}

/// Catalog owns every book and member record and the loans members hold.
///
/// Each operation either applies its whole effect or returns an error without
/// touching any record. Identifiers come from per-catalog counters and are
/// never reused.
#[derive(Debug, Clone)]
pub(crate) struct Catalog {
    policy: LoanPolicy,
    books: Vec<BookEntity>,
    members: Vec<MemberEntity>,
    next_book_seq: u64,
    next_member_seq: u64,
}

impl Catalog {
    pub fn new(policy: LoanPolicy) -> Self {
        Self {
            policy,
            books: vec![],
            members: vec![],
            next_book_seq: 1,
            next_member_seq: 1,
        }
    }

    /// Rebuilds a catalog from a stored snapshot, rejecting snapshots whose copy
    /// counts disagree with the loans members hold.
    pub fn from_snapshot(snapshot: CatalogSnapshot, policy: LoanPolicy) -> LibraryResult<Self> {
        let mut book_ids = HashSet::new();
        let mut max_book_seq: u64 = 0;
        for book in &snapshot.books {
            if !book_ids.insert(book.book_id.as_str()) {
                return Err(invalid_snapshot(format!("duplicate book id {}", book.book_id)));
            }
            if book.total_copies < 1 || book.available_copies > book.total_copies {
                return Err(invalid_snapshot(format!("book {} has {} of {} copies available",
                                                    book.book_id, book.available_copies, book.total_copies)));
            }
            max_book_seq = max_book_seq.max(id_seq(BOOK_PREFIX, &book.book_id).unwrap_or(0));
        }

        let mut member_ids = HashSet::new();
        let mut max_member_seq: u64 = 0;
        let mut loans_per_book: HashMap<&str, u32> = HashMap::new();
        for member in &snapshot.members {
            if !member_ids.insert(member.member_id.as_str()) {
                return Err(invalid_snapshot(format!("duplicate member id {}", member.member_id)));
            }
            max_member_seq = max_member_seq.max(id_seq(MEMBER_PREFIX, &member.member_id).unwrap_or(0));
            for loan in &member.loans {
                if !book_ids.contains(loan.book_id.as_str()) {
                    return Err(invalid_snapshot(format!("member {} holds unknown book {}",
                                                        member.member_id, loan.book_id)));
                }
                *loans_per_book.entry(loan.book_id.as_str()).or_insert(0) += 1;
            }
        }
        for book in &snapshot.books {
            let held = loans_per_book.get(book.book_id.as_str()).copied().unwrap_or(0);
            if held != book.on_loan() {
                return Err(invalid_snapshot(format!("book {} has {} copies out but {} loans recorded",
                                                    book.book_id, book.on_loan(), held)));
            }
        }

        let next_book_seq = restored_seq("book", snapshot.next_book_seq, max_book_seq)?;
        let next_member_seq = restored_seq("member", snapshot.next_member_seq, max_member_seq)?;
        Ok(Self {
            policy,
            next_book_seq,
            next_member_seq,
            books: snapshot.books,
            members: snapshot.members,
        })
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            next_book_seq: self.next_book_seq,
            next_member_seq: self.next_member_seq,
            books: self.books.clone(),
            members: self.members.clone(),
        }
    }

    pub fn add_book(&mut self, title: &str, author: &str, copies: i64) -> LibraryResult<BookEntity> {
        let title = required(title, "title", REASON_EMPTY_TITLE)?;
        let author = required(author, "author", REASON_EMPTY_AUTHOR)?;
        let copies = u32::try_from(copies).ok().filter(|c| *c >= 1).ok_or_else(|| {
            LibraryError::validation(format!("copies must be at least 1 but was {}", copies).as_str(),
                                     Some(REASON_INVALID_COPIES.to_string()))
        })?;
        let following = next_seq("book", self.next_book_seq)?;
        let book_id = format_id(BOOK_PREFIX, self.next_book_seq);
        let book = BookEntity::new(book_id.as_str(), title, author, copies, Utc::now().naive_utc());
        self.next_book_seq = following;
        self.books.push(book.clone());
        Ok(book)
    }

    pub fn add_member(&mut self, name: &str, email: &str) -> LibraryResult<MemberEntity> {
        let name = required(name, "name", REASON_EMPTY_NAME)?;
        let email = required(email, "email", REASON_EMPTY_EMAIL)?;
        let following = next_seq("member", self.next_member_seq)?;
        let member_id = format_id(MEMBER_PREFIX, self.next_member_seq);
        let member = MemberEntity::new(member_id.as_str(), name, email, Utc::now().naive_utc());
        self.next_member_seq = following;
        self.members.push(member.clone());
        Ok(member)
    }

    pub fn borrow(&mut self, member_id: &str, book_id: &str) -> LibraryResult<LoanEntity> {
        let member = self.members.iter_mut().find(|m| m.member_id == member_id)
            .ok_or_else(|| member_not_found(member_id))?;
        let book = self.books.iter_mut().find(|b| b.book_id == book_id)
            .ok_or_else(|| book_not_found(book_id))?;
        if member.loan_count() >= self.policy.max_loans {
            return Err(LibraryError::unavailable(format!("member {} already holds {} loans",
                                                         member_id, member.loan_count()).as_str(),
                                                 Some(REASON_LOAN_LIMIT.to_string())));
        }
        let loan = LoanEntity::for_book(&*book, Utc::now().naive_utc(), self.policy.loan_days)?;
        // take_copy is the last step that can fail and it runs before the loan is recorded
        book.take_copy()?;
        member.loans.push(loan.clone());
        Ok(loan)
    }

    pub fn return_book(&mut self, member_id: &str, book_id: &str) -> LibraryResult<LoanEntity> {
        let member = self.members.iter_mut().find(|m| m.member_id == member_id)
            .ok_or_else(|| member_not_found(member_id))?;
        if !member.holds_book(book_id) {
            return Err(LibraryError::not_found(format!("member {} holds no loan for book {}",
                                                       member_id, book_id).as_str()));
        }
        let book = self.books.iter_mut().find(|b| b.book_id == book_id)
            .ok_or_else(|| book_not_found(book_id))?;
        book.put_back_copy()?;
        member.release_loan(book_id).ok_or_else(|| {
            LibraryError::runtime(format!("loan of book {} vanished for member {}",
                                          book_id, member_id).as_str(), None)
        })
    }

    pub fn books(&self) -> &[BookEntity] {
        &self.books
    }

    pub fn members(&self) -> &[MemberEntity] {
        &self.members
    }

    pub fn find_book(&self, book_id: &str) -> Option<&BookEntity> {
        self.books.iter().find(|b| b.book_id == book_id)
    }

    pub fn find_member(&self, member_id: &str) -> Option<&MemberEntity> {
        self.members.iter().find(|m| m.member_id == member_id)
    }

    pub fn available_books(&self) -> Vec<&BookEntity> {
        self.books.iter().filter(|b| b.is_available()).collect()
    }

    pub fn total_copies(&self) -> u64 {
        self.books.iter().map(|b| u64::from(b.total_copies)).sum()
    }

    pub fn available_copies(&self) -> u64 {
        self.books.iter().map(|b| u64::from(b.available_copies)).sum()
    }

    pub fn active_loans(&self) -> usize {
        self.members.iter().map(|m| m.loan_count()).sum()
    }

    // newest first; books added at the same instant keep reverse insertion order
    pub fn recent_books(&self, limit: usize) -> Vec<&BookEntity> {
        let mut books: Vec<&BookEntity> = self.books.iter().rev().collect();
        books.sort_by(|a, b| b.added_on.cmp(&a.added_on));
        books.truncate(limit);
        books
    }

    pub fn overdue_loans(&self, now: NaiveDateTime) -> Vec<(&MemberEntity, &LoanEntity)> {
        self.members.iter()
            .flat_map(|m| m.loans.iter().map(move |l| (m, l)))
            .filter(|(_, l)| l.is_overdue(now))
            .collect()
    }
}

fn required<'a>(value: &'a str, field: &str, reason_code: &str) -> LibraryResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LibraryError::validation(format!("{} must not be empty", field).as_str(),
                                            Some(reason_code.to_string())));
    }
    Ok(trimmed)
}

fn format_id(prefix: char, seq: u64) -> String {
    format!("{}{:04}", prefix, seq)
}

fn id_seq(prefix: char, id: &str) -> Option<u64> {
    id.strip_prefix(prefix)?.parse::<u64>().ok()
}

// the counter after seq, failing once the identifier space is used up
fn next_seq(kind: &str, seq: u64) -> LibraryResult<u64> {
    seq.checked_add(1).ok_or_else(|| {
        LibraryError::unavailable(format!("no {} identifiers left", kind).as_str(),
                                  Some(REASON_IDS_EXHAUSTED.to_string()))
    })
}

fn restored_seq(kind: &str, stored: u64, max_seen: u64) -> LibraryResult<u64> {
    let seq = max_seen.checked_add(1).map(|above| stored.max(above))
        .filter(|seq| *seq < u64::MAX)
        .ok_or_else(|| invalid_snapshot(format!("{} counter {} or id {} is out of range",
                                                kind, stored, max_seen)))?;
    Ok(seq)
}

fn member_not_found(member_id: &str) -> LibraryError {
    LibraryError::not_found(format!("member {} not found", member_id).as_str())
}

fn book_not_found(book_id: &str) -> LibraryError {
    LibraryError::not_found(format!("book {} not found", book_id).as_str())
}

fn invalid_snapshot(message: String) -> LibraryError {
    LibraryError::validation(message.as_str(), Some(REASON_INVALID_SNAPSHOT.to_string()))
}
