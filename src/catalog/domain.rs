pub mod model;
pub mod service;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::books::dto::BookDto;
use crate::catalog::dto::CatalogSummaryDto;
use crate::core::library::LibraryResult;
use crate::members::dto::{LoanDto, MemberDto};

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn add_book(&self, title: &str, author: &str, copies: i64) -> LibraryResult<BookDto>;
    async fn add_member(&self, name: &str, email: &str) -> LibraryResult<MemberDto>;
    async fn borrow(&self, member_id: &str, book_id: &str) -> LibraryResult<LoanDto>;
    async fn return_book(&self, member_id: &str, book_id: &str) -> LibraryResult<LoanDto>;
    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto>;
    async fn find_member_by_id(&self, id: &str) -> LibraryResult<MemberDto>;
    async fn list_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn list_available_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn list_members(&self) -> LibraryResult<Vec<MemberDto>>;
    async fn summary(&self) -> LibraryResult<CatalogSummaryDto>;
    async fn query_overdue(&self, as_of: NaiveDateTime) -> LibraryResult<Vec<LoanDto>>;
    async fn flush(&self) -> LibraryResult<()>;
}
