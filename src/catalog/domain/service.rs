use std::collections::HashMap;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::model::{Catalog, LoanPolicy};
use crate::catalog::dto::CatalogSummaryDto;
use crate::catalog::repository::CatalogRepository;
use crate::core::domain::{Configuration, Identifiable};
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::gateway::events::EventPublisher;
use crate::members::dto::{LoanDto, MemberDto};

/// CatalogServiceImpl owns the live catalog and serializes every operation on it.
///
/// A mutation runs against a copy of the catalog, the copy is saved, and only a
/// successful save makes it the live catalog.
pub(crate) struct CatalogServiceImpl {
    branch_id: String,
    recent_books: usize,
    catalog: Mutex<Catalog>,
    catalog_repository: Box<dyn CatalogRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub(crate) async fn load(config: &Configuration, catalog_repository: Box<dyn CatalogRepository>,
                             events_publisher: Box<dyn EventPublisher>) -> LibraryResult<Self> {
        let policy = LoanPolicy::from(config);
        let catalog = match catalog_repository.load().await? {
            Some(snapshot) => Catalog::from_snapshot(snapshot, policy)?,
            None => Catalog::new(policy),
        };
        info!(branch_id = %config.branch_id, location = %catalog_repository.location(),
            books = catalog.books().len(), members = catalog.members().len(), "catalog loaded");
        Ok(Self {
            branch_id: config.branch_id.to_string(),
            recent_books: config.recent_books,
            catalog: Mutex::new(catalog),
            catalog_repository,
            events_publisher,
        })
    }

    async fn mutate<T, F>(&self, apply: F) -> LibraryResult<T>
        where F: FnOnce(&mut Catalog) -> LibraryResult<T> + Send, T: Send {
        let mut catalog = self.catalog.lock().await;
        let mut next = catalog.clone();
        let out = apply(&mut next).map_err(|err| {
            debug!(error = %err, "catalog operation rejected");
            err
        })?;
        if let Err(err) = self.catalog_repository.save(&next.snapshot()).await {
            warn!(error = %err, location = %self.catalog_repository.location(),
                "failed to save catalog, change discarded");
            return Err(err);
        }
        *catalog = next;
        Ok(out)
    }

    // events go out after the change is committed, so a failed publish is only logged
    async fn publish(&self, event: serde_json::Result<DomainEvent>) {
        let res = match event {
            Ok(event) => self.events_publisher.publish(&event).await,
            Err(err) => Err(LibraryError::from(err)),
        };
        if let Err(err) = res {
            warn!(error = %err, "failed to publish catalog event");
        }
    }

    fn metadata(&self, pairs: &[(&str, &str)]) -> HashMap<String, String> {
        let mut metadata = HashMap::from([("branch_id".to_string(), self.branch_id.to_string())]);
        for (k, v) in pairs {
            metadata.insert(k.to_string(), v.to_string());
        }
        metadata
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, title: &str, author: &str, copies: i64) -> LibraryResult<BookDto> {
        let book = self.mutate(|catalog| catalog.add_book(title, author, copies)).await?;
        let book = BookDto::from(&book);
        info!(book_id = %book.book_id, title = %book.title, copies = book.total_copies, "book added");
        self.publish(DomainEvent::added(
            "book_added", "books", book.id().as_str(), &self.metadata(&[]), &book)).await;
        Ok(book)
    }

    async fn add_member(&self, name: &str, email: &str) -> LibraryResult<MemberDto> {
        let member = self.mutate(|catalog| catalog.add_member(name, email)).await?;
        let member = MemberDto::from(&member);
        info!(member_id = %member.member_id, "member added");
        self.publish(DomainEvent::added(
            "member_added", "members", member.id().as_str(), &self.metadata(&[]), &member)).await;
        Ok(member)
    }

    async fn borrow(&self, member_id: &str, book_id: &str) -> LibraryResult<LoanDto> {
        let loan = self.mutate(|catalog| catalog.borrow(member_id, book_id)).await?;
        let loan = LoanDto::from_member_loan(member_id, &loan);
        info!(member_id, book_id, due_on = %loan.due_on, "book borrowed");
        self.publish(DomainEvent::added(
            "book_borrowed", "loans", member_id, &self.metadata(&[("book_id", book_id)]), &loan)).await;
        Ok(loan)
    }

    async fn return_book(&self, member_id: &str, book_id: &str) -> LibraryResult<LoanDto> {
        let loan = self.mutate(|catalog| catalog.return_book(member_id, book_id)).await?;
        let loan = LoanDto::from_member_loan(member_id, &loan);
        info!(member_id, book_id, "book returned");
        self.publish(DomainEvent::deleted(
            "book_returned", "loans", member_id, &self.metadata(&[("book_id", book_id)]), &loan)).await;
        Ok(loan)
    }

    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto> {
        let catalog = self.catalog.lock().await;
        catalog.find_book(id).map(BookDto::from)
            .ok_or_else(|| LibraryError::not_found(format!("book {} not found", id).as_str()))
    }

    async fn find_member_by_id(&self, id: &str) -> LibraryResult<MemberDto> {
        let catalog = self.catalog.lock().await;
        catalog.find_member(id).map(MemberDto::from)
            .ok_or_else(|| LibraryError::not_found(format!("member {} not found", id).as_str()))
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.books().iter().map(BookDto::from).collect())
    }

    async fn list_available_books(&self) -> LibraryResult<Vec<BookDto>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.available_books().into_iter().map(BookDto::from).collect())
    }

    async fn list_members(&self) -> LibraryResult<Vec<MemberDto>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.members().iter().map(MemberDto::from).collect())
    }

    async fn summary(&self) -> LibraryResult<CatalogSummaryDto> {
        let catalog = self.catalog.lock().await;
        Ok(CatalogSummaryDto::from_catalog(&catalog, self.recent_books))
    }

    async fn query_overdue(&self, as_of: NaiveDateTime) -> LibraryResult<Vec<LoanDto>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.overdue_loans(as_of).into_iter()
            .map(|(member, loan)| LoanDto::from_member_loan(member.member_id.as_str(), loan))
            .collect())
    }

    async fn flush(&self) -> LibraryResult<()> {
        let catalog = self.catalog.lock().await;
        self.catalog_repository.save(&catalog.snapshot()).await?;
        info!(location = %self.catalog_repository.location(), "catalog flushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::domain::model::{Catalog, CatalogSnapshot, LoanPolicy};
    use crate::catalog::domain::service::CatalogServiceImpl;
    use crate::catalog::repository::CatalogRepository;
    use crate::catalog::repository::memory_catalog_repository::MemoryCatalogRepository;
    use crate::core::domain::Configuration;
    use crate::core::library::{LibraryError, LibraryResult, REASON_LOAN_LIMIT, REASON_NO_COPIES};
    use crate::core::repository::Repository;
    use crate::gateway::memory::publisher::MemoryPublisher;

    struct FailingRepository {}

    #[async_trait]
    impl Repository<CatalogSnapshot> for FailingRepository {
        async fn load(&self) -> LibraryResult<Option<CatalogSnapshot>> {
            Ok(None)
        }

        async fn save(&self, _snapshot: &CatalogSnapshot) -> LibraryResult<()> {
            Err(LibraryError::runtime("disk full", None))
        }
    }

    impl CatalogRepository for FailingRepository {
        fn location(&self) -> String {
            "failing".to_string()
        }
    }

    async fn new_service() -> (CatalogServiceImpl, MemoryPublisher) {
        let publisher = MemoryPublisher::new();
        let svc = CatalogServiceImpl::load(&Configuration::new("test"), Box::new(MemoryCatalogRepository::new()),
                                           Box::new(publisher.clone())).await.expect("should load service");
        (svc, publisher)
    }

    #[tokio::test]
    async fn test_should_add_book() {
        let (catalog_svc, _) = new_service().await;

        let book = catalog_svc.add_book("Dune", "Herbert", 2).await.expect("should add book");
        let loaded = catalog_svc.find_book_by_id(book.book_id.as_str()).await.expect("should return book");
        assert_eq!(book, loaded);
        assert_eq!(2, loaded.available_copies);
        assert_eq!(1, catalog_svc.list_books().await.expect("should list").len());
    }

    #[tokio::test]
    async fn test_should_not_add_invalid_book() {
        let (catalog_svc, publisher) = new_service().await;

        let res = catalog_svc.add_book("", "Herbert", 2).await;
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
        let res = catalog_svc.add_book("Dune", "Herbert", 0).await;
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
        assert!(catalog_svc.list_books().await.expect("should list").is_empty());
        assert!(publisher.event_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_should_add_member() {
        let (catalog_svc, _) = new_service().await;

        let member = catalog_svc.add_member("Alice", "a@x.com").await.expect("should add member");
        let loaded = catalog_svc.find_member_by_id(member.member_id.as_str()).await.expect("should return member");
        assert_eq!(member, loaded);
        assert!(catalog_svc.find_member_by_id("M9999").await.is_err());
        assert!(catalog_svc.add_member("Bob", "").await.is_err());
        assert_eq!(1, catalog_svc.list_members().await.expect("should list").len());
    }

    #[tokio::test]
    async fn test_should_borrow_and_return() {
        let (catalog_svc, publisher) = new_service().await;

        let dune = catalog_svc.add_book("Dune", "Herbert", 2).await.expect("should add book");
        let alice = catalog_svc.add_member("Alice", "a@x.com").await.expect("should add member");
        let bob = catalog_svc.add_member("Bob", "b@x.com").await.expect("should add member");
        let carol = catalog_svc.add_member("Carol", "c@x.com").await.expect("should add member");

        let res = catalog_svc.return_book(&alice.member_id, &dune.book_id).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));

        let loan = catalog_svc.borrow(&alice.member_id, &dune.book_id).await.expect("alice borrows");
        assert_eq!(alice.member_id, loan.member_id);
        assert_eq!("Dune", loan.title.as_str());
        catalog_svc.borrow(&bob.member_id, &dune.book_id).await.expect("bob borrows");
        let book = catalog_svc.find_book_by_id(&dune.book_id).await.expect("should return book");
        assert_eq!(0, book.available_copies);
        assert_eq!(0, catalog_svc.list_available_books().await.expect("should list").len());

        let err = catalog_svc.borrow(&carol.member_id, &dune.book_id).await.expect_err("no copies left");
        assert_eq!(Some(REASON_NO_COPIES), err.reason_code());

        let returned = catalog_svc.return_book(&alice.member_id, &dune.book_id).await.expect("alice returns");
        assert_eq!(loan, returned);
        let book = catalog_svc.find_book_by_id(&dune.book_id).await.expect("should return book");
        assert_eq!(1, book.available_copies);
        let alice = catalog_svc.find_member_by_id(&alice.member_id).await.expect("should return member");
        assert!(alice.loans.is_empty());

        assert_eq!(vec!["book_added", "member_added", "member_added", "member_added",
                        "book_borrowed", "book_borrowed", "book_returned"],
                   publisher.event_names().await);
    }

    #[tokio::test]
    async fn test_should_enforce_loan_limit() {
        let mut config = Configuration::new("test");
        config.max_loans = 1;
        let catalog_svc = CatalogServiceImpl::load(&config, Box::new(MemoryCatalogRepository::new()),
                                                   Box::new(MemoryPublisher::new())).await.expect("should load");
        let dune = catalog_svc.add_book("Dune", "Herbert", 1).await.expect("should add book");
        let emma = catalog_svc.add_book("Emma", "Austen", 1).await.expect("should add book");
        let alice = catalog_svc.add_member("Alice", "a@x.com").await.expect("should add member");

        catalog_svc.borrow(&alice.member_id, &dune.book_id).await.expect("first loan");
        let err = catalog_svc.borrow(&alice.member_id, &emma.book_id).await.expect_err("limit reached");
        assert_eq!(Some(REASON_LOAN_LIMIT), err.reason_code());
        let emma = catalog_svc.find_book_by_id(&emma.book_id).await.expect("should return book");
        assert_eq!(1, emma.available_copies);
    }

    #[tokio::test]
    async fn test_should_discard_change_when_save_fails() {
        let catalog_svc = CatalogServiceImpl::load(&Configuration::new("test"), Box::new(FailingRepository {}),
                                                   Box::new(MemoryPublisher::new())).await.expect("should load");
        let res = catalog_svc.add_book("Dune", "Herbert", 1).await;
        assert!(matches!(res, Err(LibraryError::Runtime { .. })));
        assert!(catalog_svc.list_books().await.expect("should list").is_empty());
    }

    #[tokio::test]
    async fn test_should_load_saved_catalog() {
        let mut catalog = Catalog::new(LoanPolicy { max_loans: 3, loan_days: 14 });
        let book = catalog.add_book("Dune", "Herbert", 2).expect("should add book");
        let alice = catalog.add_member("Alice", "a@x.com").expect("should add member");
        catalog.borrow(&alice.member_id, &book.book_id).expect("should borrow");

        let repo = MemoryCatalogRepository::with_snapshot(catalog.snapshot());
        let catalog_svc = CatalogServiceImpl::load(&Configuration::new("test"), Box::new(repo),
                                                   Box::new(MemoryPublisher::new())).await.expect("should load");
        let summary = catalog_svc.summary().await.expect("should summarize");
        assert_eq!(2, summary.total_copies);
        assert_eq!(1, summary.available_copies);
        assert_eq!(1, summary.active_loans);
        let next = catalog_svc.add_book("Emma", "Austen", 1).await.expect("should add book");
        assert_eq!("B0002", next.book_id.as_str());
        catalog_svc.flush().await.expect("should flush");
    }

    #[tokio::test]
    async fn test_should_reject_inconsistent_saved_catalog() {
        let mut catalog = Catalog::new(LoanPolicy { max_loans: 3, loan_days: 14 });
        catalog.add_book("Dune", "Herbert", 2).expect("should add book");
        let mut snapshot = catalog.snapshot();
        snapshot.books[0].available_copies = 1;

        let res = CatalogServiceImpl::load(&Configuration::new("test"),
                                           Box::new(MemoryCatalogRepository::with_snapshot(snapshot)),
                                           Box::new(MemoryPublisher::new())).await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn test_should_query_overdue() {
        let (catalog_svc, _) = new_service().await;
        let book = catalog_svc.add_book("Dune", "Herbert", 1).await.expect("should add book");
        let alice = catalog_svc.add_member("Alice", "a@x.com").await.expect("should add member");
        catalog_svc.borrow(&alice.member_id, &book.book_id).await.expect("should borrow");

        let now = Utc::now().naive_utc();
        assert!(catalog_svc.query_overdue(now).await.expect("should query").is_empty());
        let overdue = catalog_svc.query_overdue(now + Duration::days(30)).await.expect("should query");
        assert_eq!(1, overdue.len());
        assert_eq!(alice.member_id, overdue[0].member_id);
    }
}
