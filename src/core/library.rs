use crate::core::catalog::Catalog;
use crate::core::directory::Directory;
use crate::core::ledger::Ledger;
use crate::domain::model::{Book, FineLine, LendingPolicy, Loan, LoanView, Member};
use crate::domain::ports::Clock;
use crate::utils::error::{LibraryError, Result};

/// The lending service: one per process, owning every collection.
pub struct Library<C: Clock> {
    catalog: Catalog,
    directory: Directory,
    ledger: Ledger,
    policy: LendingPolicy,
    clock: C,
}

impl<C: Clock> Library<C> {
    pub fn new(policy: LendingPolicy, clock: C) -> Self {
        Self {
            catalog: Catalog::new(),
            directory: Directory::new(),
            ledger: Ledger::new(),
            policy,
            clock,
        }
    }

    pub fn policy(&self) -> &LendingPolicy {
        &self.policy
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    pub fn add_book(
        &mut self,
        book_id: &str,
        title: &str,
        author: &str,
        copies: u32,
    ) -> Result<&Book> {
        match self.catalog.add_book(book_id, title, author, copies) {
            Ok(book) => {
                tracing::info!(book_id, copies, "book added");
                Ok(book)
            }
            Err(e) => {
                log_rejection("add book", &e);
                Err(e)
            }
        }
    }

    pub fn find_book(&self, book_id: &str) -> Result<&Book> {
        self.catalog.find_book(book_id)
    }

    pub fn list_books(&self) -> &[Book] {
        self.catalog.list_books()
    }

    pub fn add_member(&mut self, member_id: &str, name: &str) -> Result<&Member> {
        match self.directory.add_member(member_id, name) {
            Ok(member) => {
                tracing::info!(member_id, "member added");
                Ok(member)
            }
            Err(e) => {
                log_rejection("add member", &e);
                Err(e)
            }
        }
    }

    pub fn find_member(&self, member_id: &str) -> Result<&Member> {
        self.directory.find_member(member_id)
    }

    pub fn list_members(&self) -> &[Member] {
        self.directory.list_members()
    }

    pub fn borrow(&mut self, book_id: &str, member_id: &str) -> Result<LoanView> {
        let today = self.clock.today();
        let result = self.ledger.borrow(
            &mut self.catalog,
            &self.directory,
            &self.policy,
            book_id,
            member_id,
            today,
        );
        match &result {
            Ok(view) => tracing::info!(book_id, member_id, due = %view.due_date, "book lent"),
            Err(e) => log_rejection("borrow", e),
        }
        result
    }

    pub fn return_book(&mut self, book_id: &str, member_id: &str) -> Result<LoanView> {
        let today = self.clock.today();
        let result = self
            .ledger
            .return_book(&mut self.catalog, &self.directory, book_id, member_id, today);
        match &result {
            Ok(_) => tracing::info!(book_id, member_id, "book returned"),
            Err(e) => log_rejection("return", e),
        }
        result
    }

    pub fn active_loans(&self) -> Result<Vec<LoanView>> {
        self.ledger.active_loans(&self.catalog, &self.directory)
    }

    pub fn fines(&self) -> Result<Vec<FineLine>> {
        let today = self.clock.today();
        tracing::debug!(%today, rate = self.policy.daily_fine, "computing fines");
        self.ledger
            .fines(&self.catalog, &self.directory, self.policy.daily_fine, today)
    }

    pub fn active_count_for(&self, member_id: &str) -> usize {
        self.ledger.active_count_for(member_id)
    }

    pub fn loan_records(&self) -> &[Loan] {
        self.ledger.records()
    }
}

/// Rejections are already shown to the user; only integrity failures are loud.
fn log_rejection(operation: &str, error: &LibraryError) {
    if error.is_recoverable() {
        tracing::info!("{} rejected: {}", operation, error);
    } else {
        tracing::error!("{} failed: {}", operation, error);
    }
}
