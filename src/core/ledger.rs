//! Append-only loan records and the borrow/return/fine rules built on them.
//!
//! The ledger never owns books or members. Every operation takes the catalog
//! and directory it should resolve ids against, and checks all preconditions
//! before touching either collection, so a failed borrow or return leaves no
//! trace.

use crate::core::catalog::Catalog;
use crate::core::directory::Directory;
use crate::domain::model::{FineLine, LendingPolicy, Loan, LoanView};
use crate::utils::error::{LibraryError, Result};
use chrono::{Days, NaiveDate};

#[derive(Debug, Default)]
pub struct Ledger {
    loans: Vec<Loan>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lend one copy of `book_id` to `member_id`.
    ///
    /// Preconditions are checked in order: book exists, member exists, a copy
    /// is available, the member is under the loan cap. The first failure is
    /// returned and nothing changes.
    pub fn borrow(
        &mut self,
        catalog: &mut Catalog,
        directory: &Directory,
        policy: &LendingPolicy,
        book_id: &str,
        member_id: &str,
        today: NaiveDate,
    ) -> Result<LoanView> {
        let book = catalog.find_book(book_id)?;
        let member = directory.find_member(member_id)?;

        if book.available_copies == 0 {
            return Err(LibraryError::NoAvailableCopies {
                book_id: book.book_id.clone(),
                title: book.title.clone(),
            });
        }

        let held = self.active_count_for(member_id);
        tracing::debug!(member_id, held, limit = policy.max_active_loans, "checking loan cap");
        if held >= policy.max_active_loans {
            return Err(LibraryError::LoanCapExceeded {
                member_id: member.member_id.clone(),
                limit: policy.max_active_loans,
            });
        }

        let due_date = today
            .checked_add_days(Days::new(u64::from(policy.loan_period_days)))
            .ok_or_else(|| LibraryError::InvalidConfigValueError {
                field: "lending.loan_period_days".to_string(),
                value: policy.loan_period_days.to_string(),
                reason: format!("due date overflows the calendar from {}", today),
            })?;

        let view = LoanView {
            title: book.title.clone(),
            book_id: book.book_id.clone(),
            member_name: member.name.clone(),
            member_id: member.member_id.clone(),
            borrow_date: today,
            due_date,
        };

        // Decrement before the append: it is the only step that can fail.
        catalog.decrement_available(book_id)?;
        self.loans.push(Loan {
            book_id: view.book_id.clone(),
            member_id: view.member_id.clone(),
            borrow_date: today,
            due_date,
            returned: false,
            returned_on: None,
        });

        Ok(view)
    }

    /// Close the oldest active loan of `book_id` held by `member_id`.
    pub fn return_book(
        &mut self,
        catalog: &mut Catalog,
        directory: &Directory,
        book_id: &str,
        member_id: &str,
        today: NaiveDate,
    ) -> Result<LoanView> {
        let slot = self
            .loans
            .iter()
            .position(|loan| loan.is_active() && loan.matches(book_id, member_id))
            .ok_or_else(|| LibraryError::NotCurrentlyBorrowed {
                book_id: book_id.to_string(),
                member_id: member_id.to_string(),
            })?;

        let view = self.join(&self.loans[slot], catalog, directory)?;

        catalog.increment_available(book_id)?;
        let loan = &mut self.loans[slot];
        loan.returned = true;
        loan.returned_on = Some(today);

        Ok(view)
    }

    pub fn active_count_for(&self, member_id: &str) -> usize {
        self.loans
            .iter()
            .filter(|loan| loan.is_active() && loan.member_id == member_id)
            .count()
    }

    pub fn active_loans(&self, catalog: &Catalog, directory: &Directory) -> Result<Vec<LoanView>> {
        self.active()
            .map(|loan| self.join(loan, catalog, directory))
            .collect()
    }

    pub fn fines(
        &self,
        catalog: &Catalog,
        directory: &Directory,
        daily_fine: u64,
        today: NaiveDate,
    ) -> Result<Vec<FineLine>> {
        self.active()
            .map(|loan| -> Result<FineLine> {
                let view = self.join(loan, catalog, directory)?;
                let overdue_days = loan.overdue_days(today);
                Ok(FineLine {
                    title: view.title,
                    book_id: view.book_id,
                    member_name: view.member_name,
                    member_id: view.member_id,
                    due_date: loan.due_date,
                    overdue_days,
                    fine: overdue_days.saturating_mul(daily_fine),
                })
            })
            .collect()
    }

    /// Every loan ever made, returned ones included.
    pub fn records(&self) -> &[Loan] {
        &self.loans
    }

    fn active(&self) -> impl Iterator<Item = &Loan> {
        self.loans.iter().filter(|loan| loan.is_active())
    }

    fn join(&self, loan: &Loan, catalog: &Catalog, directory: &Directory) -> Result<LoanView> {
        let book = catalog.find_book(&loan.book_id)?;
        let member = directory.find_member(&loan.member_id)?;
        Ok(LoanView {
            title: book.title.clone(),
            book_id: book.book_id.clone(),
            member_name: member.name.clone(),
            member_id: member.member_id.clone(),
            borrow_date: loan.borrow_date,
            due_date: loan.due_date,
        })
    }
}
