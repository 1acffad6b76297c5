use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub total_copies: u32,
    pub available_copies: u32,
}

impl Book {
    pub fn new(book_id: String, title: String, author: String, copies: u32) -> Self {
        Self {
            book_id,
            title,
            author,
            total_copies: copies,
            available_copies: copies,
        }
    }

    pub fn on_loan(&self) -> u32 {
        self.total_copies.saturating_sub(self.available_copies)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub member_id: String,
    pub name: String,
}

/// One borrow transaction. Only `returned`/`returned_on` ever change, once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub book_id: String,
    pub member_id: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned: bool,
    pub returned_on: Option<NaiveDate>,
}

impl Loan {
    pub fn is_active(&self) -> bool {
        !self.returned
    }

    pub fn matches(&self, book_id: &str, member_id: &str) -> bool {
        self.book_id == book_id && self.member_id == member_id
    }

    /// Whole calendar days past the due date; zero when not yet due.
    pub fn overdue_days(&self, today: NaiveDate) -> u64 {
        let days = (today - self.due_date).num_days();
        u64::try_from(days).unwrap_or(0)
    }
}

/// A loan joined with the book and member it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanView {
    pub title: String,
    pub book_id: String,
    pub member_name: String,
    pub member_id: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FineLine {
    pub title: String,
    pub book_id: String,
    pub member_name: String,
    pub member_id: String,
    pub due_date: NaiveDate,
    pub overdue_days: u64,
    pub fine: u64,
}

/// Lending rules: loan period, fine rate, per-member cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LendingPolicy {
    pub loan_period_days: u32,
    pub daily_fine: u64,
    pub max_active_loans: usize,
    pub currency: String,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: 7,
            daily_fine: 100,
            max_active_loans: 5,
            currency: "JPY".to_string(),
        }
    }
}
