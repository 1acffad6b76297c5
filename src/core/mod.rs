pub mod catalog;
pub mod directory;
pub mod ledger;
pub mod library;

pub use crate::domain::model::{Book, FineLine, LendingPolicy, Loan, LoanView, Member};
pub use crate::domain::ports::{Clock, FixedClock, PolicyProvider, SystemClock};
pub use crate::utils::error::Result;
