use crate::domain::model::LendingPolicy;
use chrono::NaiveDate;

/// Source of "today" for loan and fine dates.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub trait PolicyProvider {
    fn loan_period_days(&self) -> u32;
    fn daily_fine(&self) -> u64;
    fn max_active_loans(&self) -> usize;
    fn currency(&self) -> &str;

    fn lending_policy(&self) -> LendingPolicy {
        LendingPolicy {
            loan_period_days: self.loan_period_days(),
            daily_fine: self.daily_fine(),
            max_active_loans: self.max_active_loans(),
            currency: self.currency().to_string(),
        }
    }
}
