//! Fixed-rate loan repayment: the periodic payment of a fully amortizing
//! loan and its period by period amortization schedule.

pub mod error;
pub mod input;
pub mod loan;
pub mod report;

pub use error::{InputError, LoanError, LoanResult};
pub use loan::{amortization_schedule, periodic_payment, Frequency, LoanTerms, PeriodRecord};
pub use report::LoanSummary;
