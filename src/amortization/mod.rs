//! Mortgage amortization: payments, remaining balances, previews and schedules

mod payment;
mod schedule;
mod terms;
pub mod loader;

pub use payment::{monthly_payment, monthly_rate, remaining_balance, total_repayable};
pub use schedule::{amortization_schedule, ScheduleRow, ScheduleSummary};
pub use terms::{FixedPeriod, MortgagePreview, MortgageTerms, MAX_TERM_YEARS};
pub use loader::{load_candidates, load_candidates_from_reader, MortgageCandidate};
