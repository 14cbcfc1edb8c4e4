//! Aura Planner - numerical core for personal-finance planning
//!
//! This library provides:
//! - Mortgage amortization (PMT, remaining balance, fixed-to-follow-on previews, schedules)
//! - Return decomposition of projections into active contributions and passive growth
//! - Flow aggregation and dormant-row filtering for transaction reports
//! - Milestone detection and CSV export over engine projection output
//! - Parallel comparison of candidate mortgages

pub mod accounts;
pub mod amortization;
pub mod analysis;
pub mod error;
pub mod money;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use accounts::{Account, AccountId, AccountType, TaxWrapper};
pub use amortization::{monthly_payment, remaining_balance, MortgagePreview, MortgageTerms};
pub use analysis::{decompose, Decomposition};
pub use error::{PlannerError, Result};
pub use projection::{FlowRecord, ProjectionDataPoint, ProjectionResult};
pub use scenario::MortgageComparer;
