//! Analytics over completed projections

mod activity;
mod decomposition;
mod growth;
mod milestones;

pub use activity::{active_flows, aggregate_flows, FlowTotals};
pub use decomposition::{decompose, horizon_years, Decomposition, PERIODS_PER_YEAR};
pub use growth::simple_annualized_return;
pub use milestones::{detect_milestones, LIQUIDITY_LABEL, MILESTONE_KIND};
