//! Projection request/response contract with the simulation engine

mod cashflows;
mod request;
pub mod loader;

pub use cashflows::{
    FlowRecord, MortgageStat, ProjectionAnnotation, ProjectionDataPoint, ProjectionResult,
    ProjectionWarning, RuleExecutionLog, DORMANT_ACTIVITY_THRESHOLD,
};
pub use request::{ProjectionRequest, SimulationOverride};
pub use loader::{load_projection, load_projection_from_reader};
