//! Load projection results exported by the simulation engine (JSON)

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::ProjectionResult;
use crate::error::{PlannerError, Result};

/// Load a projection result from a JSON file
pub fn load_projection<P: AsRef<Path>>(path: P) -> Result<ProjectionResult> {
    let file = File::open(path)?;
    load_projection_from_reader(BufReader::new(file))
}

/// Load a projection result from any reader (e.g., HTTP body, stdin)
pub fn load_projection_from_reader<R: std::io::Read>(reader: R) -> Result<ProjectionResult> {
    let result: ProjectionResult = serde_json::from_reader(reader)?;

    if !result.is_chronological() {
        return Err(PlannerError::invalid("projection data points are not in chronological order"));
    }

    log::info!(
        "Loaded projection with {} data points, {} warnings",
        result.months(),
        result.warnings.len()
    );
    Ok(result)
}
