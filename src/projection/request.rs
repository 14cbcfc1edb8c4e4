//! Request contract for the external projection engine

use serde::{Deserialize, Serialize};

/// Field-level override applied to a scenario entity for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOverride {
    /// Target entity type, e.g. "account" or "income_source"
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Target entity id
    pub id: i64,
    /// Field name on the entity
    pub field: String,
    /// Replacement value
    pub value: serde_json::Value,
}

/// Body of a projection request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// Months to simulate; the engine picks its own horizon when absent
    #[serde(default)]
    pub simulation_months: Option<u32>,

    #[serde(default)]
    pub overrides: Vec<SimulationOverride>,
}

impl ProjectionRequest {
    pub fn for_months(months: u32) -> Self {
        Self {
            simulation_months: Some(months),
            overrides: Vec::new(),
        }
    }

    pub fn with_override(
        mut self,
        entity_type: impl Into<String>,
        id: i64,
        field: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        self.overrides.push(SimulationOverride {
            entity_type: entity_type.into(),
            id,
            field: field.into(),
            value,
        });
        self
    }
}
