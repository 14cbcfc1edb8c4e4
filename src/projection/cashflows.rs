//! Projection output records produced by the simulation engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::accounts::AccountId;

/// Activity at or below this magnitude (major units) marks an account as
/// dormant for the period.
pub const DORMANT_ACTIVITY_THRESHOLD: f64 = 0.01;

/// Flows recorded against one account for one period (major units, signed)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowRecord {
    pub income: f64,
    pub tax: f64,
    pub cgt: f64,
    pub employer_contribution: f64,
    pub costs: f64,
    pub transfers_in: f64,
    pub transfers_out: f64,
    pub mortgage_payments_out: f64,
    pub mortgage_repayments_in: f64,
    pub interest: f64,
    pub events: f64,
}

impl FlowRecord {
    /// Net money the user actively moved: earnings less spending and tax.
    /// Transfers and interest are excluded.
    pub fn active_contribution(&self) -> f64 {
        self.income + self.employer_contribution - self.costs - self.tax - self.cgt + self.events
    }

    /// Sum of the absolute value of every flow field
    pub fn total_activity(&self) -> f64 {
        [
            self.income,
            self.tax,
            self.cgt,
            self.employer_contribution,
            self.costs,
            self.transfers_in,
            self.transfers_out,
            self.mortgage_payments_out,
            self.mortgage_repayments_in,
            self.interest,
            self.events,
        ]
        .iter()
        .map(|v| v.abs())
        .sum()
    }

    pub fn is_dormant(&self) -> bool {
        self.total_activity() <= DORMANT_ACTIVITY_THRESHOLD
    }
}

/// End-of-period state for one simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionDataPoint {
    pub date: NaiveDate,

    /// Total balance as reported by the engine
    #[serde(default)]
    pub balance: f64,

    pub account_balances: BTreeMap<AccountId, f64>,

    #[serde(default)]
    pub flows: BTreeMap<AccountId, FlowRecord>,
}

impl ProjectionDataPoint {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            balance: 0.0,
            account_balances: BTreeMap::new(),
            flows: BTreeMap::new(),
        }
    }

    /// Balance of one account, zero when the engine did not report it
    pub fn balance_of(&self, account_id: AccountId) -> f64 {
        self.account_balances.get(&account_id).copied().unwrap_or(0.0)
    }

    /// Sum of account balances, skipping any account for which `exclude`
    /// returns true
    pub fn total_balance_excluding<F>(&self, exclude: F) -> f64
    where
        F: Fn(AccountId) -> bool,
    {
        self.account_balances
            .iter()
            .filter(|(id, _)| !exclude(**id))
            .map(|(_, balance)| balance)
            .sum()
    }
}

/// Engine warning attached to a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionWarning {
    pub date: NaiveDate,
    pub account_id: AccountId,
    pub message: String,
    #[serde(default = "default_source_type")]
    pub source_type: String,
    #[serde(default)]
    pub source_id: i64,
}

fn default_source_type() -> String {
    "system".to_string()
}

/// Chart annotation (milestones and other labelled dates)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionAnnotation {
    pub date: NaiveDate,
    pub label: String,
    #[serde(rename = "type", default = "default_annotation_kind")]
    pub kind: String,
}

fn default_annotation_kind() -> String {
    "default".to_string()
}

/// Audit record of an automation rule firing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleExecutionLog {
    pub date: NaiveDate,
    pub rule_type: String,
    pub action: String,
    pub amount: f64,
    pub source_account: String,
    pub target_account: String,
    pub reason: String,
}

/// Yearly mortgage overpayment allowance usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageStat {
    pub year_start: i32,
    pub rule_id: i64,
    pub rule_name: String,
    pub allowance: f64,
    pub paid: f64,
    pub headroom: f64,
}

/// Complete projection returned by the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Monthly data points in chronological order
    pub data_points: Vec<ProjectionDataPoint>,

    #[serde(default)]
    pub warnings: Vec<ProjectionWarning>,

    #[serde(default)]
    pub annotations: Vec<ProjectionAnnotation>,

    #[serde(default)]
    pub rule_logs: Vec<RuleExecutionLog>,

    #[serde(default)]
    pub mortgage_stats: Vec<MortgageStat>,

    /// Opaque engine metadata
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl ProjectionResult {
    pub fn new(data_points: Vec<ProjectionDataPoint>) -> Self {
        Self {
            data_points,
            ..Default::default()
        }
    }

    /// Number of simulated months
    pub fn months(&self) -> usize {
        self.data_points.len()
    }

    pub fn is_chronological(&self) -> bool {
        self.data_points.windows(2).all(|w| w[0].date <= w[1].date)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.data_points.first().map(|dp| dp.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.data_points.last().map(|dp| dp.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flows_with_interest(interest: f64) -> FlowRecord {
        FlowRecord {
            interest,
            ..Default::default()
        }
    }

    #[test]
    fn test_dormant_threshold() {
        assert!(flows_with_interest(0.005).is_dormant());
        assert!(flows_with_interest(0.01).is_dormant());
        assert!(!flows_with_interest(0.02).is_dormant());
        assert!(FlowRecord::default().is_dormant());
    }

    #[test]
    fn test_total_activity_uses_magnitudes() {
        let flows = FlowRecord {
            income: 1000.0,
            tax: 200.0,
            costs: 300.0,
            transfers_out: -150.0,
            mortgage_payments_out: -500.0,
            interest: -2.5,
            ..Default::default()
        };
        assert_eq!(flows.total_activity(), 2152.5);
    }

    #[test]
    fn test_active_contribution_ignores_transfers_and_interest() {
        let flows = FlowRecord {
            income: 3000.0,
            employer_contribution: 150.0,
            costs: 1200.0,
            tax: 600.0,
            cgt: 50.0,
            events: -100.0,
            transfers_in: 400.0,
            transfers_out: -400.0,
            interest: 12.0,
            ..Default::default()
        };
        assert_eq!(flows.active_contribution(), 1200.0);
    }

    #[test]
    fn test_data_point_from_engine_json() {
        let json = r#"{
            "date": "2025-01-01",
            "balance": 1500.0,
            "account_balances": {"1": 1000.0, "2": 500.0},
            "flows": {"1": {"income": 2500.0, "costs": 1200.0, "tax": 400.0}}
        }"#;
        let dp: ProjectionDataPoint = serde_json::from_str(json).unwrap();

        assert_eq!(dp.date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(dp.balance_of(2), 500.0);
        assert_eq!(dp.balance_of(99), 0.0);
        assert_eq!(dp.flows[&1].cgt, 0.0);
        assert_eq!(dp.total_balance_excluding(|id| id == 2), 1000.0);
    }
}
