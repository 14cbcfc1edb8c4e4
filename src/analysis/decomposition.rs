//! Split net-worth change into active contributions and passive growth
//!
//! The passive component is annualized with a Modified Dietz style midpoint
//! approximation: contributions are assumed to arrive evenly through the
//! horizon, so half of them count towards the capital base.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::accounts::{vesting_account_ids, Account, AccountId};
use crate::error::{PlannerError, Result};
use crate::projection::{ProjectionDataPoint, ProjectionResult};

/// Data points per year (periods are monthly)
pub const PERIODS_PER_YEAR: usize = 12;

/// Net-worth change decomposed into its sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    pub start_balance: f64,
    pub end_balance: f64,
    pub total_growth: f64,
    /// Income + employer contributions + events - costs - tax - CGT
    pub active_contribution: f64,
    /// Investment and interest growth
    pub passive_growth: f64,
    /// Horizon in whole years
    pub years: u32,
    /// Start balance plus half the active contribution
    pub average_capital: f64,
    pub annualized_return_percent: f64,
}

impl Decomposition {
    /// Decompose a projection, excluding every vesting-equity account
    pub fn for_projection(projection: &ProjectionResult, accounts: &[Account]) -> Result<Self> {
        decompose(&projection.data_points, &vesting_account_ids(accounts))
    }

    /// False when any figure, including the annualized return, is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.inputs_finite() && self.annualized_return_percent.is_finite()
    }

    /// False when the projection data itself carried NaN or infinite values
    pub fn inputs_finite(&self) -> bool {
        [
            self.start_balance,
            self.end_balance,
            self.total_growth,
            self.active_contribution,
            self.passive_growth,
            self.average_capital,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Decompose the change in net worth across a projection.
///
/// Balances of `excluded_account_ids` are left out of the start and end
/// totals. Contributions are summed over every account; transfers are
/// redistribution and do not count.
///
/// # Errors
/// * `InvalidInput` if `data_points` is empty
pub fn decompose(
    data_points: &[ProjectionDataPoint],
    excluded_account_ids: &HashSet<AccountId>,
) -> Result<Decomposition> {
    let (first, last) = match (data_points.first(), data_points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(PlannerError::invalid("cannot decompose an empty projection")),
    };

    let is_excluded = |id: AccountId| excluded_account_ids.contains(&id);
    let start_balance = first.total_balance_excluding(is_excluded);
    let end_balance = last.total_balance_excluding(is_excluded);
    let total_growth = end_balance - start_balance;

    let active_contribution: f64 = data_points
        .iter()
        .flat_map(|dp| dp.flows.values())
        .map(|flows| flows.active_contribution())
        .sum();

    let passive_growth = total_growth - active_contribution;
    let years = horizon_years(data_points.len());
    let average_capital = start_balance + 0.5 * active_contribution;
    let annualized_return_percent = annualize(passive_growth, average_capital, years);

    let decomposition = Decomposition {
        start_balance,
        end_balance,
        total_growth,
        active_contribution,
        passive_growth,
        years,
        average_capital,
        annualized_return_percent,
    };

    if !decomposition.inputs_finite() {
        log::warn!(
            "Decomposition over {} points produced non-finite figures: {:?}",
            data_points.len(),
            decomposition
        );
    } else if !decomposition.is_finite() {
        log::warn!(
            "Passive loss {} exceeds average capital {}; no compound annual return over {} years",
            passive_growth,
            average_capital,
            years
        );
    } else {
        log::debug!("Decomposition over {} points: {:?}", data_points.len(), decomposition);
    }

    Ok(decomposition)
}

/// Whole years covered by `periods` monthly data points, rounded to nearest
pub fn horizon_years(periods: usize) -> u32 {
    (periods as f64 / PERIODS_PER_YEAR as f64).round() as u32
}

/// Compound annual return in percent, 0 when the capital base or horizon
/// cannot support one.
///
/// A passive loss larger than the average capital gives a ratio below -1,
/// which has no real root for horizons of two years or more; the result is
/// then NaN rather than a fabricated figure.
fn annualize(passive_growth: f64, average_capital: f64, years: u32) -> f64 {
    if average_capital <= 0.0 || years == 0 {
        return 0.0;
    }

    let total_return_ratio = passive_growth / average_capital;
    ((1.0 + total_return_ratio).powf(1.0 / years as f64) - 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountType;
    use crate::projection::FlowRecord;
    use approx::assert_abs_diff_eq;
    use chrono::{Months, NaiveDate};

    /// Monthly points for a single account, balances interpolated linearly
    /// from `start` to `end`, each month carrying `flows`
    fn monthly_points(count: usize, start: f64, end: f64, flows: FlowRecord) -> Vec<ProjectionDataPoint> {
        let origin = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        (0..count)
            .map(|i| {
                let mut dp = ProjectionDataPoint::new(origin + Months::new(i as u32));
                let fraction = if count > 1 { i as f64 / (count - 1) as f64 } else { 0.0 };
                dp.account_balances.insert(1, start + (end - start) * fraction);
                dp.flows.insert(1, flows.clone());
                dp
            })
            .collect()
    }

    fn salary_flows() -> FlowRecord {
        FlowRecord {
            income: 1000.0,
            costs: 800.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_one_year_savings_scenario() {
        let points = monthly_points(12, 10_000.0, 13_600.0, salary_flows());
        let d = decompose(&points, &HashSet::new()).unwrap();

        assert_abs_diff_eq!(d.start_balance, 10_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d.end_balance, 13_600.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d.active_contribution, 2_400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d.passive_growth, 1_200.0, epsilon = 1e-9);
        assert_eq!(d.years, 1);
        assert_abs_diff_eq!(d.average_capital, 11_200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d.annualized_return_percent, 10.714_285_7, epsilon = 1e-6);
    }

    #[test]
    fn test_passive_growth_is_the_residual() {
        let points = monthly_points(12, 10_000.0, 14_000.0, salary_flows());
        let d = decompose(&points, &HashSet::new()).unwrap();

        assert_eq!(d.active_contribution + d.passive_growth, d.total_growth);
        assert_abs_diff_eq!(d.passive_growth, 1_600.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d.annualized_return_percent, 14.285_714_3, epsilon = 1e-6);
    }

    #[test]
    fn test_multi_year_compounding() {
        // 100k start, 1k/month saved for two years, ends at 136k
        let flows = FlowRecord {
            income: 1_000.0,
            ..Default::default()
        };
        let points = monthly_points(24, 100_000.0, 136_000.0, flows);
        let d = decompose(&points, &HashSet::new()).unwrap();

        assert_eq!(d.years, 2);
        assert_abs_diff_eq!(d.passive_growth, 12_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(d.annualized_return_percent, 5.220_856, epsilon = 1e-5);
    }

    #[test]
    fn test_short_horizon_reports_zero_return() {
        let points = monthly_points(5, 10_000.0, 12_000.0, salary_flows());
        let d = decompose(&points, &HashSet::new()).unwrap();

        assert_eq!(d.years, 0);
        assert_eq!(d.annualized_return_percent, 0.0);
        assert!(d.passive_growth > 0.0);
    }

    #[test]
    fn test_non_positive_capital_reports_zero_return() {
        let flows = FlowRecord {
            costs: 500.0,
            ..Default::default()
        };
        let points = monthly_points(24, 1_000.0, -5_000.0, flows);
        let d = decompose(&points, &HashSet::new()).unwrap();

        assert!(d.average_capital <= 0.0);
        assert_eq!(d.annualized_return_percent, 0.0);
    }

    #[test]
    fn test_excluded_accounts_leave_totals() {
        let mut points = monthly_points(12, 10_000.0, 13_600.0, salary_flows());
        for dp in &mut points {
            dp.account_balances.insert(2, 50_000.0);
        }

        let excluded = HashSet::from([2]);
        let with_exclusion = decompose(&points, &excluded).unwrap();
        assert_abs_diff_eq!(with_exclusion.start_balance, 10_000.0, epsilon = 1e-9);

        let without = decompose(&points, &HashSet::new()).unwrap();
        assert_abs_diff_eq!(without.start_balance, 60_000.0, epsilon = 1e-9);
        assert!(without.annualized_return_percent < with_exclusion.annualized_return_percent);
    }

    #[test]
    fn test_transfers_are_not_contributions() {
        let flows = FlowRecord {
            transfers_in: 5_000.0,
            transfers_out: -5_000.0,
            ..Default::default()
        };
        let points = monthly_points(12, 1_000.0, 1_000.0, flows);
        let d = decompose(&points, &HashSet::new()).unwrap();
        assert_eq!(d.active_contribution, 0.0);
    }

    #[test]
    fn test_empty_projection_rejected() {
        let err = decompose(&[], &HashSet::new()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));
    }

    #[test]
    fn test_non_finite_input_is_not_coerced() {
        let mut points = monthly_points(12, 10_000.0, 13_600.0, salary_flows());
        points[11].account_balances.insert(1, f64::NAN);
        let d = decompose(&points, &HashSet::new()).unwrap();

        assert!(!d.is_finite());
        assert!(!d.inputs_finite());
        assert!(d.end_balance.is_nan());
    }

    #[test]
    fn test_loss_beyond_capital_has_no_annual_return() {
        // Net worth falls from 1,000 to -2,000 with no contributions over two years
        let points = monthly_points(24, 1_000.0, -2_000.0, FlowRecord::default());
        let d = decompose(&points, &HashSet::new()).unwrap();

        assert!(d.inputs_finite());
        assert_abs_diff_eq!(d.passive_growth, -3_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d.average_capital, 1_000.0, epsilon = 1e-9);
        assert_eq!(d.years, 2);
        assert!(d.annualized_return_percent.is_nan());
        assert!(!d.is_finite());
    }

    #[test]
    fn test_for_projection_excludes_vesting_equity() {
        let mut points = monthly_points(12, 10_000.0, 13_600.0, salary_flows());
        for dp in &mut points {
            dp.account_balances.insert(3, 25_000.0);
        }
        let projection = ProjectionResult::new(points);
        let accounts = vec![
            Account::new(1, "Current", AccountType::Cash),
            Account::new(3, "Grant", AccountType::RsuGrant),
        ];

        let d = Decomposition::for_projection(&projection, &accounts).unwrap();
        assert_abs_diff_eq!(d.start_balance, 10_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_horizon_rounding() {
        assert_eq!(horizon_years(0), 0);
        assert_eq!(horizon_years(5), 0);
        assert_eq!(horizon_years(6), 1);
        assert_eq!(horizon_years(17), 1);
        assert_eq!(horizon_years(18), 2);
        assert_eq!(horizon_years(600), 50);
    }
}
