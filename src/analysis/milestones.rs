//! Milestone annotations derived from a projection
//!
//! Milestones are balance crossovers between consecutive periods. The
//! first period is compared against each account's starting balance.

use std::collections::BTreeMap;

use crate::accounts::{Account, AccountId, AccountType};
use crate::projection::{ProjectionAnnotation, ProjectionDataPoint};

pub const MILESTONE_KIND: &str = "milestone";
pub const LIQUIDITY_LABEL: &str = "Liquid assets exceed liabilities";

/// Detect debt payoffs, grant vestings and the liquidity crossover
pub fn detect_milestones(
    accounts: &[Account],
    data_points: &[ProjectionDataPoint],
) -> Vec<ProjectionAnnotation> {
    let mut annotations = Vec::new();
    let mut previous: BTreeMap<AccountId, f64> = accounts
        .iter()
        .map(|a| (a.id, a.starting_balance_major()))
        .collect();

    for dp in data_points {
        let milestone = |label: String| ProjectionAnnotation {
            date: dp.date,
            label,
            kind: MILESTONE_KIND.to_string(),
        };

        for account in accounts {
            let prev = previous.get(&account.id).copied().unwrap_or(0.0);
            let curr = dp.balance_of(account.id);

            if account.account_type.is_debt() && prev < 0.0 && curr >= 0.0 {
                annotations.push(milestone(format!("Paid Off: {}", account.name)));
            }
            if account.account_type == AccountType::RsuGrant && prev > 0.0 && curr <= 0.0 {
                annotations.push(milestone(format!("Vested: {}", account.name)));
            }
        }

        let (prev_liquid, prev_debt) = liquidity(accounts, |id| previous.get(&id).copied().unwrap_or(0.0));
        let (curr_liquid, curr_debt) = liquidity(accounts, |id| dp.balance_of(id));

        if prev_debt > 0.0 && prev_liquid < prev_debt && curr_liquid >= curr_debt {
            annotations.push(milestone(LIQUIDITY_LABEL.to_string()));
        }

        for account in accounts {
            previous.insert(account.id, dp.balance_of(account.id));
        }
    }

    log::debug!("Detected {} milestones over {} periods", annotations.len(), data_points.len());
    annotations
}

/// Positive liquid balances and outstanding debt (as a magnitude)
fn liquidity<F>(accounts: &[Account], balance_of: F) -> (f64, f64)
where
    F: Fn(AccountId) -> f64,
{
    accounts.iter().fold((0.0, 0.0), |(liquid, debt), account| {
        let balance = balance_of(account.id);
        if account.is_liquid() && balance > 0.0 {
            (liquid + balance, debt)
        } else if account.account_type.is_debt() && balance < 0.0 {
            (liquid, debt + balance.abs())
        } else {
            (liquid, debt)
        }
    })
}
