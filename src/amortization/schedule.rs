//! Month-by-month amortization schedules

use serde::{Deserialize, Serialize};

use super::payment::monthly_rate;
use super::terms::{MortgagePreview, MortgageTerms};
use crate::error::Result;

/// A single month of an amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub rate_percent: f64,
    pub opening_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal_repaid: f64,
    pub closing_balance: f64,
}

/// Build the full repayment schedule for a mortgage.
///
/// During a fixed deal the fixed-rate payment applies; afterwards the
/// payment is recalculated on the outstanding balance at the standard rate
/// for the remaining term.
pub fn amortization_schedule(terms: &MortgageTerms) -> Result<Vec<ScheduleRow>> {
    // preview validates, which caps the term at MAX_TERM_YEARS
    let preview = terms.preview()?;
    let total_months = terms.term_years * 12;

    // (months, rate, payment) segments
    let segments: Vec<(u32, f64, f64)> = match preview {
        MortgagePreview::Standard { rate_percent, monthly_payment, .. } => {
            vec![(total_months, rate_percent, monthly_payment)]
        }
        MortgagePreview::FixedThenFollowOn {
            fixed_years,
            fixed_rate_percent,
            fixed_payment,
            remaining_term_years,
            follow_on_rate_percent,
            follow_on_payment,
            ..
        } => {
            let mut segments = vec![(fixed_years * 12, fixed_rate_percent, fixed_payment)];
            if let Some(payment) = follow_on_payment {
                segments.push((remaining_term_years * 12, follow_on_rate_percent, payment));
            }
            segments
        }
    };

    let mut rows = Vec::with_capacity(total_months as usize);
    let mut balance = terms.principal;
    let mut month = 0;

    for (months, rate_percent, payment) in segments {
        let rate = monthly_rate(rate_percent);
        for _ in 0..months {
            month += 1;
            let interest = balance * rate;
            let principal_repaid = payment - interest;
            let closing_balance = balance - principal_repaid;

            rows.push(ScheduleRow {
                month,
                rate_percent,
                opening_balance: balance,
                payment,
                interest,
                principal_repaid,
                closing_balance,
            });
            balance = closing_balance;
        }
    }

    Ok(rows)
}

/// Summary totals over a schedule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_months: u32,
    pub total_paid: f64,
    pub total_interest: f64,
    pub final_balance: f64,
}

impl ScheduleSummary {
    pub fn from_rows(rows: &[ScheduleRow]) -> Self {
        Self {
            total_months: rows.len() as u32,
            total_paid: rows.iter().map(|r| r.payment).sum(),
            total_interest: rows.iter().map(|r| r.interest).sum(),
            final_balance: rows.last().map(|r| r.closing_balance).unwrap_or(0.0),
        }
    }
}
