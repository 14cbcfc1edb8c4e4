//! Mortgage terms and payment previews, including fixed-rate periods that
//! roll onto a follow-on (standard variable) rate.

use serde::{Deserialize, Serialize};

use super::payment::{monthly_payment, remaining_balance};
use crate::error::{PlannerError, Result};

/// Longest repayment term accepted by [`MortgageTerms::validate`]
pub const MAX_TERM_YEARS: u32 = 100;

/// An initial fixed-rate deal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedPeriod {
    /// Fixed annual rate in percent
    pub rate_percent: f64,
    /// Length of the fixed deal in years
    pub years: u32,
}

/// Terms of an amortizing mortgage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageTerms {
    /// Amount borrowed (major units)
    pub principal: f64,

    /// Full repayment term in years
    pub term_years: u32,

    /// Standard (follow-on) annual rate in percent
    pub standard_rate_percent: f64,

    /// Optional initial fixed-rate deal
    #[serde(default)]
    pub fixed: Option<FixedPeriod>,
}

/// Estimated monthly payments for a set of mortgage terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MortgagePreview {
    /// Single rate for the whole term
    Standard {
        term_years: u32,
        rate_percent: f64,
        monthly_payment: f64,
    },
    /// Fixed deal followed by the standard rate for the remaining term
    FixedThenFollowOn {
        fixed_years: u32,
        fixed_rate_percent: f64,
        fixed_payment: f64,
        balance_after_fixed: f64,
        remaining_term_years: u32,
        follow_on_rate_percent: f64,
        /// None when the fixed deal runs to the end of the term
        follow_on_payment: Option<f64>,
    },
}

impl MortgagePreview {
    /// Payment due in the first month
    pub fn initial_payment(&self) -> f64 {
        match self {
            MortgagePreview::Standard { monthly_payment, .. } => *monthly_payment,
            MortgagePreview::FixedThenFollowOn { fixed_payment, .. } => *fixed_payment,
        }
    }
}

impl MortgageTerms {
    /// Standard repayment mortgage with no fixed deal
    pub fn standard(principal: f64, term_years: u32, rate_percent: f64) -> Self {
        Self {
            principal,
            term_years,
            standard_rate_percent: rate_percent,
            fixed: None,
        }
    }

    /// Add an initial fixed-rate deal
    pub fn with_fixed_period(mut self, rate_percent: f64, years: u32) -> Self {
        self.fixed = Some(FixedPeriod { rate_percent, years });
        self
    }

    /// The fixed period, if one is set and has a non-zero length
    pub fn active_fixed_period(&self) -> Option<FixedPeriod> {
        self.fixed.filter(|f| f.years > 0)
    }

    /// Reject terms for which a schedule is structurally meaningless
    pub fn validate(&self) -> Result<()> {
        if self.term_years > MAX_TERM_YEARS {
            return Err(PlannerError::invalid(format!(
                "term of {} years exceeds the {} year maximum",
                self.term_years, MAX_TERM_YEARS
            )));
        }
        if !self.principal.is_finite() || self.principal < 0.0 {
            return Err(PlannerError::invalid(format!(
                "principal must be a non-negative amount, got {}",
                self.principal
            )));
        }
        if !self.standard_rate_percent.is_finite() || self.standard_rate_percent < 0.0 {
            return Err(PlannerError::invalid(format!(
                "standard rate must be a non-negative percentage, got {}",
                self.standard_rate_percent
            )));
        }
        if let Some(fixed) = self.fixed {
            if !fixed.rate_percent.is_finite() || fixed.rate_percent < 0.0 {
                return Err(PlannerError::invalid(format!(
                    "fixed rate must be a non-negative percentage, got {}",
                    fixed.rate_percent
                )));
            }
            if fixed.years > self.term_years {
                return Err(PlannerError::invalid(format!(
                    "fixed period of {} years exceeds the {} year term",
                    fixed.years, self.term_years
                )));
            }
        }
        Ok(())
    }

    /// Estimate the monthly payments for these terms
    pub fn preview(&self) -> Result<MortgagePreview> {
        self.validate()?;

        let preview = match self.active_fixed_period() {
            Some(fixed) => {
                let fixed_payment = monthly_payment(self.principal, fixed.rate_percent, self.term_years);
                let balance_after_fixed =
                    remaining_balance(self.principal, fixed.rate_percent, self.term_years, fixed.years);
                let remaining_term_years = self.term_years - fixed.years;
                let follow_on_payment = (remaining_term_years > 0).then(|| {
                    monthly_payment(balance_after_fixed, self.standard_rate_percent, remaining_term_years)
                });

                MortgagePreview::FixedThenFollowOn {
                    fixed_years: fixed.years,
                    fixed_rate_percent: fixed.rate_percent,
                    fixed_payment,
                    balance_after_fixed,
                    remaining_term_years,
                    follow_on_rate_percent: self.standard_rate_percent,
                    follow_on_payment,
                }
            }
            None => MortgagePreview::Standard {
                term_years: self.term_years,
                rate_percent: self.standard_rate_percent,
                monthly_payment: monthly_payment(
                    self.principal,
                    self.standard_rate_percent,
                    self.term_years,
                ),
            },
        };

        log::debug!("Mortgage preview for {:?}: {:?}", self, preview);
        Ok(preview)
    }
}
