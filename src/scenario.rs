//! Batch evaluation of candidate mortgage configurations
//!
//! Each candidate is independent, so previews and schedules are computed in
//! parallel and returned in input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::amortization::{amortization_schedule, MortgageCandidate, MortgagePreview, ScheduleSummary};
use crate::error::Result;

/// Outcome for one candidate
#[derive(Debug, Clone, Serialize)]
pub struct MortgageComparison {
    pub label: String,
    pub principal: f64,
    pub preview: MortgagePreview,
    pub summary: ScheduleSummary,
}

impl MortgageComparison {
    /// Interest paid per unit borrowed
    pub fn interest_ratio(&self) -> f64 {
        if self.principal <= 0.0 {
            return 0.0;
        }
        self.summary.total_interest / self.principal
    }
}

/// Evaluates candidate mortgages side by side
///
/// # Example
/// ```ignore
/// let comparer = MortgageComparer::new(load_candidates("candidates.csv")?);
/// for c in comparer.run()? {
///     println!("{}: {:.2}", c.label, c.summary.total_interest);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MortgageComparer {
    candidates: Vec<MortgageCandidate>,
}

impl MortgageComparer {
    pub fn new(candidates: Vec<MortgageCandidate>) -> Self {
        Self { candidates }
    }

    pub fn add(&mut self, candidate: MortgageCandidate) {
        self.candidates.push(candidate);
    }

    pub fn candidates(&self) -> &[MortgageCandidate] {
        &self.candidates
    }

    /// Evaluate every candidate; fails on the first invalid one
    pub fn run(&self) -> Result<Vec<MortgageComparison>> {
        self.candidates.par_iter().map(evaluate).collect()
    }

    /// Evaluate and order by total interest, cheapest first
    pub fn ranked(&self) -> Result<Vec<MortgageComparison>> {
        let mut results = self.run()?;
        results.sort_by(|a, b| a.summary.total_interest.total_cmp(&b.summary.total_interest));
        Ok(results)
    }
}

fn evaluate(candidate: &MortgageCandidate) -> Result<MortgageComparison> {
    let preview = candidate.terms.preview()?;
    let rows = amortization_schedule(&candidate.terms)?;

    Ok(MortgageComparison {
        label: candidate.label.clone(),
        principal: candidate.terms.principal,
        preview,
        summary: ScheduleSummary::from_rows(&rows),
    })
}
