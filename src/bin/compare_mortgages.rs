//! Compare candidate mortgages loaded from CSV
//!
//! Usage: compare_mortgages <candidates.csv> [output.csv]
//!
//! Candidates are evaluated in parallel and printed cheapest first. When an
//! output path is given, the full comparison is also written as CSV.

use anyhow::{bail, Context, Result};
use aura_planner::amortization::load_candidates;
use aura_planner::money::format_major;
use aura_planner::scenario::{MortgageComparer, MortgageComparison};
use aura_planner::MortgagePreview;
use std::env;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(input_path) = args.get(1) else {
        bail!("Usage: compare_mortgages <candidates.csv> [output.csv]");
    };

    let start = Instant::now();
    let candidates = load_candidates(input_path)
        .with_context(|| format!("Failed to load candidates from {}", input_path))?;
    println!("Loaded {} candidates in {:?}", candidates.len(), start.elapsed());

    let comparer = MortgageComparer::new(candidates);
    let results = comparer.ranked().context("Failed to evaluate candidates")?;

    println!(
        "\n{:<24} {:>12} {:>12} {:>14} {:>14} {:>8}",
        "Candidate", "Initial", "Follow-on", "Total paid", "Interest", "Int/Loan"
    );
    println!("{}", "-".repeat(90));

    for result in &results {
        println!(
            "{:<24} {:>12.2} {:>12} {:>14.2} {:>14.2} {:>8.3}",
            result.label,
            result.preview.initial_payment(),
            follow_on_payment(result).map(format_major).unwrap_or_else(|| "-".to_string()),
            result.summary.total_paid,
            result.summary.total_interest,
            result.interest_ratio(),
        );
    }

    if let Some(output_path) = args.get(2) {
        write_comparison(output_path, &results)
            .with_context(|| format!("Failed to write {}", output_path))?;
        println!("\nComparison written to: {}", output_path);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}

fn follow_on_payment(result: &MortgageComparison) -> Option<f64> {
    match result.preview {
        MortgagePreview::FixedThenFollowOn { follow_on_payment, .. } => follow_on_payment,
        MortgagePreview::Standard { .. } => None,
    }
}

fn write_comparison(path: &str, results: &[MortgageComparison]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Label", "InitialPayment", "FollowOnPayment", "TotalPaid", "TotalInterest", "Months"])?;

    for result in results {
        writer.write_record([
            result.label.clone(),
            format_major(result.preview.initial_payment()),
            follow_on_payment(result).map(format_major).unwrap_or_default(),
            format_major(result.summary.total_paid),
            format_major(result.summary.total_interest),
            result.summary.total_months.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
