//! CSV reports over projection output
//!
//! - Balances: one row per period, one column per account plus a total
//! - Transactions: one row per active account per period, dormant rows omitted

use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::accounts::{account_name, Account};
use crate::analysis::active_flows;
use crate::error::Result;
use crate::money::format_major;
use crate::projection::ProjectionResult;

pub const TRANSACTION_HEADER: [&str; 14] = [
    "Date",
    "Account Name",
    "Income",
    "Income Tax & NI",
    "Capital Gains Tax",
    "Employer Contrib",
    "Costs",
    "Transfers In",
    "Transfers Out",
    "Mortgage Pay (Out)",
    "Mortgage Principal (In)",
    "Interest",
    "Events",
    "Ending Balance",
];

/// Write per-account balances for every period. Returns rows written.
pub fn write_balances<W: Write>(
    writer: W,
    projection: &ProjectionResult,
    accounts: &[Account],
) -> Result<usize> {
    let mut csv = Writer::from_writer(writer);

    let mut header = vec!["Date".to_string()];
    header.extend(accounts.iter().map(|a| a.name.clone()));
    header.push("Total Net Worth".to_string());
    csv.write_record(&header)?;

    for dp in &projection.data_points {
        let balances: Vec<f64> = accounts.iter().map(|a| dp.balance_of(a.id)).collect();
        let total: f64 = balances.iter().sum();

        let mut record = vec![dp.date.to_string()];
        record.extend(balances.iter().map(|b| format_major(*b)));
        record.push(format_major(total));
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(projection.data_points.len())
}

/// Write the transaction report. Returns rows written, excluding the header.
pub fn write_transactions<W: Write>(
    writer: W,
    projection: &ProjectionResult,
    accounts: &[Account],
) -> Result<usize> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(TRANSACTION_HEADER)?;

    let mut rows = 0;
    for dp in &projection.data_points {
        for (id, f) in active_flows(dp) {
            let amounts = [
                f.income,
                f.tax,
                f.cgt,
                f.employer_contribution,
                f.costs,
                f.transfers_in,
                f.transfers_out,
                f.mortgage_payments_out,
                f.mortgage_repayments_in,
                f.interest,
                f.events,
                dp.balance_of(id),
            ];

            let mut record = vec![dp.date.to_string(), account_name(accounts, id)];
            record.extend(amounts.iter().map(|v| format_major(*v)));
            csv.write_record(&record)?;
            rows += 1;
        }
    }

    csv.flush()?;
    log::debug!("Wrote {} transaction rows", rows);
    Ok(rows)
}

/// Write both reports to files
pub fn export_reports(
    projection: &ProjectionResult,
    accounts: &[Account],
    balances_path: &Path,
    transactions_path: &Path,
) -> Result<(usize, usize)> {
    let balances = write_balances(File::create(balances_path)?, projection, accounts)?;
    let transactions = write_transactions(File::create(transactions_path)?, projection, accounts)?;

    log::info!(
        "Exported {} balance rows to {} and {} transaction rows to {}",
        balances,
        balances_path.display(),
        transactions,
        transactions_path.display()
    );
    Ok((balances, transactions))
}
