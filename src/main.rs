//! Aura Planner CLI
//!
//! Mortgage previews and analysis of projections exported by the simulation
//! engine. Every option can also be supplied through an `AURA_*` environment
//! variable.

use anyhow::{Context, Result};
use aura_planner::accounts::{load_accounts, vesting_account_ids, Account, AccountId};
use aura_planner::amortization::{amortization_schedule, ScheduleSummary};
use aura_planner::analysis::{aggregate_flows, decompose, detect_milestones, simple_annualized_return};
use aura_planner::money::format_major;
use aura_planner::projection::{load_projection, ProjectionResult};
use aura_planner::report::export_reports;
use aura_planner::{MortgagePreview, MortgageTerms};
use clap::{Args, Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aura-planner", version, about = "Personal-finance planning calculations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Preview monthly payments for a mortgage
    Mortgage(MortgageArgs),
    /// Decompose a projection into active contributions and passive growth
    Analyze(AnalyzeArgs),
    /// Write balance and transaction CSV reports for a projection
    Export(ExportArgs),
    /// List milestones reached during a projection
    Milestones(MilestoneArgs),
}

#[derive(Args)]
struct MortgageArgs {
    /// Amount borrowed (major units)
    #[arg(long, env = "AURA_PRINCIPAL")]
    principal: f64,

    /// Full repayment term in years
    #[arg(long, env = "AURA_TERM_YEARS")]
    term_years: u32,

    /// Standard (follow-on) annual rate in percent
    #[arg(long, env = "AURA_RATE")]
    rate: f64,

    /// Fixed-deal annual rate in percent
    #[arg(long, env = "AURA_FIXED_RATE", requires = "fixed_years")]
    fixed_rate: Option<f64>,

    /// Fixed-deal length in years
    #[arg(long, env = "AURA_FIXED_YEARS", requires = "fixed_rate")]
    fixed_years: Option<u32>,

    /// Print the month-by-month schedule
    #[arg(long)]
    schedule: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ProjectionInput {
    /// Projection JSON returned by the engine
    #[arg(long, env = "AURA_PROJECTION")]
    projection: PathBuf,

    /// Scenario or account list JSON
    #[arg(long, env = "AURA_ACCOUNTS")]
    accounts: Option<PathBuf>,
}

impl ProjectionInput {
    fn load(&self) -> Result<(ProjectionResult, Vec<Account>)> {
        let projection = load_projection(&self.projection)
            .with_context(|| format!("Failed to load projection {}", self.projection.display()))?;
        let accounts = match &self.accounts {
            Some(path) => load_accounts(path)
                .with_context(|| format!("Failed to load accounts {}", path.display()))?,
            None => Vec::new(),
        };
        Ok((projection, accounts))
    }
}

#[derive(Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    input: ProjectionInput,

    /// Extra account ids to leave out of net worth (vesting grants are always excluded)
    #[arg(long = "exclude", env = "AURA_EXCLUDE", value_delimiter = ',')]
    exclude: Vec<AccountId>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    input: ProjectionInput,

    /// Balances CSV output path
    #[arg(long, env = "AURA_BALANCES_CSV", default_value = "aura_balances.csv")]
    balances: PathBuf,

    /// Transaction report CSV output path
    #[arg(long, env = "AURA_TRANSACTIONS_CSV", default_value = "aura_transaction_report.csv")]
    transactions: PathBuf,
}

#[derive(Args)]
struct MilestoneArgs {
    #[command(flatten)]
    input: ProjectionInput,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Mortgage(args) => run_mortgage(args),
        Command::Analyze(args) => run_analyze(args),
        Command::Export(args) => run_export(args),
        Command::Milestones(args) => run_milestones(args),
    }
}

fn run_mortgage(args: MortgageArgs) -> Result<()> {
    let mut terms = MortgageTerms::standard(args.principal, args.term_years, args.rate);
    if let (Some(rate), Some(years)) = (args.fixed_rate, args.fixed_years) {
        terms = terms.with_fixed_period(rate, years);
    }

    let preview = terms.preview()?;
    let rows = amortization_schedule(&terms)?;
    let summary = ScheduleSummary::from_rows(&rows);

    if args.json {
        let schedule = args.schedule.then_some(&rows);
        let output = serde_json::json!({
            "terms": terms,
            "preview": preview,
            "summary": summary,
            "schedule": schedule,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Estimated payments:");
    match preview {
        MortgagePreview::Standard { term_years, rate_percent, monthly_payment } => {
            println!("  Standard ({} yrs @ {}%): {}/mo", term_years, rate_percent, format_major(monthly_payment));
        }
        MortgagePreview::FixedThenFollowOn {
            fixed_years,
            fixed_rate_percent,
            fixed_payment,
            balance_after_fixed,
            remaining_term_years,
            follow_on_rate_percent,
            follow_on_payment,
        } => {
            println!("  Fixed ({} yrs @ {}%): {}/mo", fixed_years, fixed_rate_percent, format_major(fixed_payment));
            println!("  Balance after fixed period: {}", format_major(balance_after_fixed));
            if let Some(payment) = follow_on_payment {
                println!(
                    "  Follow-on ({} yrs @ {}%): {}/mo",
                    remaining_term_years, follow_on_rate_percent, format_major(payment)
                );
            }
        }
    }
    println!("  Total paid: {}  Total interest: {}", format_major(summary.total_paid), format_major(summary.total_interest));

    if args.schedule {
        println!("\n{:>5} {:>7} {:>14} {:>10} {:>10} {:>10} {:>14}",
            "Month", "Rate", "Opening", "Payment", "Interest", "Principal", "Closing");
        println!("{}", "-".repeat(76));
        for row in &rows {
            println!("{:>5} {:>7.3} {:>14.2} {:>10.2} {:>10.2} {:>10.2} {:>14.2}",
                row.month, row.rate_percent, row.opening_balance, row.payment,
                row.interest, row.principal_repaid, row.closing_balance);
        }
    }

    Ok(())
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let (projection, accounts) = args.input.load()?;

    let mut excluded: HashSet<AccountId> = vesting_account_ids(&accounts);
    excluded.extend(args.exclude.iter().copied());

    let decomposition = decompose(&projection.data_points, &excluded)?;
    let simple_return = simple_annualized_return(
        decomposition.start_balance,
        decomposition.end_balance,
        decomposition.years,
    );

    if args.json {
        let output = serde_json::json!({
            "decomposition": decomposition,
            "simple_annualized_return_percent": simple_return,
            "flow_totals": aggregate_flows(&projection.data_points),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !decomposition.inputs_finite() {
        eprintln!("Warning: projection contains non-finite values; figures below are unreliable");
    } else if !decomposition.is_finite() {
        eprintln!(
            "Warning: investment losses exceed the average capital; no compound annual return over {} years",
            decomposition.years
        );
    }

    println!("Projection: {} months ({} years)", projection.months(), decomposition.years);
    println!("  Current net worth:     {:>14}", format_major(decomposition.start_balance));
    println!("  Projected net worth:   {:>14}", format_major(decomposition.end_balance));
    println!("  Net contributions:     {:>14}", format_major(decomposition.active_contribution));
    println!("  Investment growth:     {:>14}", format_major(decomposition.passive_growth));
    println!("  Annual return (est.):  {:>13.2}%", decomposition.annualized_return_percent);
    println!("  Unadjusted growth:     {:>13.2}%", simple_return);

    if !excluded.is_empty() {
        let mut ids: Vec<_> = excluded.into_iter().collect();
        ids.sort_unstable();
        println!("  (excluding accounts {:?})", ids);
    }

    Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
    let (projection, accounts) = args.input.load()?;
    let (balances, transactions) = export_reports(&projection, &accounts, &args.balances, &args.transactions)?;

    println!("Balances ({} rows) written to: {}", balances, args.balances.display());
    println!("Transactions ({} rows) written to: {}", transactions, args.transactions.display());
    Ok(())
}

fn run_milestones(args: MilestoneArgs) -> Result<()> {
    let (projection, accounts) = args.input.load()?;

    let milestones = detect_milestones(&accounts, &projection.data_points);
    if milestones.is_empty() {
        println!("No milestones reached.");
    }
    for milestone in &milestones {
        println!("{}  {}", milestone.date, milestone.label);
    }

    Ok(())
}
