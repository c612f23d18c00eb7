//! Loan repayment calculator.
//!
//! ```bash
//! loan_repayment --principal 100000 --rate 6 --years 30 --frequency monthly
//! loan_repayment -p 50000 -r 5 -y 10 -f annual --first-payment 2025-01-01 --format csv
//! ```

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use loan_repayment::input::{parse_amount, parse_frequency, parse_rate, parse_years};
use loan_repayment::report::{self, LoanSummary};
use loan_repayment::{Frequency, LoanTerms};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::io::{self, BufWriter, Write};

/// Periodic payment and amortization schedule of a fixed-rate loan
#[derive(Parser, Debug)]
#[command(name = "loan_repayment", version, about, long_about = None)]
struct Cli {
    /// Loan amount
    #[arg(short, long, value_parser = parse_amount, allow_hyphen_values = true)]
    principal: f64,

    /// Annual interest rate in percent (6 means 6%)
    #[arg(short, long, value_parser = parse_rate, allow_hyphen_values = true)]
    rate: f64,

    /// Repayment time in years
    #[arg(short, long, value_parser = parse_years, allow_hyphen_values = true)]
    years: i32,

    /// Compounding frequency: annual, semi-annual, quarterly or monthly
    #[arg(short, long, value_parser = parse_frequency, default_value = "monthly")]
    frequency: Frequency,

    /// Date of the first payment (YYYY-MM-DD); adds a date column
    #[arg(long)]
    first_payment: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Summary and aligned columns
    Table,
    /// Schedule only, comma separated
    Csv,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(log_level(cli.verbose))
        .env()
        .init()?;

    let terms = LoanTerms::with_frequency(cli.principal, cli.rate, cli.years, cli.frequency)?;
    info!(
        "loan of {} at {}% over {} years, {} payments",
        terms.principal(),
        terms.annual_rate(),
        terms.term_years(),
        cli.frequency
    );

    let summary = LoanSummary::new(&terms)?;
    let sched = terms.amortization_schedule()?;
    let dates = cli
        .first_payment
        .map(|first| report::payment_dates(first, cli.frequency, sched.len()))
        .transpose()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match cli.format {
        OutputFormat::Table => report::write_table(&mut out, &summary, &sched, dates.as_deref())?,
        OutputFormat::Csv => report::write_csv(&mut out, &sched, dates.as_deref())?,
    }
    out.flush()?;
    Ok(())
}
