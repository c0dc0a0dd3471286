//! Property Simulator CLI
//!
//! Simulates one property from command-line flags, or a list of properties
//! from a CSV file, and prints the indicator comparison.
//!
//! Usage:
//! ```text
//! property-simulator --price 300000 --down-payment 20 --rent 1500
//! property-simulator --input properties.csv --cashflows cashflows.csv
//! property-simulator --input properties.csv --json
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use property_simulator::projection::financing::{schedule, AmortizationMethod, AmortizationRow};
use property_simulator::property::load_properties;
use property_simulator::report::{CashFlowChart, ComparisonTable};
use property_simulator::{ComparisonRunner, Property, PropertyAssumptions};
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Real-estate investment simulator")]
struct Args {
    /// CSV file with one property per row (overrides the single-property flags)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Purchase price
    #[arg(long, default_value_t = 300_000.0)]
    price: f64,

    /// Down payment (% of price)
    #[arg(long, default_value_t = 20.0)]
    down_payment: f64,

    /// Nominal annual interest rate (%)
    #[arg(long, default_value_t = 8.0)]
    interest: f64,

    /// Monthly rent
    #[arg(long, default_value_t = 1_500.0)]
    rent: f64,

    /// Financing term (years)
    #[arg(long, default_value_t = 20)]
    term: u32,

    /// Vacancy rate (%)
    #[arg(long, default_value_t = 5.0)]
    vacancy: f64,

    /// Annual rent appreciation (%)
    #[arg(long, default_value_t = 5.0)]
    appreciation: f64,

    /// Discount rate for NPV (%)
    #[arg(long, default_value_t = 10.0)]
    discount: f64,

    /// Print the comparison as JSON
    #[arg(long)]
    json: bool,

    /// Write the yearly cash flow chart series to this CSV file
    #[arg(long)]
    cashflows: Option<PathBuf>,

    /// Print the monthly amortization schedule of the first property
    #[arg(long, value_enum)]
    schedule: Option<ScheduleKind>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScheduleKind {
    Price,
    Sac,
}

impl From<ScheduleKind> for AmortizationMethod {
    fn from(kind: ScheduleKind) -> Self {
        match kind {
            ScheduleKind::Price => AmortizationMethod::Price,
            ScheduleKind::Sac => AmortizationMethod::Sac,
        }
    }
}

impl Args {
    fn single_property(&self) -> Property {
        Property::new(
            "Property 1",
            PropertyAssumptions {
                price: self.price,
                down_payment_pct: self.down_payment,
                annual_interest_rate_pct: self.interest,
                monthly_rent: self.rent,
                term_years: self.term,
                vacancy_pct: self.vacancy,
                appreciation_pct: self.appreciation,
                discount_rate_pct: self.discount,
            },
        )
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    table: &'a ComparisonTable,
    chart: &'a CashFlowChart,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<&'a [AmortizationRow]>,
}

/// Monthly schedule of the first property
fn first_schedule(properties: &[Property], kind: ScheduleKind) -> Result<(String, Vec<AmortizationRow>)> {
    let first = properties.first().ok_or_else(|| anyhow!("No properties to amortize"))?;
    let a = &first.assumptions;
    a.validate()?;

    let rows = schedule(kind.into(), a.financed_amount(), a.monthly_rate(), a.num_months())?;
    Ok((first.name.clone(), rows))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let properties = match &args.input {
        Some(path) => load_properties(path)
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("Failed to load properties from {}", path.display()))?,
        None => vec![args.single_property()],
    };

    let runner = ComparisonRunner::new();
    let outcomes = runner.run_all(&properties);

    let table = ComparisonTable::from_outcomes(&outcomes);
    let chart = CashFlowChart::from_outcomes(&outcomes);
    let amortization = args.schedule.map(|kind| first_schedule(&properties, kind)).transpose()?;

    if let Some(path) = &args.cashflows {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        chart.write_csv(file).map_err(|e| anyhow!("{}", e))?;
        // stdout is reserved for the report itself
        eprintln!("Cash flows written to: {}", path.display());
    }

    if args.json {
        let report = JsonReport {
            table: &table,
            chart: &chart,
            schedule: amortization.as_ref().map(|(_, rows)| rows.as_slice()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Property Comparison");
    println!("===================\n");
    print!("{}", table);

    if let (Some(kind), Some((name, rows))) = (args.schedule, &amortization) {
        println!("\nAmortization schedule ({:?}) for {}:", kind, name);
        println!("{:>5} {:>14} {:>14} {:>14} {:>14}", "Month", "Installment", "Interest", "Principal", "Balance");
        println!("{}", "-".repeat(65));
        for row in rows {
            println!("{:>5} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
                row.month, row.installment, row.interest, row.principal, row.balance);
        }
    }

    Ok(())
}
