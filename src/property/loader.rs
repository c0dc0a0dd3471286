//! Load properties from a CSV file
//!
//! Expected headers:
//! `name,price,down_payment_pct,annual_interest_rate_pct,monthly_rent,term_years,vacancy_pct,appreciation_pct,discount_rate_pct`

use super::{Property, PropertyAssumptions};
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    price: f64,
    down_payment_pct: f64,
    annual_interest_rate_pct: f64,
    monthly_rent: f64,
    term_years: u32,
    vacancy_pct: f64,
    appreciation_pct: f64,
    discount_rate_pct: f64,
}

impl CsvRow {
    fn into_property(self) -> Property {
        Property::new(
            self.name,
            PropertyAssumptions {
                price: self.price,
                down_payment_pct: self.down_payment_pct,
                annual_interest_rate_pct: self.annual_interest_rate_pct,
                monthly_rent: self.monthly_rent,
                term_years: self.term_years,
                vacancy_pct: self.vacancy_pct,
                appreciation_pct: self.appreciation_pct,
                discount_rate_pct: self.discount_rate_pct,
            },
        )
    }
}

/// Load all properties from a CSV file
///
/// Rows are not validated here; the engine rejects invalid assumptions per
/// property so one bad row does not hide the others.
pub fn load_properties<P: AsRef<Path>>(path: P) -> Result<Vec<Property>, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    read_rows(reader)
}

/// Load properties from any reader (e.g., string buffer, stdin)
pub fn load_properties_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Property>, Box<dyn Error>> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Property>, Box<dyn Error>> {
    let mut properties = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        properties.push(row.into_property());
    }

    log::debug!("Loaded {} properties", properties.len());
    Ok(properties)
}
