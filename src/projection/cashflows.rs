//! Yearly cash flow output structures

use serde::{Deserialize, Serialize};

/// A single year of projected cash flow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowYear {
    /// Year after purchase, starting at 1
    pub year: u32,

    /// Rent collected net of vacancy
    pub rental_income: f64,

    /// Loan installments paid during the year
    pub financing_expense: f64,

    /// Income minus expense
    pub net_cash_flow: f64,
}

impl CashFlowYear {
    pub fn new(year: u32, rental_income: f64, financing_expense: f64) -> Self {
        Self {
            year,
            rental_income,
            financing_expense,
            net_cash_flow: rental_income - financing_expense,
        }
    }
}

/// Ordered yearly net cash flows, one entry per year of the term
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSeries {
    years: Vec<CashFlowYear>,
}

impl CashFlowSeries {
    pub fn with_capacity(term_years: u32) -> Self {
        Self {
            years: Vec::with_capacity(term_years as usize),
        }
    }

    /// Append the next year
    pub fn push(&mut self, year: CashFlowYear) {
        debug_assert_eq!(year.year as usize, self.years.len() + 1);
        self.years.push(year);
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn years(&self) -> &[CashFlowYear] {
        &self.years
    }

    /// Net cash flow for a 1-based year
    pub fn get(&self, year: u32) -> Option<f64> {
        let index = (year as usize).checked_sub(1)?;
        self.years.get(index).map(|y| y.net_cash_flow)
    }

    /// Net cash flows in year order
    pub fn net_cash_flows(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.net_cash_flow).collect()
    }

    /// Sum of all net cash flows
    pub fn total(&self) -> f64 {
        self.years.iter().map(|y| y.net_cash_flow).sum()
    }

    /// Full investment series: `-initial_outlay` at time zero followed by
    /// every yearly net cash flow
    pub fn with_initial_outlay(&self, initial_outlay: f64) -> Vec<f64> {
        std::iter::once(-initial_outlay)
            .chain(self.years.iter().map(|y| y.net_cash_flow))
            .collect()
    }
}
