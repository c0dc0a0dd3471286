//! Property assumption records

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Assumptions for a single simulated property
///
/// All percentages are expressed on a 0-100 scale (e.g. `8.0` for 8%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyAssumptions {
    /// Purchase price
    pub price: f64,

    /// Share of the price paid upfront, in percent
    pub down_payment_pct: f64,

    /// Nominal annual interest rate on the financed amount, in percent
    pub annual_interest_rate_pct: f64,

    /// Gross monthly rent before vacancy
    pub monthly_rent: f64,

    /// Financing and holding horizon in years
    pub term_years: u32,

    /// Share of rent lost to vacancy, in percent
    pub vacancy_pct: f64,

    /// Annual rent growth, in percent
    pub appreciation_pct: f64,

    /// Discount rate used for NPV, in percent
    pub discount_rate_pct: f64,
}

impl Default for PropertyAssumptions {
    fn default() -> Self {
        Self {
            price: 300_000.0,
            down_payment_pct: 20.0,
            annual_interest_rate_pct: 8.0,
            monthly_rent: 1_500.0,
            term_years: 20,
            vacancy_pct: 5.0,
            appreciation_pct: 5.0,
            discount_rate_pct: 10.0,
        }
    }
}

impl PropertyAssumptions {
    /// Check every precondition of the engine.
    ///
    /// The discount rate is not checked here: a rate at or below -100% is a
    /// domain problem of the NPV, not a malformed record.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        let fields = [
            ("price", self.price),
            ("down_payment_pct", self.down_payment_pct),
            ("annual_interest_rate_pct", self.annual_interest_rate_pct),
            ("monthly_rent", self.monthly_rent),
            ("vacancy_pct", self.vacancy_pct),
            ("appreciation_pct", self.appreciation_pct),
            ("discount_rate_pct", self.discount_rate_pct),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(InvalidInput::NonFinite(*name));
        }

        if self.price <= 0.0 {
            return Err(InvalidInput::NonPositivePrice(self.price));
        }
        if !(0.0..=100.0).contains(&self.down_payment_pct) {
            return Err(InvalidInput::DownPaymentOutOfRange(self.down_payment_pct));
        }
        if self.annual_interest_rate_pct < 0.0 {
            return Err(InvalidInput::NegativeInterestRate(self.annual_interest_rate_pct));
        }
        if self.monthly_rent <= 0.0 {
            return Err(InvalidInput::NonPositiveRent(self.monthly_rent));
        }
        if self.term_years == 0 {
            return Err(InvalidInput::ZeroTerm);
        }
        let months = self.term_years.checked_mul(12).and_then(|m| i32::try_from(m).ok());
        if months.is_none() {
            return Err(InvalidInput::TermTooLong(self.term_years));
        }
        if !(0.0..=100.0).contains(&self.vacancy_pct) {
            return Err(InvalidInput::VacancyOutOfRange(self.vacancy_pct));
        }

        Ok(())
    }

    /// Amount paid upfront
    pub fn down_payment(&self) -> f64 {
        self.down_payment_pct / 100.0 * self.price
    }

    /// Amount borrowed (price minus down payment)
    pub fn financed_amount(&self) -> f64 {
        self.price - self.down_payment()
    }

    /// Monthly interest rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.annual_interest_rate_pct / 100.0 / 12.0
    }

    /// Number of monthly installments over the term
    ///
    /// Saturates for terms that `validate` rejects as too long.
    pub fn num_months(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }

    /// Rental income for a given year (1-based), net of vacancy and grown
    /// geometrically by the appreciation rate
    pub fn rental_income(&self, year: u32) -> f64 {
        let growth = 1.0 + self.appreciation_pct / 100.0;
        self.monthly_rent * 12.0 * (1.0 - self.vacancy_pct / 100.0) * growth.powf(year.saturating_sub(1) as f64)
    }
}

/// A property under simulation, identified by a display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,

    #[serde(flatten)]
    pub assumptions: PropertyAssumptions,
}

impl Property {
    pub fn new(name: impl Into<String>, assumptions: PropertyAssumptions) -> Self {
        Self {
            name: name.into(),
            assumptions,
        }
    }
}
