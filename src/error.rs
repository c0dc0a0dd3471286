//! Error types for the indicator engine
//!
//! Two families of failure are kept apart so callers can tell them apart:
//! - [`InvalidInput`]: the assumptions violate a precondition and nothing was computed
//! - [`DomainError`]: the assumptions are valid but an indicator is mathematically undefined

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Constraint violation on a set of property assumptions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("price must be positive, got {0}")]
    NonPositivePrice(f64),

    #[error("down payment must be within [0, 100] percent, got {0}")]
    DownPaymentOutOfRange(f64),

    #[error("annual interest rate must not be negative, got {0}")]
    NegativeInterestRate(f64),

    #[error("monthly rent must be positive, got {0}")]
    NonPositiveRent(f64),

    #[error("term must be at least one year")]
    ZeroTerm,

    #[error("vacancy must be within [0, 100] percent, got {0}")]
    VacancyOutOfRange(f64),

    #[error("{0} must be a finite number")]
    NonFinite(&'static str),

    #[error("amortization needs at least one monthly installment")]
    ZeroMonths,

    #[error("term of {0} years is too long to amortize monthly")]
    TermTooLong(u32),

    #[error("{0} monthly installments exceed the supported schedule length")]
    TooManyMonths(u32),
}

/// Mathematically undefined result from otherwise valid assumptions
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize, Deserialize)]
pub enum DomainError {
    /// ROI is relative to the down payment, which is zero
    #[error("ROI is undefined with a zero down payment")]
    ZeroEquity,

    #[error("discount rate of {0}% makes (1 + rate) non-positive")]
    InvalidDiscountRate(f64),

    #[error("IRR is undefined: cash flows never change sign")]
    IrrNoSignChange,

    #[error("IRR is ambiguous: cash flows change sign {0} times")]
    IrrMultipleSignChanges(usize),

    #[error("IRR solver did not converge")]
    IrrNotConverged,

    /// A single root exists but lies outside the searched rate range
    #[error("IRR lies outside the searched range [{lower}, {upper}]")]
    IrrOutsideBracket { lower: f64, upper: f64 },
}

/// Any failure of a simulation run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("undefined result: {0}")]
    Domain(#[from] DomainError),
}

impl SimulationError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, SimulationError::InvalidInput(_))
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, SimulationError::Domain(_))
    }
}
