//! Property Simulator - real-estate investment indicators
//!
//! This library provides:
//! - Yearly cash flow projection for a financed rental property
//! - ROI, IRR, NPV, payback period and cap rate
//! - Price (level installment) and SAC (constant amortization) loan schedules
//! - Side-by-side comparison of several properties

pub mod error;
pub mod property;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{DomainError, InvalidInput, SimulationError};
pub use property::{Property, PropertyAssumptions};
pub use projection::{compute, CashFlowSeries, IndicatorEngine, IndicatorSet, Payback, Simulation};
pub use scenario::ComparisonRunner;
