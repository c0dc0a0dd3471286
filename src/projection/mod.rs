//! Cash flow projection and indicator engine

mod cashflows;
mod engine;
pub mod financing;
pub mod indicators;
pub mod irr;

pub use cashflows::{CashFlowSeries, CashFlowYear};
pub use engine::{compute, EngineConfig, IndicatorEngine, Simulation};
pub use financing::{AmortizationMethod, AmortizationRow};
pub use indicators::{IndicatorSet, Payback};
pub use irr::IrrConfig;
