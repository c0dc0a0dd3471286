//! Indicator engine: assumptions in, cash flow projection and indicators out

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, SimulationError};
use crate::property::PropertyAssumptions;
use super::cashflows::{CashFlowSeries, CashFlowYear};
use super::financing::{price_installment, sac_installment};
use super::indicators::{cap_rate_pct, payback_period, roi_pct, IndicatorSet};
use super::irr::{calculate_irr, npv, IrrConfig};

/// Configuration for the indicator engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// IRR solver settings
    pub irr: IrrConfig,
}

/// Result of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub indicators: IndicatorSet,
    pub cash_flows: CashFlowSeries,
}

/// Stateless indicator engine
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: EngineConfig,
}

impl IndicatorEngine {
    /// Create a new engine with the given config
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the projection and compute every indicator for one property.
    ///
    /// Invalid input, a zero down payment and an undefined discount rate fail
    /// the whole run. An undefined IRR is carried in `irr_pct` alone.
    pub fn compute(&self, assumptions: &PropertyAssumptions) -> Result<Simulation, SimulationError> {
        assumptions.validate()?;

        let down_payment = assumptions.down_payment();
        let financed = assumptions.financed_amount();
        let monthly_rate = assumptions.monthly_rate();
        let num_months = assumptions.num_months();

        // Financing
        let installment = price_installment(financed, monthly_rate, num_months)?;
        let sac_initial = sac_installment(financed, monthly_rate, num_months, 0)?;
        let sac_final = sac_installment(financed, monthly_rate, num_months, num_months.saturating_sub(1))?;

        // Yearly projection; the loan spans the whole horizon
        let annual_expense = installment * 12.0;
        let mut cash_flows = CashFlowSeries::with_capacity(assumptions.term_years);
        for year in 1..=assumptions.term_years {
            cash_flows.push(CashFlowYear::new(year, assumptions.rental_income(year), annual_expense));
        }

        let roi = roi_pct(down_payment, cash_flows.total())?;

        let discount_rate = assumptions.discount_rate_pct / 100.0;
        if 1.0 + discount_rate <= 0.0 {
            return Err(DomainError::InvalidDiscountRate(assumptions.discount_rate_pct).into());
        }

        let series = cash_flows.with_initial_outlay(down_payment);
        let irr = calculate_irr(&series, &self.config.irr);
        if let Err(e) = &irr {
            log::debug!("IRR undefined: {}", e);
        }
        let npv = npv(discount_rate, &series)?;
        let payback = payback_period(down_payment, &cash_flows.net_cash_flows());

        let indicators = IndicatorSet {
            roi_pct: roi,
            irr_pct: irr.map(|rate| rate * 100.0),
            npv,
            payback,
            cap_rate_pct: cap_rate_pct(assumptions.monthly_rent, assumptions.price),
            price_installment: installment,
            sac_initial_installment: sac_initial,
            sac_final_installment: sac_final,
            down_payment,
            financed_amount: financed,
        };

        log::debug!(
            "Computed indicators over {} years: ROI={:.2}% IRR={:?} NPV={:.2} payback={:?}",
            assumptions.term_years, indicators.roi_pct, indicators.irr_pct, indicators.npv, indicators.payback,
        );

        Ok(Simulation { indicators, cash_flows })
    }
}

/// Compute indicators with the default engine configuration
pub fn compute(assumptions: &PropertyAssumptions) -> Result<Simulation, SimulationError> {
    IndicatorEngine::default().compute(assumptions)
}
