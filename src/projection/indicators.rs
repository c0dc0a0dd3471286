//! Investment indicators derived from a cash flow projection

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// When the initial outlay is recovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "year", rename_all = "snake_case")]
pub enum Payback {
    /// Cumulative cash first turns positive in this year (1-based)
    RecoveredAt(u32),
    /// Cumulative cash never turns positive within the horizon
    NotRecovered,
}

impl Payback {
    pub fn year(&self) -> Option<u32> {
        match self {
            Payback::RecoveredAt(year) => Some(*year),
            Payback::NotRecovered => None,
        }
    }

    /// Single-number form where an unrecovered outlay reports the horizon
    /// itself (ambiguous with recovery in the final year)
    pub fn years_or_horizon(&self, term_years: u32) -> u32 {
        self.year().unwrap_or(term_years)
    }
}

/// Complete set of indicators for one property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// Total surplus over the horizon relative to the down payment, in percent
    pub roi_pct: f64,

    /// Internal rate of return of the equity cash flows, in percent
    ///
    /// Undefined when the series has no unique root; the other indicators
    /// stay valid in that case.
    pub irr_pct: Result<f64, DomainError>,

    /// Net present value at the discount rate
    pub npv: f64,

    pub payback: Payback,

    /// Unlevered first-year rent yield, in percent
    pub cap_rate_pct: f64,

    /// Level monthly installment (Price method)
    pub price_installment: f64,

    /// First monthly installment (SAC method)
    pub sac_initial_installment: f64,

    /// Last monthly installment (SAC method)
    pub sac_final_installment: f64,

    pub down_payment: f64,
    pub financed_amount: f64,
}

/// Smallest year at which the cumulative balance, starting from
/// `-initial_outlay`, becomes strictly positive
pub fn payback_period(initial_outlay: f64, net_cash_flows: &[f64]) -> Payback {
    let mut balance = -initial_outlay;

    for (index, cf) in net_cash_flows.iter().enumerate() {
        balance += cf;
        if balance > 0.0 {
            return Payback::RecoveredAt(index as u32 + 1);
        }
    }

    Payback::NotRecovered
}

/// Return on the down payment: `(total_net_cash_flow - down_payment) / down_payment`, in percent
pub fn roi_pct(down_payment: f64, total_net_cash_flow: f64) -> Result<f64, DomainError> {
    if down_payment == 0.0 {
        return Err(DomainError::ZeroEquity);
    }
    Ok((total_net_cash_flow - down_payment) / down_payment * 100.0)
}

/// Annual gross rent over purchase price, in percent
pub fn cap_rate_pct(monthly_rent: f64, price: f64) -> f64 {
    monthly_rent * 12.0 / price * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_payback_smallest_year() {
        // -100, -50, +60 (=-90), +100 (=10), +100
        let payback = payback_period(100.0, &[-50.0, 60.0, 100.0, 100.0]);
        assert_eq!(payback, Payback::RecoveredAt(3));
    }

    #[test]
    fn test_payback_requires_strictly_positive_balance() {
        // Balance reaches exactly zero in year 2, positive only in year 3
        let payback = payback_period(100.0, &[50.0, 50.0, 1.0]);
        assert_eq!(payback, Payback::RecoveredAt(3));
    }

    #[test]
    fn test_payback_not_recovered() {
        let payback = payback_period(100.0, &[10.0, 10.0, 10.0]);
        assert_eq!(payback, Payback::NotRecovered);
        assert_eq!(payback.year(), None);
        assert_eq!(payback.years_or_horizon(3), 3);
    }

    #[test]
    fn test_payback_in_final_year_is_distinct_from_not_recovered() {
        let recovered = payback_period(100.0, &[10.0, 10.0, 100.0]);
        assert_eq!(recovered, Payback::RecoveredAt(3));
        assert_ne!(recovered, Payback::NotRecovered);
        assert_eq!(recovered.years_or_horizon(3), 3);
    }

    #[test]
    fn test_roi() {
        assert_relative_eq!(roi_pct(100.0, 150.0).unwrap(), 50.0);
        assert_relative_eq!(roi_pct(100.0, 40.0).unwrap(), -60.0);
    }

    #[test]
    fn test_roi_zero_equity() {
        assert_eq!(roi_pct(0.0, 150.0), Err(DomainError::ZeroEquity));
    }

    #[test]
    fn test_cap_rate() {
        assert_relative_eq!(cap_rate_pct(1500.0, 300_000.0), 6.0, epsilon = 1e-12);
    }
}
