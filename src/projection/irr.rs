//! Net Present Value (NPV) and Internal Rate of Return (IRR)
//!
//! Cash flow index 0 is time zero and is not discounted; index `t` is
//! discounted by `(1 + rate)^t`.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Solver settings for the IRR search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrConfig {
    /// Starting periodic rate for Newton-Raphson
    pub initial_guess: f64,

    /// Convergence tolerance on the rate step (and bracket half-width)
    pub tolerance: f64,

    /// Iteration cap for each of Newton-Raphson and bisection
    pub max_iterations: u32,

    /// Lowest periodic rate searched (must stay above -1)
    ///
    /// A series whose only root lies below this bound (e.g. a large outlay
    /// followed by negligible inflows) is reported as `IrrOutsideBracket`.
    pub lower_bound: f64,

    /// Highest periodic rate searched
    pub upper_bound: f64,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.05,
            tolerance: 1e-10,
            max_iterations: 1000,
            lower_bound: -0.99,
            upper_bound: 10.0,
        }
    }
}

/// Relative NPV residual accepted at a Newton fixed point
const RESIDUAL_TOLERANCE: f64 = 1e-8;

/// Calculate NPV of `cashflows` at periodic `rate`
///
/// Returns `InvalidDiscountRate` when `1 + rate <= 0`, where discounting is undefined.
pub fn npv(rate: f64, cashflows: &[f64]) -> Result<f64, DomainError> {
    if !rate.is_finite() || 1.0 + rate <= 0.0 {
        return Err(DomainError::InvalidDiscountRate(rate * 100.0));
    }
    Ok(npv_at_rate(cashflows, rate))
}

/// Calculate the Internal Rate of Return (IRR) for a series of cash flows
/// using the Newton-Raphson method, falling back to bisection.
///
/// # Arguments
/// * `cashflows` - Cash flows (positive = inflow, negative = outflow), index 0 at time zero
/// * `config` - Solver settings
///
/// # Returns
/// Periodic IRR as a decimal (e.g., 0.05 for 5%). A series whose root is not
/// unique or cannot be found is an error, never a guess.
pub fn calculate_irr(cashflows: &[f64], config: &IrrConfig) -> Result<f64, DomainError> {
    match sign_changes(cashflows) {
        0 => return Err(DomainError::IrrNoSignChange),
        1 => {}
        n => return Err(DomainError::IrrMultipleSignChanges(n)),
    }

    let scale = cashflows.iter().fold(0.0_f64, |acc, cf| acc.max(cf.abs()));
    let mut rate = config.initial_guess;

    for _ in 0..config.max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 || !dnpv.is_finite() {
            // Derivative too small, try bisection instead
            break;
        }

        let new_rate = (rate - npv / dnpv).clamp(config.lower_bound, config.upper_bound);

        if (new_rate - rate).abs() < config.tolerance {
            // A step that stalls against a bound is not a root
            if npv_at_rate(cashflows, new_rate).abs() <= RESIDUAL_TOLERANCE * scale {
                return Ok(new_rate);
            }
            break;
        }

        rate = new_rate;
    }

    log::debug!("Newton-Raphson did not settle on an IRR, falling back to bisection");
    calculate_irr_bisection(cashflows, config)
}

/// Number of sign changes in the series, ignoring zero entries
fn sign_changes(cashflows: &[f64]) -> usize {
    let signs: Vec<bool> = cashflows
        .iter()
        .filter(|cf| cf.abs() > 1e-10)
        .map(|&cf| cf > 0.0)
        .collect();

    signs.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / ((1.0 + rate).powi(t as i32 + 1));
        }
    }

    (npv, dnpv)
}

/// Fallback IRR calculation using bisection method
fn calculate_irr_bisection(cashflows: &[f64], config: &IrrConfig) -> Result<f64, DomainError> {
    let mut low = config.lower_bound;
    let mut high = config.upper_bound;

    let mut npv_low = npv_at_rate(cashflows, low);
    let npv_high = npv_at_rate(cashflows, high);

    // A single sign change guarantees one root; no bracket means it lies outside
    if npv_low * npv_high > 0.0 {
        return Err(DomainError::IrrOutsideBracket { lower: low, upper: high });
    }

    for _ in 0..config.max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid == 0.0 || (high - low) / 2.0 < config.tolerance {
            return Ok(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    Err(DomainError::IrrNotConverged)
}

/// Calculate NPV at a given periodic rate
fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_irr() {
        // Invest 1000, receive 1100 after one period
        let irr = calculate_irr(&[-1000.0, 1100.0], &IrrConfig::default()).unwrap();
        assert_relative_eq!(irr, 0.10, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_irr_is_valid() {
        // Get back less than invested: negative but well-defined
        let irr = calculate_irr(&[-1000.0, 400.0, 400.0], &IrrConfig::default()).unwrap();
        assert!(irr < 0.0);
        assert!(npv(irr, &[-1000.0, 400.0, 400.0]).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_no_sign_change() {
        let result = calculate_irr(&[-1000.0, -10.0, -10.0], &IrrConfig::default());
        assert_eq!(result, Err(DomainError::IrrNoSignChange));
    }

    #[test]
    fn test_multiple_sign_changes() {
        let result = calculate_irr(&[-100.0, 230.0, -132.0], &IrrConfig::default());
        assert_eq!(result, Err(DomainError::IrrMultipleSignChanges(2)));
    }

    #[test]
    fn test_zero_entries_do_not_count_as_sign_changes() {
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1100.0);

        let irr = calculate_irr(&cashflows, &IrrConfig::default()).unwrap();
        assert_relative_eq!((1.0 + irr).powi(12), 1.10, epsilon = 1e-8);
    }

    #[test]
    fn test_bisection_fallback_agrees_with_newton() {
        let cashflows = [-60_000.0, 5_000.0, 15_000.0, 25_000.0, 30_000.0];
        let config = IrrConfig::default();

        let newton = calculate_irr(&cashflows, &config).unwrap();
        let bisection = calculate_irr_bisection(&cashflows, &config).unwrap();
        assert_relative_eq!(newton, bisection, epsilon = 1e-8);
    }

    #[test]
    fn test_iteration_cap_reports_failure() {
        let config = IrrConfig { max_iterations: 1, ..Default::default() };
        let result = calculate_irr(&[-60_000.0, 5_000.0, 15_000.0, 25_000.0, 30_000.0], &config);
        assert_eq!(result, Err(DomainError::IrrNotConverged));
    }

    #[test]
    fn test_root_below_search_range() {
        // Recovers 11.4 of a 300k outlay: IRR is about -99.996%
        let result = calculate_irr(&[-300_000.0, 11.4], &IrrConfig::default());
        assert_eq!(result, Err(DomainError::IrrOutsideBracket { lower: -0.99, upper: 10.0 }));

        let wide = IrrConfig { lower_bound: -0.99999, ..Default::default() };
        let irr = calculate_irr(&[-300_000.0, 11.4], &wide).unwrap();
        assert_relative_eq!(irr, 11.4 / 300_000.0 - 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_npv_time_zero_undiscounted() {
        let value = npv(0.10, &[-100.0, 110.0]).unwrap();
        assert_relative_eq!(value, 0.0, epsilon = 1e-12);

        let value = npv(0.0, &[-100.0, 30.0, 30.0]).unwrap();
        assert_relative_eq!(value, -40.0, epsilon = 1e-12);
    }

    #[test]
    fn test_npv_rejects_rate_at_minus_one() {
        assert_eq!(npv(-1.0, &[-100.0, 110.0]), Err(DomainError::InvalidDiscountRate(-100.0)));
        assert!(npv(-1.5, &[-100.0, 110.0]).is_err());
    }
}
