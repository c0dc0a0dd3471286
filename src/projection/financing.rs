//! Loan amortization under the Price (level installment) and SAC
//! (constant amortization) methods

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Amortization method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmortizationMethod {
    /// Level total installment, interest share declining over time
    Price,
    /// Level principal share, total installment declining over time
    Sac,
}

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Month number, starting at 1
    pub month: u32,
    pub installment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Outstanding balance after this installment
    pub balance: f64,
}

/// Level monthly installment that repays `principal` over `n_months` at
/// `monthly_rate` (ordinary annuity, payments at end of month)
pub fn price_installment(principal: f64, monthly_rate: f64, n_months: u32) -> Result<f64, InvalidInput> {
    if n_months == 0 {
        return Err(InvalidInput::ZeroMonths);
    }

    if monthly_rate == 0.0 {
        return Ok(principal / n_months as f64);
    }

    let exponent = i32::try_from(n_months).map_err(|_| InvalidInput::TooManyMonths(n_months))?;
    let discount = (1.0 + monthly_rate).powi(-exponent);
    Ok(principal * monthly_rate / (1.0 - discount))
}

/// SAC installment for a 0-based month index: constant principal share plus
/// interest on the balance outstanding before the payment
pub fn sac_installment(principal: f64, monthly_rate: f64, n_months: u32, index: u32) -> Result<f64, InvalidInput> {
    if n_months == 0 {
        return Err(InvalidInput::ZeroMonths);
    }

    let amortization = principal / n_months as f64;
    let balance = principal - index as f64 * amortization;
    Ok(amortization + balance * monthly_rate)
}

/// Full monthly schedule for the given method
pub fn schedule(
    method: AmortizationMethod,
    principal: f64,
    monthly_rate: f64,
    n_months: u32,
) -> Result<Vec<AmortizationRow>, InvalidInput> {
    let level = match method {
        AmortizationMethod::Price => price_installment(principal, monthly_rate, n_months)?,
        AmortizationMethod::Sac => sac_installment(principal, monthly_rate, n_months, 0)?,
    };
    let constant_principal = principal / n_months as f64;

    let mut rows = Vec::with_capacity(n_months as usize);
    let mut balance = principal;

    for month in 1..=n_months {
        let interest = balance * monthly_rate;
        let (installment, amortized) = match method {
            AmortizationMethod::Price => (level, level - interest),
            AmortizationMethod::Sac => (constant_principal + interest, constant_principal),
        };
        balance -= amortized;

        // Clear residual rounding on the final month
        if month == n_months {
            balance = 0.0;
        }

        rows.push(AmortizationRow {
            month,
            installment,
            interest,
            principal: amortized,
            balance,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_price_installment_reference_loan() {
        // 240k over 20 years at 8% nominal annual
        let pmt = price_installment(240_000.0, 0.08 / 12.0, 240).unwrap();
        assert_relative_eq!(pmt, 2007.456165584319, epsilon = 1e-6);
    }

    #[test]
    fn test_price_installment_zero_rate() {
        let pmt = price_installment(240_000.0, 0.0, 240).unwrap();
        assert_eq!(pmt, 240_000.0 / 240.0);
    }

    #[test]
    fn test_zero_months_rejected() {
        assert_eq!(price_installment(1000.0, 0.01, 0), Err(InvalidInput::ZeroMonths));
        assert_eq!(sac_installment(1000.0, 0.01, 0, 0), Err(InvalidInput::ZeroMonths));
    }

    #[test]
    fn test_month_count_beyond_exponent_range_rejected() {
        assert_eq!(
            price_installment(1000.0, 0.01, 3_000_000_000),
            Err(InvalidInput::TooManyMonths(3_000_000_000))
        );
        // The zero-rate branch needs no exponent
        assert!(price_installment(1000.0, 0.0, 3_000_000_000).is_ok());
    }

    #[test]
    fn test_sac_first_and_last() {
        let rate = 0.08 / 12.0;
        let first = sac_installment(240_000.0, rate, 240, 0).unwrap();
        let last = sac_installment(240_000.0, rate, 240, 239).unwrap();

        assert_relative_eq!(first, 1000.0 + 240_000.0 * rate, epsilon = 1e-9);
        assert_relative_eq!(last, 1000.0 + 1000.0 * rate, epsilon = 1e-9);
        assert!(first > last);
    }

    #[test]
    fn test_sac_schedule_is_decreasing() {
        let rows = schedule(AmortizationMethod::Sac, 120_000.0, 0.01, 60).unwrap();
        assert_eq!(rows.len(), 60);
        assert!(rows.windows(2).all(|w| w[0].installment > w[1].installment));
        assert!(rows.iter().all(|r| (r.principal - 2000.0).abs() < 1e-9));
    }

    #[test]
    fn test_price_schedule_repays_loan() {
        let rows = schedule(AmortizationMethod::Price, 240_000.0, 0.08 / 12.0, 240).unwrap();
        let repaid: f64 = rows.iter().map(|r| r.principal).sum();

        assert_relative_eq!(repaid, 240_000.0, epsilon = 1e-4);
        assert_eq!(rows.last().unwrap().balance, 0.0);

        // Interest share declines while the installment stays level
        assert!(rows[0].interest > rows[239].interest);
        assert_relative_eq!(rows[0].installment, rows[239].installment);
    }

    #[test]
    fn test_schedule_matches_installment_helpers() {
        let rate = 0.005;
        let rows = schedule(AmortizationMethod::Sac, 50_000.0, rate, 36).unwrap();
        for (i, row) in rows.iter().enumerate() {
            let expected = sac_installment(50_000.0, rate, 36, i as u32).unwrap();
            assert_relative_eq!(row.installment, expected, epsilon = 1e-9);
        }
    }
}
