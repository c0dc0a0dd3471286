//! Comparison runner for several properties
//!
//! Runs the indicator engine once per property. Each run is independent, so
//! the batch fans out across threads and one failing property never hides
//! the results of the others.

use rayon::prelude::*;

use crate::error::SimulationError;
use crate::property::{Property, PropertyAssumptions};
use crate::projection::{EngineConfig, IndicatorEngine, Simulation};

/// Outcome of simulating one named property
#[derive(Debug, Clone)]
pub struct PropertyOutcome {
    pub name: String,
    pub assumptions: PropertyAssumptions,
    pub result: Result<Simulation, SimulationError>,
}

impl PropertyOutcome {
    pub fn simulation(&self) -> Option<&Simulation> {
        self.result.as_ref().ok()
    }
}

/// Runner that evaluates any number of properties with a shared engine config
///
/// # Example
/// ```
/// use property_simulator::{ComparisonRunner, Property, PropertyAssumptions};
///
/// let runner = ComparisonRunner::new();
/// let outcomes = runner.run_all(&[
///     Property::new("A", PropertyAssumptions::default()),
///     Property::new("B", PropertyAssumptions { monthly_rent: 2_000.0, ..Default::default() }),
/// ]);
/// assert_eq!(outcomes.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComparisonRunner {
    engine: IndicatorEngine,
}

impl ComparisonRunner {
    /// Create runner with the default engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a custom engine configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: IndicatorEngine::new(config),
        }
    }

    /// Run a single property
    pub fn run(&self, assumptions: &PropertyAssumptions) -> Result<Simulation, SimulationError> {
        self.engine.compute(assumptions)
    }

    /// Run every property in parallel, preserving input order
    pub fn run_all(&self, properties: &[Property]) -> Vec<PropertyOutcome> {
        log::info!("Simulating {} properties", properties.len());

        properties
            .par_iter()
            .map(|property| {
                let result = self.engine.compute(&property.assumptions);
                if let Err(e) = &result {
                    log::warn!("Property '{}' could not be simulated: {}", property.name, e);
                }
                PropertyOutcome {
                    name: property.name.clone(),
                    assumptions: property.assumptions,
                    result,
                }
            })
            .collect()
    }

    /// Run variations of one property (e.g. a range of interest rates)
    pub fn run_scenarios(&self, scenarios: &[PropertyAssumptions]) -> Vec<Result<Simulation, SimulationError>> {
        scenarios.iter().map(|a| self.engine.compute(a)).collect()
    }

    /// Get reference to the underlying engine
    pub fn engine(&self) -> &IndicatorEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    #[test]
    fn test_run_all_preserves_order_and_isolates_failures() {
        let runner = ComparisonRunner::new();
        let properties = vec![
            Property::new("Imóvel 1", PropertyAssumptions::default()),
            Property::new("No equity", PropertyAssumptions { down_payment_pct: 0.0, ..Default::default() }),
            Property::new("Imóvel 2", PropertyAssumptions { monthly_rent: 2_500.0, ..Default::default() }),
        ];

        let outcomes = runner.run_all(&properties);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].name, "Imóvel 1");
        assert_eq!(outcomes[2].name, "Imóvel 2");

        assert!(outcomes[0].simulation().is_some());
        assert_eq!(
            outcomes[1].result.as_ref().unwrap_err(),
            &SimulationError::Domain(DomainError::ZeroEquity)
        );

        // Higher rent on the same financing gives a higher IRR
        let irr_1 = outcomes[0].simulation().unwrap().indicators.irr_pct.unwrap();
        let irr_2 = outcomes[2].simulation().unwrap().indicators.irr_pct.unwrap();
        assert!(irr_2 > irr_1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let runner = ComparisonRunner::new();
        let scenarios: Vec<_> = [6.0, 7.0, 8.0, 9.0]
            .iter()
            .map(|&rate| PropertyAssumptions { annual_interest_rate_pct: rate, ..Default::default() })
            .collect();
        let properties: Vec<_> = scenarios
            .iter()
            .enumerate()
            .map(|(i, a)| Property::new(format!("rate {}", i), *a))
            .collect();

        let sequential = runner.run_scenarios(&scenarios);
        let parallel = runner.run_all(&properties);

        for (seq, par) in sequential.iter().zip(&parallel) {
            assert_eq!(seq, &par.result);
        }

        // Cheaper financing means a lower level installment
        let installments: Vec<f64> = sequential
            .iter()
            .map(|r| r.as_ref().unwrap().indicators.price_installment)
            .collect();
        assert!(installments.windows(2).all(|w| w[0] < w[1]));
    }
}
