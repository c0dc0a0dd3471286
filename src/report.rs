//! Comparison table and cash flow chart data for presentation
//!
//! The table is transposed: one row per indicator, one column per property.
//! The chart holds one net cash flow line per property plus the zero line.

use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::io::Write;

use crate::projection::{IndicatorSet, Payback};
use crate::scenario::PropertyOutcome;

/// Indicator rows in display order
pub const INDICATOR_LABELS: [&str; 8] = [
    "ROI (%)",
    "IRR (%)",
    "NPV",
    "Payback (years)",
    "Cap Rate (%)",
    "Price Installment",
    "SAC Initial Installment",
    "SAC Final Installment",
];

/// Text shown for a property whose simulation failed
pub const UNDEFINED: &str = "undefined";

fn indicator_cells(ind: &IndicatorSet) -> [String; 8] {
    let payback = match ind.payback {
        Payback::RecoveredAt(year) => year.to_string(),
        Payback::NotRecovered => "not recovered".to_string(),
    };
    [
        format!("{:.2}", ind.roi_pct),
        ind.irr_pct.map_or_else(|_| UNDEFINED.to_string(), |irr| format!("{:.2}", irr)),
        format!("{:.2}", ind.npv),
        payback,
        format!("{:.2}", ind.cap_rate_pct),
        format!("{:.2}", ind.price_installment),
        format!("{:.2}", ind.sac_initial_installment),
        format!("{:.2}", ind.sac_final_installment),
    ]
}

/// Indicators of every property, one column per property
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonTable {
    pub properties: Vec<String>,
    /// `rows[i][j]` is indicator `i` for property `j`
    pub rows: Vec<(String, Vec<String>)>,
    /// Why a property has undefined cells, `None` when every cell is defined
    pub errors: Vec<Option<String>>,
}

impl ComparisonTable {
    pub fn from_outcomes(outcomes: &[PropertyOutcome]) -> Self {
        let columns: Vec<[String; 8]> = outcomes
            .iter()
            .map(|o| match &o.result {
                Ok(sim) => indicator_cells(&sim.indicators),
                Err(_) => std::array::from_fn(|_| UNDEFINED.to_string()),
            })
            .collect();

        let rows = INDICATOR_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let cells = columns.iter().map(|c| c[i].clone()).collect();
                (label.to_string(), cells)
            })
            .collect();

        Self {
            properties: outcomes.iter().map(|o| o.name.clone()).collect(),
            rows,
            errors: outcomes
                .iter()
                .map(|o| match &o.result {
                    Ok(sim) => sim.indicators.irr_pct.err().map(|e| e.to_string()),
                    Err(e) => Some(e.to_string()),
                })
                .collect(),
        }
    }
}

impl fmt::Display for ComparisonTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = INDICATOR_LABELS.iter().map(|l| l.len()).max().unwrap_or(0);
        let widths: Vec<usize> = self
            .properties
            .iter()
            .enumerate()
            .map(|(j, name)| {
                self.rows
                    .iter()
                    .map(|(_, cells)| cells[j].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:<label_width$}", "")?;
        for (name, w) in self.properties.iter().zip(&widths) {
            write!(f, "  {:>w$}", name, w = *w)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(label_width + widths.iter().map(|w| w + 2).sum::<usize>()))?;

        for (label, cells) in &self.rows {
            write!(f, "{:<label_width$}", label)?;
            for (cell, w) in cells.iter().zip(&widths) {
                write!(f, "  {:>w$}", cell, w = *w)?;
            }
            writeln!(f)?;
        }

        for (name, error) in self.properties.iter().zip(&self.errors) {
            if let Some(e) = error {
                writeln!(f, "{}: {}", name, e)?;
            }
        }

        Ok(())
    }
}

/// One property's line on the cash flow chart
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub name: String,
    /// (year, net cash flow) points
    pub points: Vec<(u32, f64)>,
}

/// Net cash flow lines for all successfully simulated properties
#[derive(Debug, Clone, Serialize)]
pub struct CashFlowChart {
    pub series: Vec<ChartSeries>,
    /// Level of the horizontal reference line
    pub reference_line: f64,
}

impl CashFlowChart {
    pub fn from_outcomes(outcomes: &[PropertyOutcome]) -> Self {
        let series = outcomes
            .iter()
            .filter_map(|o| {
                let sim = o.simulation()?;
                Some(ChartSeries {
                    name: o.name.clone(),
                    points: sim.cash_flows.years().iter().map(|y| (y.year, y.net_cash_flow)).collect(),
                })
            })
            .collect();

        Self {
            series,
            reference_line: 0.0,
        }
    }

    /// Longest horizon across series
    pub fn max_year(&self) -> u32 {
        self.series
            .iter()
            .filter_map(|s| s.points.last().map(|(year, _)| *year))
            .max()
            .unwrap_or(0)
    }

    /// Write the chart as CSV: `year,<property>...,zero`
    ///
    /// Properties with shorter horizons leave their cells empty past their last year.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), Box<dyn Error>> {
        let mut csv = csv::Writer::from_writer(writer);

        let mut header = vec!["year".to_string()];
        header.extend(self.series.iter().map(|s| s.name.clone()));
        header.push("zero".to_string());
        csv.write_record(&header)?;

        for year in 1..=self.max_year() {
            let mut record = vec![year.to_string()];
            for s in &self.series {
                let cell = s
                    .points
                    .get(year as usize - 1)
                    .map(|(_, cf)| format!("{:.2}", cf))
                    .unwrap_or_default();
                record.push(cell);
            }
            record.push(format!("{:.2}", self.reference_line));
            csv.write_record(&record)?;
        }

        csv.flush()?;
        Ok(())
    }
}
