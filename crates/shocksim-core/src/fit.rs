//! Single-predictor ordinary least squares.
//!
//! Used once at startup when the dashboard is configured to recover the shock
//! coefficient from the training columns instead of the published constant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One `(Shock_Index_Pct, Kcal_Deviation_Target)` training pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub shock_index_pct: f64,
    pub deviation_target: f64,
}

impl TrainingRow {
    #[must_use]
    pub const fn new(shock_index_pct: f64, deviation_target: f64) -> Self {
        Self {
            shock_index_pct,
            deviation_target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("need at least 2 training rows, got {rows}")]
    InsufficientData { rows: usize },

    #[error("shock index has zero variance across {rows} training rows")]
    DegeneratePredictor { rows: usize },

    #[error("training row {index} contains a non-finite value")]
    NonFinite { index: usize },
}

/// Fitted `deviation = slope * shock + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// In-sample root mean squared residual.
    pub rmse: f64,
    pub observations: usize,
}

impl LinearFit {
    #[must_use]
    pub fn predict(&self, shock_index_pct: f64) -> f64 {
        self.slope * shock_index_pct + self.intercept
    }
}

/// Fit slope, intercept and RMSE.
pub fn fit_linear(rows: &[TrainingRow]) -> Result<LinearFit, FitError> {
    let count = rows.len();
    if count < 2 {
        return Err(FitError::InsufficientData { rows: count });
    }
    if let Some(index) = rows
        .iter()
        .position(|row| !row.shock_index_pct.is_finite() || !row.deviation_target.is_finite())
    {
        return Err(FitError::NonFinite { index });
    }

    let n = count as f64;
    let x_mean = rows.iter().map(|row| row.shock_index_pct).sum::<f64>() / n;
    let y_mean = rows.iter().map(|row| row.deviation_target).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for row in rows {
        let dx = row.shock_index_pct - x_mean;
        numerator += dx * (row.deviation_target - y_mean);
        denominator += dx * dx;
    }

    if denominator <= f64::EPSILON {
        return Err(FitError::DegeneratePredictor { rows: count });
    }

    let slope = numerator / denominator;
    let intercept = y_mean - slope * x_mean;

    let ss_res: f64 = rows
        .iter()
        .map(|row| {
            let residual = row.deviation_target - (slope * row.shock_index_pct + intercept);
            residual * residual
        })
        .sum();
    let rmse = (ss_res / n).sqrt();

    tracing::debug!(
        message = "fit.linear",
        observations = count,
        slope,
        intercept,
        rmse
    );

    Ok(LinearFit {
        slope,
        intercept,
        rmse,
        observations: count,
    })
}

/// Fit and keep only the shock coefficient (the slope).
pub fn fit_coefficient(rows: &[TrainingRow]) -> Result<f64, FitError> {
    fit_linear(rows).map(|fit| fit.slope)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(points: &[(f64, f64)]) -> Vec<TrainingRow> {
        points
            .iter()
            .map(|&(x, y)| TrainingRow::new(x, y))
            .collect()
    }

    #[test]
    fn recovers_exact_line() {
        let data = rows(&[(-10.0, 1.5), (-5.0, 1.0), (0.0, 0.5), (5.0, 0.0), (10.0, -0.5)]);
        let fit = fit_linear(&data).unwrap();
        assert!((fit.slope + 0.1).abs() < 1e-12);
        assert!((fit.intercept - 0.5).abs() < 1e-12);
        assert!(fit.rmse < 1e-12);
        assert_eq!(fit.observations, 5);
        assert!((fit.predict(20.0) + 1.5).abs() < 1e-12);
    }

    #[test]
    fn noisy_data_has_positive_rmse() {
        let data = rows(&[(-2.0, 0.4), (-1.0, -0.1), (0.0, 0.2), (1.0, -0.4), (2.0, -0.1)]);
        let fit = fit_linear(&data).unwrap();
        assert!(fit.slope < 0.0);
        assert!(fit.rmse > 0.0);
    }

    #[test]
    fn coefficient_is_the_slope() {
        let data = rows(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
        assert!((fit_coefficient(&data).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_too_few_rows() {
        assert_eq!(
            fit_linear(&rows(&[(1.0, 1.0)])),
            Err(FitError::InsufficientData { rows: 1 })
        );
        assert_eq!(
            fit_linear(&[]),
            Err(FitError::InsufficientData { rows: 0 })
        );
    }

    #[test]
    fn rejects_constant_predictor() {
        let data = rows(&[(3.0, 1.0), (3.0, 2.0), (3.0, 0.0)]);
        assert_eq!(
            fit_linear(&data),
            Err(FitError::DegeneratePredictor { rows: 3 })
        );
    }

    #[test]
    fn rejects_non_finite_rows() {
        let data = rows(&[(1.0, 1.0), (f64::NAN, 2.0), (3.0, 0.0)]);
        assert_eq!(fit_linear(&data), Err(FitError::NonFinite { index: 1 }));
    }
}
