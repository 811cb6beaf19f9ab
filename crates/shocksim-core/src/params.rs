//! Model parameters shown on the dashboard and used by the impact calculator.

use serde::Serialize;

use crate::fit::{FitError, TrainingRow, fit_linear};
use crate::format;
use crate::impact::{Impact, compute_impact};
use crate::scenario::ShockInput;

/// Published shock coefficient (kcal/capita/day per 1% shock).
pub const PUBLISHED_SHOCK_COEFFICIENT: f64 = -0.0987;
/// Published RMSE of the deviation regression (kcal/capita/day).
pub const PUBLISHED_RMSE: f64 = 0.69;

pub const BASELINE_MODEL: &str = "ARIMA(1, 0, 0)";
pub const IMPACT_MODEL: &str = "Linear Regression";

/// Where the coefficient came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamSource {
    Published,
    Refit { intercept: f64, observations: usize },
}

/// A titled value card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamCard {
    pub title: &'static str,
    pub value: String,
}

impl ParamCard {
    fn new(title: &'static str, value: impl Into<String>) -> Self {
        Self {
            title,
            value: value.into(),
        }
    }
}

/// Shock coefficient and RMSE, resolved once per process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelParams {
    shock_coefficient: f64,
    rmse: f64,
    source: ParamSource,
}

impl ModelParams {
    #[must_use]
    pub const fn published() -> Self {
        Self {
            shock_coefficient: PUBLISHED_SHOCK_COEFFICIENT,
            rmse: PUBLISHED_RMSE,
            source: ParamSource::Published,
        }
    }

    /// Recover the coefficient from training rows.
    pub fn refit(rows: &[TrainingRow]) -> Result<Self, FitError> {
        let fit = fit_linear(rows)?;
        Ok(Self {
            shock_coefficient: fit.slope,
            rmse: fit.rmse,
            source: ParamSource::Refit {
                intercept: fit.intercept,
                observations: fit.observations,
            },
        })
    }

    #[must_use]
    pub const fn shock_coefficient(&self) -> f64 {
        self.shock_coefficient
    }

    #[must_use]
    pub const fn rmse(&self) -> f64 {
        self.rmse
    }

    #[must_use]
    pub const fn source(&self) -> ParamSource {
        self.source
    }

    #[must_use]
    pub fn impact(&self, shock: ShockInput) -> Impact {
        compute_impact(self.shock_coefficient, shock.value())
    }

    /// The three regression cards: model name, coefficient, RMSE.
    #[must_use]
    pub fn impact_cards(&self) -> [ParamCard; 3] {
        [
            ParamCard::new("Model Used", IMPACT_MODEL),
            ParamCard::new(
                "Shock Coefficient (B)",
                format!(
                    "{} kcal per 1% shock",
                    format::signed_4(self.shock_coefficient)
                ),
            ),
            ParamCard::new(
                "Model RMSE (Deviation)",
                format!("{} kcal/cap/day", format::fixed_2(self.rmse)),
            ),
        ]
    }

    /// Baseline model cards. The trend card needs the loaded series.
    #[must_use]
    pub fn baseline_cards(baseline_mean: Option<f64>) -> [ParamCard; 2] {
        let trend = match baseline_mean {
            Some(mean) => format!("{} kcal/cap/day (Avg.)", format::fixed_2(mean)),
            None => "n/a".to_string(),
        };
        [
            ParamCard::new("Model Used", BASELINE_MODEL),
            ParamCard::new("Baseline Trend", trend),
        ]
    }

    /// One-sentence reading of the coefficient.
    #[must_use]
    pub fn interpretation(&self) -> String {
        format!(
            "A +1% increase in the lagged Systemic Supply Shock index is quantified as a {} \
             kcal/capita/day change in utilization.",
            format::signed_4(self.shock_coefficient)
        )
    }
}

impl Default for ModelParams {
    fn default() -> Self {
        Self::published()
    }
}
