//! Startup context handed to the presentation layer.

use shocksim_core::{ForecastSeries, ModelParams, ShockInput};

use crate::config::{CoefficientMode, Settings};
use crate::data::{LoadedData, load_csv};
use crate::error::Result;

/// Loaded series and resolved model parameters. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    series: ForecastSeries,
    params: ModelParams,
    initial_shock: ShockInput,
}

impl DashboardContext {
    /// Read the CSV and resolve the coefficient according to `settings`.
    pub fn load(settings: &Settings) -> Result<Self> {
        let _span = tracing::info_span!(
            "context.load",
            profile = %settings.profile,
            coefficient = %settings.coefficient
        )
        .entered();

        let require_training = settings.coefficient == CoefficientMode::Refit;
        let data = load_csv(&settings.data_path, require_training)?;
        Self::from_data(data, settings.coefficient, settings.initial_shock)
    }

    /// Build from already parsed data.
    pub fn from_data(
        data: LoadedData,
        coefficient: CoefficientMode,
        initial_shock: ShockInput,
    ) -> Result<Self> {
        let params = match coefficient {
            CoefficientMode::Published => ModelParams::published(),
            CoefficientMode::Refit => ModelParams::refit(&data.training)?,
        };
        tracing::info!(
            message = "context.params",
            mode = %coefficient,
            shock_coefficient = params.shock_coefficient(),
            rmse = params.rmse()
        );
        Ok(Self::new(data.series, params, initial_shock))
    }

    #[must_use]
    pub fn new(series: ForecastSeries, params: ModelParams, initial_shock: ShockInput) -> Self {
        Self {
            series,
            params,
            initial_shock,
        }
    }

    #[must_use]
    pub fn series(&self) -> &ForecastSeries {
        &self.series
    }

    #[must_use]
    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    #[must_use]
    pub fn initial_shock(&self) -> ShockInput {
        self.initial_shock
    }
}
