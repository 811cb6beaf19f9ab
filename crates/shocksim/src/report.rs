//! Headless output for the `impact` and `params` subcommands.

use std::io::Write;

use serde::Serialize;
use shocksim_core::{
    Impact, ModelParams, ParamCard, ParamSource, ShockInput, Sign, Tone, format,
};

use crate::context::DashboardContext;
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct ImpactReport {
    pub shock_pct: f64,
    pub coefficient: f64,
    pub deviation: f64,
    pub sign: Sign,
    pub tone: Tone,
    pub headline: String,
    pub message: &'static str,
    pub source: ParamSource,
}

impl ImpactReport {
    #[must_use]
    pub fn new(params: &ModelParams, shock: ShockInput) -> Self {
        let impact: Impact = params.impact(shock);
        Self {
            shock_pct: impact.shock_pct,
            coefficient: impact.coefficient,
            deviation: impact.deviation,
            sign: impact.sign,
            tone: impact.narrative.tone,
            headline: impact.headline(),
            message: impact.message(),
            source: params.source(),
        }
    }

    pub fn write_text(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "Shock: {}", format::percent_1(self.shock_pct))?;
        writeln!(
            out,
            "Calculated Utilization Deviation: {}",
            format::signed_2(self.deviation)
        )?;
        writeln!(out, "{}", self.headline)?;
        writeln!(out, "{}", self.message)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamsReport {
    pub baseline: [ParamCard; 2],
    pub regression: [ParamCard; 3],
    pub shock_coefficient: f64,
    pub rmse: f64,
    pub source: ParamSource,
    pub interpretation: String,
}

impl ParamsReport {
    #[must_use]
    pub fn new(context: &DashboardContext) -> Self {
        let params = context.params();
        Self {
            baseline: ModelParams::baseline_cards(context.series().baseline_mean()),
            regression: params.impact_cards(),
            shock_coefficient: params.shock_coefficient(),
            rmse: params.rmse(),
            source: params.source(),
            interpretation: params.interpretation(),
        }
    }

    pub fn write_text(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "Module 1: ARIMA Baseline")?;
        for card in &self.baseline {
            writeln!(out, "  {}: {}", card.title, card.value)?;
        }
        writeln!(out, "Module 2: Impact Regression")?;
        for card in &self.regression {
            writeln!(out, "  {}: {}", card.title, card.value)?;
        }
        match self.source {
            ParamSource::Published => writeln!(out, "  Source: published")?,
            ParamSource::Refit {
                intercept,
                observations,
            } => writeln!(
                out,
                "  Source: refit (n={observations}, intercept={})",
                format::signed_4(intercept)
            )?,
        }
        writeln!(out, "Interpretation: {}", self.interpretation)?;
        Ok(())
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize>(value: &T, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use shocksim_core::{ForecastSeries, Observation};

    use super::*;

    fn context() -> DashboardContext {
        DashboardContext::new(
            ForecastSeries::new(vec![
                Observation {
                    year: 2020,
                    supply_target: Some(2400.0),
                    baseline_forecast: Some(2450.0),
                    total_forecast: Some(2451.0),
                },
                Observation {
                    year: 2021,
                    supply_target: None,
                    baseline_forecast: Some(2460.0),
                    total_forecast: None,
                },
            ]),
            ModelParams::published(),
            ShockInput::default(),
        )
    }

    #[test]
    fn impact_text_for_negative_shock() {
        let report = ImpactReport::new(&ModelParams::published(), ShockInput::new(-10.0));
        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Shock: -10.0%\n"));
        assert!(text.contains("Calculated Utilization Deviation: +0.99"));
        assert!(text.contains(
            "Predicted Utilization Effect: +0.99 kcal/capita/day (Higher than Baseline)"
        ));
        assert!(text.contains("resilient response"));
    }

    #[test]
    fn impact_json_fields() {
        let report = ImpactReport::new(&ModelParams::published(), ShockInput::new(0.0));
        let mut out = Vec::new();
        write_json(&report, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["sign"], "zero");
        assert_eq!(value["tone"], "warning");
        assert_eq!(value["message"], "No predicted deviation from the baseline.");
        assert_eq!(value["source"]["kind"], "published");
    }

    #[test]
    fn params_text_lists_both_modules() {
        let mut out = Vec::new();
        ParamsReport::new(&context()).write_text(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  Model Used: ARIMA(1, 0, 0)"));
        assert!(text.contains("  Baseline Trend: 2455.00 kcal/cap/day (Avg.)"));
        assert!(text.contains("  Shock Coefficient (B): -0.0987 kcal per 1% shock"));
        assert!(text.contains("  Source: published"));
    }

    #[test]
    fn params_json_carries_cards() {
        let mut out = Vec::new();
        write_json(&ParamsReport::new(&context()), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["regression"][0]["value"], "Linear Regression");
        assert_eq!(value["rmse"], 0.69);
    }
}
