//! CSV loading for the processed national food security table.
//!
//! Expected header (extra columns are ignored):
//!
//! ```text
//! year,Kcal_Supply_Target,Kcal_Baseline_Forecast,Kcal_Total_Forecast[,Shock_Index_Pct,Kcal_Deviation_Target]
//! ```
//!
//! `year` may be a plain year or a date such as `2015-01-01`. Empty numeric
//! cells are read as missing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use shocksim_core::{ForecastSeries, Observation, SeriesKind, TrainingRow};

use crate::error::{Result, ShockSimError};

pub const YEAR_COLUMN: &str = "year";
pub const SHOCK_INDEX_COLUMN: &str = "Shock_Index_Pct";
pub const DEVIATION_TARGET_COLUMN: &str = "Kcal_Deviation_Target";

#[derive(Debug, Deserialize)]
struct Record {
    year: String,
    #[serde(rename = "Kcal_Supply_Target")]
    supply_target: Option<f64>,
    #[serde(rename = "Kcal_Baseline_Forecast")]
    baseline_forecast: Option<f64>,
    #[serde(rename = "Kcal_Total_Forecast")]
    total_forecast: Option<f64>,
    #[serde(rename = "Shock_Index_Pct", default)]
    shock_index_pct: Option<f64>,
    #[serde(rename = "Kcal_Deviation_Target", default)]
    deviation_target: Option<f64>,
}

/// Everything read from the input file.
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub series: ForecastSeries,
    /// Rows where both training cells are present.
    pub training: Vec<TrainingRow>,
}

/// Load the table from disk. A missing file is reported as
/// [`ShockSimError::MissingInput`].
pub fn load_csv(path: &Path, require_training: bool) -> Result<LoadedData> {
    if !path.is_file() {
        return Err(ShockSimError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    let data = read_csv(file, path, require_training)?;
    tracing::info!(
        message = "data.loaded",
        path = %path.display(),
        rows = data.series.len(),
        training_rows = data.training.len()
    );
    Ok(data)
}

/// Parse the table from any reader. `origin` is only used in error messages.
pub fn read_csv<R: Read>(reader: R, origin: &Path, require_training: bool) -> Result<LoadedData> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let mut required = vec![YEAR_COLUMN];
    required.extend(SeriesKind::ALL.iter().map(|kind| kind.column()));
    if require_training {
        required.extend([SHOCK_INDEX_COLUMN, DEVIATION_TARGET_COLUMN]);
    }
    if let Some(column) = required
        .into_iter()
        .find(|column| !headers.iter().any(|header| header == *column))
    {
        return Err(ShockSimError::MissingColumn {
            path: origin.to_path_buf(),
            column: column.to_string(),
        });
    }

    let mut observations = Vec::new();
    let mut training = Vec::new();
    for (index, record) in csv.deserialize::<Record>().enumerate() {
        let record = record?;
        let row = index + 1;
        observations.push(Observation {
            year: parse_year(&record.year).ok_or_else(|| ShockSimError::InvalidYear {
                row,
                value: record.year.clone(),
            })?,
            supply_target: record.supply_target,
            baseline_forecast: record.baseline_forecast,
            total_forecast: record.total_forecast,
        });
        if let (Some(shock), Some(deviation)) = (record.shock_index_pct, record.deviation_target)
        {
            training.push(TrainingRow::new(shock, deviation));
        }
    }

    tracing::debug!(
        message = "data.parsed",
        rows = observations.len(),
        training_rows = training.len()
    );

    Ok(LoadedData {
        series: ForecastSeries::new(observations),
        training,
    })
}

/// `2015`, `2015-01-01` or `2015-01-01 00:00:00`.
#[must_use]
pub fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.year());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|stamp| stamp.year())
}
