//! The precomputed national Kcal supply series.

use serde::Serialize;

/// The three plotted columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SeriesKind {
    SupplyTarget,
    BaselineForecast,
    TotalForecast,
}

impl SeriesKind {
    pub const ALL: [Self; 3] = [
        Self::SupplyTarget,
        Self::BaselineForecast,
        Self::TotalForecast,
    ];

    /// Legend label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SupplyTarget => "Actual Kcal Supply",
            Self::BaselineForecast => "Baseline Forecast (ARIMA)",
            Self::TotalForecast => "Total Forecast (w/ Shock Impact)",
        }
    }

    /// CSV column the series is read from.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::SupplyTarget => "Kcal_Supply_Target",
            Self::BaselineForecast => "Kcal_Baseline_Forecast",
            Self::TotalForecast => "Kcal_Total_Forecast",
        }
    }
}

/// One year of the series. Missing cells are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub year: i32,
    pub supply_target: Option<f64>,
    pub baseline_forecast: Option<f64>,
    pub total_forecast: Option<f64>,
}

impl Observation {
    #[must_use]
    pub const fn value(&self, kind: SeriesKind) -> Option<f64> {
        match kind {
            SeriesKind::SupplyTarget => self.supply_target,
            SeriesKind::BaselineForecast => self.baseline_forecast,
            SeriesKind::TotalForecast => self.total_forecast,
        }
    }
}

/// Year-ordered, read-only collection of observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastSeries {
    rows: Vec<Observation>,
}

impl ForecastSeries {
    /// Sort by year and freeze. Rows sharing a year keep their file order.
    #[must_use]
    pub fn new(mut rows: Vec<Observation>) -> Self {
        rows.sort_by_key(|row| row.year);
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last year.
    #[must_use]
    pub fn year_span(&self) -> Option<(i32, i32)> {
        Some((self.rows.first()?.year, self.rows.last()?.year))
    }

    /// Present, finite `(year, value)` points of one series.
    pub fn points(&self, kind: SeriesKind) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.rows.iter().filter_map(move |row| {
            row.value(kind)
                .filter(|value| value.is_finite())
                .map(|value| (row.year, value))
        })
    }

    /// Min and max over all three series.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        SeriesKind::ALL
            .iter()
            .flat_map(|&kind| self.points(kind).map(|(_, value)| value))
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((lo, hi)) => Some((f64::min(lo, value), f64::max(hi, value))),
            })
    }

    /// Mean of the baseline forecast over the years where it is present.
    #[must_use]
    pub fn baseline_mean(&self) -> Option<f64> {
        let (sum, count) = self
            .points(SeriesKind::BaselineForecast)
            .fold((0.0, 0usize), |(sum, count), (_, value)| (sum + value, count + 1));
        (count > 0).then(|| sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(year: i32, target: Option<f64>, baseline: Option<f64>, total: Option<f64>) -> Observation {
        Observation {
            year,
            supply_target: target,
            baseline_forecast: baseline,
            total_forecast: total,
        }
    }

    fn sample() -> ForecastSeries {
        ForecastSeries::new(vec![
            obs(2019, Some(2480.0), Some(2470.0), Some(2475.0)),
            obs(2017, Some(2440.0), None, None),
            obs(2018, Some(2460.0), Some(2450.0), Some(2455.0)),
        ])
    }

    #[test]
    fn rows_are_sorted_by_year() {
        let years: Vec<i32> = sample().rows().iter().map(|row| row.year).collect();
        assert_eq!(years, vec![2017, 2018, 2019]);
        assert_eq!(sample().year_span(), Some((2017, 2019)));
    }

    #[test]
    fn points_skip_missing_cells() {
        let series = sample();
        let baseline: Vec<(i32, f64)> = series.points(SeriesKind::BaselineForecast).collect();
        assert_eq!(baseline, vec![(2018, 2450.0), (2019, 2470.0)]);
        assert_eq!(series.points(SeriesKind::SupplyTarget).count(), 3);
    }

    #[test]
    fn value_range_covers_all_series() {
        assert_eq!(sample().value_range(), Some((2440.0, 2480.0)));
        assert_eq!(ForecastSeries::default().value_range(), None);
    }

    #[test]
    fn baseline_mean_ignores_missing() {
        assert_eq!(sample().baseline_mean(), Some(2460.0));
        assert_eq!(ForecastSeries::default().baseline_mean(), None);
    }

    #[test]
    fn labels_and_columns_are_distinct() {
        assert_eq!(SeriesKind::TotalForecast.column(), "Kcal_Total_Forecast");
        assert_eq!(SeriesKind::BaselineForecast.label(), "Baseline Forecast (ARIMA)");
    }
}
