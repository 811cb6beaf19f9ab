#![forbid(unsafe_code)]

//! Computational core of the food supply shock dashboard.
//!
//! Everything in this crate is pure: no file access, no terminal, no global
//! state. The application crate loads the CSV, builds a [`ModelParams`] once
//! at startup and then calls [`compute_impact`] on every slider change.
//!
//! # Example
//!
//! ```
//! use shocksim_core::{ModelParams, ShockInput, Sign};
//!
//! let params = ModelParams::published();
//! let impact = params.impact(ShockInput::new(-10.0));
//! assert_eq!(impact.sign, Sign::Positive);
//! assert_eq!(shocksim_core::format::signed_2(impact.deviation), "+0.99");
//! ```

pub mod fit;
pub mod format;
pub mod impact;
pub mod params;
pub mod scenario;
pub mod series;

pub use fit::{FitError, LinearFit, TrainingRow, fit_coefficient, fit_linear};
pub use impact::{CoefficientSign, Impact, Narrative, Sign, Tone, compute_impact, narrative_for};
pub use params::{ModelParams, ParamCard, ParamSource};
pub use scenario::ShockInput;
pub use series::{ForecastSeries, Observation, SeriesKind};
