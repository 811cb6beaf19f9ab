#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod logging;
pub mod report;

pub use cli::run_from_env;
pub use context::DashboardContext;
pub use error::{Result, ShockSimError};
