use std::path::PathBuf;

use shocksim_core::FitError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShockSimError>;

#[derive(Debug, Error)]
pub enum ShockSimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "the processed data file ('{}') was not found; place it next to the binary or pass --data",
        .path.display()
    )]
    MissingInput { path: PathBuf },

    #[error("{} is missing required column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("invalid year '{value}' on data row {row}")]
    InvalidYear { row: usize, value: String },

    #[error("coefficient refit failed: {0}")]
    Fit(#[from] FitError),

    #[error("profile not found: {name}")]
    ProfileNotFound { name: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl ShockSimError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingInput { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::ShockSimError;

    #[test]
    fn missing_input_has_dedicated_exit_code() {
        let error = ShockSimError::MissingInput {
            path: PathBuf::from("nope.csv"),
        };
        assert_eq!(error.exit_code(), 2);
        assert!(error.to_string().contains("'nope.csv'"));
    }

    #[test]
    fn other_errors_exit_with_one() {
        let error = ShockSimError::invalid("bad shock");
        assert_eq!(error.exit_code(), 1);
        assert_eq!(error.to_string(), "invalid argument: bad shock");
    }
}
