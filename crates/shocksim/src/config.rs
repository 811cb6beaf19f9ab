//! Layered settings: built-in profile, optional profile file, CLI overrides.
//!
//! Profiles are `key=value` fragments (comments with `#`, optional double
//! quotes). Recognised keys: `data_path`, `coefficient`, `initial_shock`,
//! `log_filter`, `log_file`. Unknown keys are ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use shocksim_core::ShockInput;

use crate::error::{Result, ShockSimError};

pub const DEFAULT_PROFILE: &str = "published";

/// How the shock coefficient is obtained at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoefficientMode {
    /// Use the published constants.
    #[default]
    Published,
    /// Refit a one-feature OLS from the training columns.
    Refit,
}

impl CoefficientMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Refit => "refit",
        }
    }
}

impl fmt::Display for CoefficientMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoefficientMode {
    type Err = ShockSimError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "published" | "fixed" => Ok(Self::Published),
            "refit" => Ok(Self::Refit),
            other => Err(ShockSimError::invalid(format!(
                "coefficient must be 'published' or 'refit', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub name: String,
    pub values: BTreeMap<String, String>,
}

impl Profile {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|raw| raw.trim().parse::<f64>().ok())
    }

    /// Overlay `other` on top of this profile.
    pub fn merge(&mut self, other: Profile) {
        self.values.extend(other.values);
    }
}

const PUBLISHED: &str = include_str!("../profiles/published.env");
const REFIT: &str = include_str!("../profiles/refit.env");

const BUILTIN_PROFILES: [(&str, &str); 2] = [("published", PUBLISHED), ("refit", REFIT)];

#[must_use]
pub fn list_profile_names() -> Vec<String> {
    BUILTIN_PROFILES
        .iter()
        .map(|(name, _)| (*name).to_string())
        .collect()
}

pub fn load_profile(name: &str) -> Result<Profile> {
    let (_, content) = BUILTIN_PROFILES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .ok_or_else(|| ShockSimError::ProfileNotFound {
            name: name.to_string(),
        })?;

    Ok(Profile {
        name: name.to_string(),
        values: parse_profile_content(content),
    })
}

pub fn load_profile_file(path: &Path) -> Result<Profile> {
    let content = fs::read_to_string(path)?;
    Ok(Profile {
        name: path.display().to_string(),
        values: parse_profile_content(&content),
    })
}

#[must_use]
pub fn parse_profile_content(content: &str) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value_raw)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim().to_string();
        let mut value = value_raw.trim().to_string();

        if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
            value = value[1..value.len() - 1].to_string();
        }

        values.insert(key, value);
    }

    values
}

/// Per-invocation overrides, usually from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_path: Option<PathBuf>,
    pub refit: bool,
    pub initial_shock: Option<f64>,
    pub log_filter: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved, immutable settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub profile: String,
    pub data_path: PathBuf,
    pub coefficient: CoefficientMode,
    pub initial_shock: ShockInput,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_profile(profile: &Profile) -> Result<Self> {
        let data_path = profile
            .get("data_path")
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| ShockSimError::invalid("profile does not set data_path"))?;

        let coefficient = profile
            .get("coefficient")
            .map(str::parse::<CoefficientMode>)
            .transpose()?
            .unwrap_or_default();

        let initial_shock = match profile.get("initial_shock") {
            Some(raw) => parse_shock(raw)?,
            None => ShockInput::default(),
        };

        Ok(Self {
            profile: profile.name.clone(),
            data_path,
            coefficient,
            initial_shock,
            log_filter: profile.get("log_filter").unwrap_or("info").to_string(),
            log_file: profile
                .get("log_file")
                .filter(|raw| !raw.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn apply(&mut self, overrides: &Overrides) -> Result<()> {
        if let Some(path) = &overrides.data_path {
            self.data_path.clone_from(path);
        }
        if overrides.refit {
            self.coefficient = CoefficientMode::Refit;
        }
        if let Some(shock) = overrides.initial_shock {
            self.initial_shock = checked_shock(shock)?;
        }
        if let Some(filter) = &overrides.log_filter {
            self.log_filter.clone_from(filter);
        }
        if let Some(path) = &overrides.log_file {
            self.log_file = Some(path.clone());
        }
        Ok(())
    }
}

/// Parse a shock percentage and require it to lie on the slider domain.
pub fn parse_shock(raw: &str) -> Result<ShockInput> {
    let value = raw
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|_| ShockSimError::invalid(format!("shock '{raw}' is not a number")))?;
    checked_shock(value)
}

fn checked_shock(value: f64) -> Result<ShockInput> {
    ShockInput::checked(value).ok_or_else(|| {
        ShockSimError::invalid(format!(
            "shock {value} is outside [{}, {}]",
            ShockInput::MIN,
            ShockInput::MAX
        ))
    })
}

/// Built-in profile, then the optional file, then overrides.
pub fn resolve(
    profile_name: &str,
    config_file: Option<&Path>,
    overrides: &Overrides,
) -> Result<Settings> {
    let mut profile = load_profile(profile_name)?;
    if let Some(path) = config_file {
        profile.merge(load_profile_file(path)?);
    }
    let mut settings = Settings::from_profile(&profile)?;
    settings.apply(overrides)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use crate::error::ShockSimError;

    use super::{
        CoefficientMode, Overrides, Profile, Settings, list_profile_names, load_profile,
        parse_profile_content, parse_shock, resolve,
    };

    #[test]
    fn parse_env_fragment() {
        let parsed = parse_profile_content(
            r#"
                # comment
                data_path=data/kcal.csv
                log_filter="shocksim=debug"
                not a pair
            "#,
        );

        assert_eq!(parsed.get("data_path"), Some(&"data/kcal.csv".to_string()));
        assert_eq!(parsed.get("log_filter"), Some(&"shocksim=debug".to_string()));
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn builtins_listed() {
        let names = list_profile_names();
        assert_eq!(names, vec!["published".to_string(), "refit".to_string()]);
    }

    #[test]
    fn builtin_profiles_resolve_to_settings() {
        let published = Settings::from_profile(&load_profile("published").unwrap()).unwrap();
        assert_eq!(published.coefficient, CoefficientMode::Published);
        assert_eq!(published.initial_shock.value(), -10.0);
        assert_eq!(
            published.data_path,
            PathBuf::from("processed_national_food_security_data_updated.csv")
        );

        let refit = Settings::from_profile(&load_profile("refit").unwrap()).unwrap();
        assert_eq!(refit.coefficient, CoefficientMode::Refit);
    }

    #[test]
    fn unknown_profile_is_reported() {
        match load_profile("nope").expect_err("unknown profile should fail") {
            ShockSimError::ProfileNotFound { name } => assert_eq!(name, "nope"),
            other => panic!("expected ProfileNotFound, got {other}"),
        }
    }

    #[test]
    fn coefficient_mode_parsing() {
        assert_eq!("Refit".parse::<CoefficientMode>().unwrap(), CoefficientMode::Refit);
        assert_eq!("fixed".parse::<CoefficientMode>().unwrap(), CoefficientMode::Published);
        assert!("arima".parse::<CoefficientMode>().is_err());
    }

    #[test]
    fn shock_parsing_accepts_percent_suffix_and_rejects_out_of_range() {
        assert_eq!(parse_shock("-7.5%").unwrap().value(), -7.5);
        assert!(matches!(
            parse_shock("25"),
            Err(ShockSimError::InvalidArgument { .. })
        ));
        assert!(parse_shock("lots").is_err());
    }

    #[test]
    fn missing_data_path_is_invalid() {
        let profile = Profile {
            name: "empty".to_string(),
            values: parse_profile_content("coefficient=refit"),
        };
        assert!(matches!(
            Settings::from_profile(&profile),
            Err(ShockSimError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn file_then_overrides_take_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data_path=from_file.csv").unwrap();
        writeln!(file, "initial_shock=4.5").unwrap();
        writeln!(file, "log_file=/tmp/shocksim.log").unwrap();

        let overrides = Overrides {
            refit: true,
            log_filter: Some("debug".to_string()),
            ..Overrides::default()
        };
        let settings = resolve("published", Some(file.path()), &overrides).unwrap();
        assert_eq!(settings.data_path, PathBuf::from("from_file.csv"));
        assert_eq!(settings.initial_shock.value(), 4.5);
        assert_eq!(settings.coefficient, CoefficientMode::Refit);
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/shocksim.log")));

        let overrides = Overrides {
            data_path: Some(PathBuf::from("cli.csv")),
            initial_shock: Some(0.0),
            ..Overrides::default()
        };
        let settings = resolve("published", Some(file.path()), &overrides).unwrap();
        assert_eq!(settings.data_path, PathBuf::from("cli.csv"));
        assert_eq!(settings.initial_shock.value(), 0.0);
    }
}
