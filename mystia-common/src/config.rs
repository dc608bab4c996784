//! Bootstrap configuration loading and setting resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file at the default location is not an error: the
//! compiled defaults apply. A TOML file named explicitly (command line or
//! `MYSTIA_CONFIG`) must exist and parse.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit TOML config file
pub const CONFIG_ENV_VAR: &str = "MYSTIA_CONFIG";
/// Environment variable naming the input post file
pub const INPUT_ENV_VAR: &str = "MYSTIA_INPUT";
/// Environment variable naming the chart/report output directory
pub const OUTPUT_DIR_ENV_VAR: &str = "MYSTIA_OUTPUT_DIR";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Post file to analyze (JSON array or JSON Lines)
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Directory receiving charts and the JSON report
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// File name of the JSON report inside `output_dir`
    #[serde(default)]
    pub report_file: Option<String>,

    /// Analysis tuning
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tunable analysis thresholds
///
/// Scoring weights, keyword lists and the cluster count are not here:
/// they are fixed constants of the analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Other-tag share above which a data-quality warning is raised
    #[serde(default = "default_other_warning_ratio")]
    pub other_warning_ratio: f64,

    /// Maximum hit difference between the two best scenarios for a
    /// post to count as a multi-scenario match
    #[serde(default = "default_tie_margin")]
    pub tie_margin: usize,

    /// Render the four PNG charts
    #[serde(default = "default_charts")]
    pub charts: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            other_warning_ratio: default_other_warning_ratio(),
            tie_margin: default_tie_margin(),
            charts: default_charts(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_other_warning_ratio() -> f64 {
    0.20
}

fn default_tie_margin() -> usize {
    1
}

fn default_charts() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read TOML failed ({}): {}", path.display(), e))
        })?;
        let config: TomlConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values outside their meaningful range
    pub fn validate(&self) -> Result<()> {
        let ratio = self.analysis.other_warning_ratio;
        if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
            return Err(Error::Config(format!(
                "analysis.other_warning_ratio must be within [0, 1], got {}",
                ratio
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(Error::Config("logging.level must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Compiled defaults used when no higher-priority source provides a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub output_dir: PathBuf,
    pub report_file: String,
}

impl CompiledDefaults {
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("mystia_output"),
            report_file: "analysis_report.json".to_string(),
        }
    }
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a resolved setting came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SettingSource {
    CommandLine,
    Environment,
    TomlFile,
    Default,
}

/// Resolve a path-valued setting through the four-tier priority order
///
/// Returns `None` only when no tier (including the default) provides a value.
pub fn resolve_path_setting(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_value: Option<&Path>,
    default: Option<&Path>,
) -> Option<(PathBuf, SettingSource)> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some((path.to_path_buf(), SettingSource::CommandLine));
    }

    // Priority 2: Environment variable
    if let Ok(value) = std::env::var(env_var_name) {
        if !value.trim().is_empty() {
            return Some((PathBuf::from(value), SettingSource::Environment));
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = toml_value {
        return Some((path.to_path_buf(), SettingSource::TomlFile));
    }

    // Priority 4: Compiled default
    default.map(|path| (path.to_path_buf(), SettingSource::Default))
}

/// Platform config file location: `<config_dir>/mystia/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mystia").join("config.toml"))
}

/// Load the bootstrap TOML config
///
/// An explicitly named file (command line, then `MYSTIA_CONFIG`) must exist.
/// Otherwise the platform location is tried, and a missing file there falls
/// back to defaults.
pub fn load_toml_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    if let Some((path, source)) = resolve_path_setting(cli_arg, CONFIG_ENV_VAR, None, None) {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {} (from {:?})",
                path.display(),
                source
            )));
        }
        info!("Loading config from {} ({:?})", path.display(), source);
        return TomlConfig::load(&path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            info!("Loading config from {}", path.display());
            TomlConfig::load(&path)
        }
        Some(path) => {
            debug!("No config file at {}, using defaults", path.display());
            Ok(TomlConfig::default())
        }
        None => {
            debug!("Could not determine config directory, using defaults");
            Ok(TomlConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_defaults_when_sections_missing() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert!(config.input.is_none());
        assert_eq!(config.analysis.other_warning_ratio, 0.20);
        assert_eq!(config.analysis.tie_margin, 1);
        assert!(config.analysis.charts);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_full_document() {
        let config: TomlConfig = toml::from_str(
            r#"
            input = "posts.json"
            output_dir = "out"
            report_file = "summary.json"

            [analysis]
            other_warning_ratio = 0.3
            tie_margin = 0
            charts = false

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.input, Some(PathBuf::from("posts.json")));
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.report_file.as_deref(), Some("summary.json"));
        assert_eq!(config.analysis.other_warning_ratio, 0.3);
        assert_eq!(config.analysis.tie_margin, 0);
        assert!(!config.analysis.charts);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_validate_rejects_ratio_out_of_range() {
        let mut config = TomlConfig::default();
        config.analysis.other_warning_ratio = 1.5;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.analysis.other_warning_ratio = f64::NAN;
        assert!(config.validate().is_err());

        config.analysis.other_warning_ratio = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_argument_has_highest_priority() {
        let resolved = resolve_path_setting(
            Some(Path::new("cli.json")),
            "MYSTIA_TEST_UNSET_VARIABLE",
            Some(Path::new("toml.json")),
            Some(Path::new("default.json")),
        );
        assert_eq!(
            resolved,
            Some((PathBuf::from("cli.json"), SettingSource::CommandLine))
        );
    }

    #[test]
    fn test_default_used_when_nothing_else_set() {
        let resolved = resolve_path_setting(
            None,
            "MYSTIA_TEST_UNSET_VARIABLE",
            None,
            Some(Path::new("default.json")),
        );
        assert_eq!(
            resolved,
            Some((PathBuf::from("default.json"), SettingSource::Default))
        );

        let none = resolve_path_setting(None, "MYSTIA_TEST_UNSET_VARIABLE", None, None);
        assert!(none.is_none());
    }
}
