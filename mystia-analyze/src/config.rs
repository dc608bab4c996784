//! Run settings for mystia-analyze
//!
//! Resolves the effective settings of one analysis run from command-line
//! overrides, environment variables and the bootstrap TOML config, in that
//! priority order, falling back to compiled defaults.

use crate::tagging::{DEFAULT_OTHER_WARNING_RATIO, DEFAULT_TIE_MARGIN};
use mystia_common::config::{
    resolve_path_setting, CompiledDefaults, SettingSource, TomlConfig, INPUT_ENV_VAR,
    OUTPUT_DIR_ENV_VAR,
};
use mystia_common::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Values given on the command line (highest priority)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub report_file: Option<String>,
    pub no_charts: bool,
}

/// Effective settings of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSettings {
    pub input: PathBuf,
    pub input_source: SettingSource,
    pub output_dir: PathBuf,
    pub output_source: SettingSource,
    /// File name of the JSON report inside `output_dir`
    pub report_file: String,
    pub other_warning_ratio: f64,
    pub tie_margin: usize,
    pub charts: bool,
}

impl AnalysisSettings {
    /// Settings with compiled defaults for everything but the paths
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let defaults = CompiledDefaults::new();
        Self {
            input: input.into(),
            input_source: SettingSource::CommandLine,
            output_dir: output_dir.into(),
            output_source: SettingSource::CommandLine,
            report_file: defaults.report_file,
            other_warning_ratio: DEFAULT_OTHER_WARNING_RATIO,
            tie_margin: DEFAULT_TIE_MARGIN,
            charts: true,
        }
    }

    /// Resolve every setting through CLI → ENV → TOML → default
    ///
    /// The input file has no default: a run without one is a config error.
    pub fn resolve(cli: &CliOverrides, toml: &TomlConfig) -> Result<Self> {
        let defaults = CompiledDefaults::new();

        let (input, input_source) = resolve_path_setting(
            cli.input.as_deref(),
            INPUT_ENV_VAR,
            toml.input.as_deref(),
            None,
        )
        .ok_or_else(|| {
            Error::Config(format!(
                "No input file configured. Provide one of:\n\
                 1. Command line: --input posts.json\n\
                 2. Environment: {}=posts.json\n\
                 3. TOML config: input = \"posts.json\"",
                INPUT_ENV_VAR
            ))
        })?;

        let (output_dir, output_source) = resolve_path_setting(
            cli.output_dir.as_deref(),
            OUTPUT_DIR_ENV_VAR,
            toml.output_dir.as_deref(),
            Some(defaults.output_dir.as_path()),
        )
        .ok_or_else(|| Error::Internal("output directory default missing".to_string()))?;

        let report_file = cli
            .report_file
            .clone()
            .or_else(|| toml.report_file.clone())
            .unwrap_or(defaults.report_file);
        validate_report_file(&report_file)?;

        let settings = Self {
            input,
            input_source,
            output_dir,
            output_source,
            report_file,
            other_warning_ratio: toml.analysis.other_warning_ratio,
            tie_margin: toml.analysis.tie_margin,
            charts: toml.analysis.charts && !cli.no_charts,
        };

        info!(
            "Input: {} ({:?})",
            settings.input.display(),
            settings.input_source
        );
        info!(
            "Output directory: {} ({:?})",
            settings.output_dir.display(),
            settings.output_source
        );
        Ok(settings)
    }

    /// Full path of the JSON report
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }
}

/// Report file must be a plain, non-empty file name
fn validate_report_file(name: &str) -> Result<()> {
    let path = Path::new(name);
    if name.trim().is_empty() || path.components().count() != 1 || path.file_name().is_none() {
        return Err(Error::Config(format!(
            "report_file must be a plain file name, got {:?}",
            name
        )));
    }
    Ok(())
}
