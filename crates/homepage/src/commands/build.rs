//! Site build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use homepage_static::{BuildConfig, BuildReport, StaticBuilder};
use serde::Deserialize;

/// Configuration file structure (homepage.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    build: BuildSettings,
}

#[derive(Debug, Deserialize)]
struct BuildSettings {
    #[serde(default = "default_data")]
    data: String,
    #[serde(default = "default_templates")]
    templates: String,
    #[serde(default = "default_output")]
    output: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            data: default_data(),
            templates: default_templates(),
            output: default_output(),
        }
    }
}

fn default_data() -> String {
    "data.json".to_string()
}
fn default_templates() -> String {
    "templates".to_string()
}
fn default_output() -> String {
    ".output".to_string()
}

/// Load configuration from the config file if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(config_path: &Path) -> Result<ConfigFile> {
    if config_path.exists() {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        tracing::info!("Loaded config from {}", config_path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

fn build_config(root: &Path, file_config: ConfigFile, output: Option<PathBuf>) -> BuildConfig {
    BuildConfig {
        data_file: PathBuf::from(file_config.build.data),
        template_dir: PathBuf::from(file_config.build.templates),
        output_dir: output.unwrap_or_else(|| PathBuf::from(file_config.build.output)),
        ..BuildConfig::with_root(root)
    }
}

/// Run the build command.
pub fn run(root: &Path, config: &Path, output: Option<PathBuf>) -> Result<BuildReport> {
    tracing::info!("Building site...");

    let file_config = load_config(&root.join(config))?;
    let config = build_config(root, file_config, output);

    let report = StaticBuilder::new(config).build()?;

    tracing::info!(
        "Built {}/{} pages in {}ms",
        report.pages_written(),
        report.pages.len(),
        report.duration_ms
    );

    for page in report.failed_pages() {
        tracing::warn!("Skipped: {}", page.output);
    }

    tracing::info!("Output: {}", report.output_dir.display());

    Ok(report)
}
