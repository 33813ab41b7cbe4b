//! Static site builder.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::assets::{copy_static_assets, default_assets, AssetOutcome, StaticAsset};
use crate::data::{load_site_data, DataError};
use crate::output::{ensure_safe_output_dir, prepare_output_dir};
use crate::pages::{default_pages, render_pages, PageDescriptor, PageResult};
use crate::templates::TemplateEngine;

/// Configuration for building the site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory the other paths and the static assets are resolved against
    pub site_root: PathBuf,

    /// JSON data file
    pub data_file: PathBuf,

    /// Template directory
    pub template_dir: PathBuf,

    /// Output directory, deleted and recreated on every build
    pub output_dir: PathBuf,

    /// Pages to render
    pub pages: Vec<PageDescriptor>,

    /// Files and directories copied verbatim
    pub assets: Vec<StaticAsset>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            data_file: PathBuf::from("data.json"),
            template_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from(".output"),
            pages: default_pages(),
            assets: default_assets(),
        }
    }
}

impl BuildConfig {
    /// A default configuration rooted at `site_root`.
    pub fn with_root(site_root: impl Into<PathBuf>) -> Self {
        Self {
            site_root: site_root.into(),
            ..Default::default()
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        // `join` keeps absolute paths as they are
        self.site_root.join(path)
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildReport {
    /// Outcome for each static asset
    pub assets: Vec<AssetOutcome>,

    /// Outcome for each page, empty if the template directory was missing
    pub pages: Vec<PageResult>,

    /// Set when rendering was skipped because the template directory was absent
    pub template_dir_missing: Option<PathBuf>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

impl BuildReport {
    /// Number of pages written.
    pub fn pages_written(&self) -> usize {
        self.pages.iter().filter(|p| p.is_ok()).count()
    }

    /// Pages that failed to render or write.
    pub fn failed_pages(&self) -> impl Iterator<Item = &PageResult> {
        self.pages.iter().filter(|p| !p.is_ok())
    }

    /// True when the templates were found and every page was written.
    pub fn succeeded(&self) -> bool {
        self.template_dir_missing.is_none() && self.failed_pages().next().is_none()
    }
}

/// Errors that stop a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to prepare output directory {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to use {0} as output directory: it contains site sources")]
    UnsafeOutputDir(PathBuf),

    #[error("Required asset not found: {0}")]
    MissingAsset(PathBuf),

    #[error("Failed to copy {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Build the site.
    ///
    /// Per-page failures and a missing template directory are recorded in the
    /// report. Only an unsafe or unwritable output directory, required-asset
    /// and data errors are returned as `Err`.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let start = Instant::now();
        let output_dir = self.config.resolve(&self.config.output_dir);
        let data_file = self.config.resolve(&self.config.data_file);
        let template_dir = self.config.resolve(&self.config.template_dir);

        ensure_safe_output_dir(
            &output_dir,
            &[
                self.config.site_root.clone(),
                template_dir.clone(),
                data_file.clone(),
            ],
        )?;
        prepare_output_dir(&output_dir)?;

        let assets = copy_static_assets(&self.config.site_root, &output_dir, &self.config.assets)?;

        let data = load_site_data(&data_file)?;

        let mut template_dir_missing = None;
        let mut pages = Vec::new();

        if template_dir.is_dir() {
            let engine = TemplateEngine::from_dir(&template_dir);
            pages = render_pages(&engine, &self.config.pages, &data, &output_dir);
        } else {
            tracing::error!("Template directory '{}' not found!", template_dir.display());
            template_dir_missing = Some(template_dir);
        }

        Ok(BuildReport {
            assets,
            pages,
            template_dir_missing,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir,
        })
    }
}
