//! Page rendering.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::data::SiteData;
use crate::templates::TemplateEngine;

/// A template rendered to a file in the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescriptor {
    /// Template name, relative to the template directory
    pub template: String,
    /// Output file name, relative to the output directory
    pub output: String,
}

impl PageDescriptor {
    /// Pair a template with the file it renders to.
    pub fn new(template: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            output: output.into(),
        }
    }
}

/// The English and Chinese home pages.
pub fn default_pages() -> Vec<PageDescriptor> {
    vec![
        PageDescriptor::new("index_template.html", "index.html"),
        PageDescriptor::new("zh_template.html", "zh.html"),
    ]
}

/// Errors for a single page. These never abort the build.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Template error in {template}: {source}")]
    Template {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of rendering one page.
#[derive(Debug)]
pub struct PageResult {
    /// Output file name from the descriptor
    pub output: String,
    /// Written path, or why the page was skipped
    pub result: Result<PathBuf, PageError>,
}

impl PageResult {
    /// True when the page was written.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Render every page, continuing past failures.
///
/// Each failure is logged with the page's output name and recorded in the
/// returned results.
pub fn render_pages(
    engine: &TemplateEngine,
    pages: &[PageDescriptor],
    data: &SiteData,
    output_dir: &Path,
) -> Vec<PageResult> {
    pages
        .iter()
        .map(|page| {
            let result = render_page(engine, page, data, output_dir);
            match &result {
                Ok(path) => tracing::info!("Successfully generated: {}", path.display()),
                Err(e) => tracing::error!("Error generating {}: {}", page.output, e),
            }
            PageResult {
                output: page.output.clone(),
                result,
            }
        })
        .collect()
}

fn render_page(
    engine: &TemplateEngine,
    page: &PageDescriptor,
    data: &SiteData,
    output_dir: &Path,
) -> Result<PathBuf, PageError> {
    let html = engine
        .render_page(&page.template, data)
        .map_err(|source| PageError::Template {
            template: page.template.clone(),
            source,
        })?;

    let output_path = output_dir.join(&page.output);
    fs::write(&output_path, html).map_err(|source| PageError::Write {
        path: output_path.clone(),
        source,
    })?;

    Ok(output_path)
}
