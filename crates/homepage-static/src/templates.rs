//! Template engine for rendering site pages.

use std::path::Path;

use minijinja::{context, path_loader, AutoEscape, Environment};

use crate::data::SiteData;

/// Template engine using minijinja.
///
/// Templates are loaded lazily from a directory on first use. Output is not
/// auto-escaped and undefined values render as empty strings, matching a
/// default Jinja2 environment.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a template engine that loads templates from `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(dir.to_path_buf()));
        env.set_auto_escape_callback(|_| AutoEscape::None);

        Self { env }
    }

    /// Render a page using the specified template.
    ///
    /// The site data is available to the template as `data`.
    pub fn render_page(&self, template: &str, data: &SiteData) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            data => data,
        })
    }
}
