//! Static builder for the personal homepage.
//!
//! Copies static assets and renders the site's pages from minijinja templates
//! populated with JSON data.

pub mod assets;
pub mod builder;
pub mod data;
pub mod output;
pub mod pages;
pub mod templates;

pub use assets::{AssetKind, AssetOutcome, StaticAsset};
pub use builder::{BuildConfig, BuildError, BuildReport, StaticBuilder};
pub use data::{DataError, SiteData};
pub use pages::{PageDescriptor, PageError, PageResult};
