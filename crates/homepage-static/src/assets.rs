//! Static asset copying.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::builder::BuildError;

/// Whether an asset is a single file or a directory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    File,
    Dir,
}

/// A file or directory copied verbatim into the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAsset {
    /// Path relative to the site root
    pub source: PathBuf,
    /// File or directory
    pub kind: AssetKind,
    /// Fail the build if this asset cannot be copied
    pub required: bool,
}

impl StaticAsset {
    /// An optional file copied into the output root.
    pub fn file(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            kind: AssetKind::File,
            required: false,
        }
    }

    /// An optional directory copied recursively under the same name.
    pub fn dir(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            kind: AssetKind::Dir,
            required: false,
        }
    }

    /// Mark this asset as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Name used in log lines and reports.
    pub fn name(&self) -> String {
        match self.kind {
            AssetKind::Dir => format!("{}/", self.source.display()),
            AssetKind::File => self.source.display().to_string(),
        }
    }

    fn destination(&self, output_dir: &Path) -> PathBuf {
        match self.kind {
            AssetKind::Dir => output_dir.join(&self.source),
            AssetKind::File => match self.source.file_name() {
                Some(name) => output_dir.join(name),
                None => output_dir.join(&self.source),
            },
        }
    }

    fn is_present(&self, root: &Path) -> bool {
        let path = root.join(&self.source);
        match self.kind {
            AssetKind::Dir => path.is_dir(),
            AssetKind::File => path.is_file(),
        }
    }
}

/// The assets every build copies: the icon set, the site verification file,
/// the privacy policy and the profile photo.
pub fn default_assets() -> Vec<StaticAsset> {
    vec![
        StaticAsset::dir("icon"),
        StaticAsset::file("CNAME"),
        StaticAsset::file("privacy-policy.html"),
        StaticAsset::file("profile.jpg"),
    ]
}

/// What happened to a single asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    Copied { name: String, files: usize },
    Missing(String),
    Failed { name: String, message: String },
}

/// Copy each asset from `root` into `output_dir`.
///
/// Missing or failing optional assets are logged and skipped. A required asset
/// that is missing or fails to copy stops the build.
pub fn copy_static_assets(
    root: &Path,
    output_dir: &Path,
    assets: &[StaticAsset],
) -> Result<Vec<AssetOutcome>, BuildError> {
    let mut outcomes = Vec::with_capacity(assets.len());

    for asset in assets {
        let name = asset.name();

        if !asset.is_present(root) {
            if asset.required {
                return Err(BuildError::MissingAsset(root.join(&asset.source)));
            }
            tracing::info!("{} not found (skipping)", name);
            outcomes.push(AssetOutcome::Missing(name));
            continue;
        }

        match copy_asset(root, output_dir, asset) {
            Ok(files) => {
                tracing::info!("Copied: {}", name);
                outcomes.push(AssetOutcome::Copied { name, files });
            }
            Err(source) if asset.required => {
                return Err(BuildError::Copy {
                    path: root.join(&asset.source),
                    source,
                });
            }
            Err(e) => {
                tracing::warn!("Failed to copy {}: {}", name, e);
                outcomes.push(AssetOutcome::Failed {
                    name,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(outcomes)
}

/// Copy one asset, returning the number of files written.
fn copy_asset(root: &Path, output_dir: &Path, asset: &StaticAsset) -> io::Result<usize> {
    let source = root.join(&asset.source);
    let dest = asset.destination(output_dir);

    match asset.kind {
        AssetKind::File => {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&source, &dest)?;
            Ok(1)
        }
        AssetKind::Dir => copy_dir(&source, &dest),
    }
}

fn copy_dir(source: &Path, dest: &Path) -> io::Result<usize> {
    let mut files = 0;

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = dest.join(relative);

        // Symlinks contribute their target's contents only when they point at a file
        if entry.depth() > 0 && entry.path_is_symlink() && !entry.path().is_file() {
            tracing::debug!("Skipping linked directory {}", entry.path().display());
            continue;
        }

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            files += 1;
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn site_with_assets(root: &Path) {
        fs::create_dir_all(root.join("icon").join("social")).unwrap();
        fs::write(root.join("icon").join("favicon.ico"), "ico").unwrap();
        fs::write(root.join("icon").join("social").join("github.svg"), "<svg/>").unwrap();
        fs::write(root.join("CNAME"), "example.com").unwrap();
        fs::write(root.join("privacy-policy.html"), "<p>policy</p>").unwrap();
    }

    fn listing(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().strip_prefix(dir).unwrap().to_path_buf())
            .collect();
        files.sort();
        files
    }

    #[test]
    fn copies_default_assets() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("site");
        let out = temp.path().join("out");
        site_with_assets(&root);
        fs::create_dir_all(&out).unwrap();

        let outcomes = copy_static_assets(&root, &out, &default_assets()).unwrap();

        assert_eq!(
            outcomes[0],
            AssetOutcome::Copied {
                name: "icon/".to_string(),
                files: 2
            }
        );
        assert_eq!(outcomes[3], AssetOutcome::Missing("profile.jpg".to_string()));
        assert_eq!(
            fs::read_to_string(out.join("icon").join("social").join("github.svg")).unwrap(),
            "<svg/>"
        );
        assert_eq!(fs::read_to_string(out.join("CNAME")).unwrap(), "example.com");
        assert!(out.join("privacy-policy.html").exists());
        assert!(!out.join("profile.jpg").exists());
    }

    #[test]
    fn missing_optional_assets_are_skipped() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(&out).unwrap();

        let outcomes = copy_static_assets(temp.path(), &out, &default_assets()).unwrap();

        assert!(outcomes
            .iter()
            .all(|o| matches!(o, AssetOutcome::Missing(_))));
        assert!(!out.join("icon").exists());
    }

    #[test]
    fn missing_required_asset_fails() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(&out).unwrap();

        let assets = vec![
            StaticAsset::file("CNAME"),
            StaticAsset::file("profile.jpg").required(),
        ];
        let err = copy_static_assets(temp.path(), &out, &assets).unwrap_err();

        assert!(matches!(err, BuildError::MissingAsset(p) if p.ends_with("profile.jpg")));
    }

    #[cfg(unix)]
    #[test]
    fn linked_files_are_copied_but_linked_dirs_are_not() {
        use std::os::unix::fs::symlink;

        let temp = tempdir().unwrap();
        let root = temp.path().join("site");
        let outside = temp.path().join("outside");
        let out = temp.path().join("out");
        fs::create_dir_all(root.join("icon")).unwrap();
        fs::create_dir_all(outside.join("private")).unwrap();
        fs::create_dir_all(&out).unwrap();
        fs::write(outside.join("logo.svg"), "<svg/>").unwrap();
        fs::write(outside.join("private").join("secret.txt"), "secret").unwrap();
        symlink(outside.join("logo.svg"), root.join("icon").join("logo.svg")).unwrap();
        symlink(outside.join("private"), root.join("icon").join("private")).unwrap();

        let outcomes =
            copy_static_assets(&root, &out, &[StaticAsset::dir("icon")]).unwrap();

        assert_eq!(
            outcomes[0],
            AssetOutcome::Copied {
                name: "icon/".to_string(),
                files: 1
            }
        );
        assert_eq!(
            fs::read_to_string(out.join("icon").join("logo.svg")).unwrap(),
            "<svg/>"
        );
        assert!(!out.join("icon").join("private").exists());
    }

    #[test]
    fn copy_order_does_not_change_result() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("site");
        site_with_assets(&root);
        fs::write(root.join("profile.jpg"), "jpg").unwrap();

        let forward = temp.path().join("forward");
        let reversed = temp.path().join("reversed");
        fs::create_dir_all(&forward).unwrap();
        fs::create_dir_all(&reversed).unwrap();

        let mut assets = default_assets();
        copy_static_assets(&root, &forward, &assets).unwrap();
        assets.reverse();
        copy_static_assets(&root, &reversed, &assets).unwrap();

        assert_eq!(listing(&forward), listing(&reversed));
        assert_eq!(listing(&forward).len(), 5);
    }
}
