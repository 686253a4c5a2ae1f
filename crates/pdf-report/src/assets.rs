//! Locating static assets such as the header logo

use std::path::{Path, PathBuf};

/// Resolves an asset path to a readable file, if one exists
pub trait AssetLocator {
    fn locate(&self, path: &Path) -> Option<PathBuf>;
}

/// Any `Fn(&Path) -> Option<PathBuf>` works as a locator
impl<F> AssetLocator for F
where
    F: Fn(&Path) -> Option<PathBuf>,
{
    fn locate(&self, path: &Path) -> Option<PathBuf> {
        self(path)
    }
}

/// Looks assets up on disk relative to a root directory
#[derive(Debug, Clone)]
pub struct FsAssetLocator {
    root: PathBuf,
}

impl FsAssetLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locator rooted at the process working directory
    pub fn current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetLocator for FsAssetLocator {
    fn locate(&self, path: &Path) -> Option<PathBuf> {
        let candidate = self.root.join(path);
        candidate.is_file().then_some(candidate)
    }
}
