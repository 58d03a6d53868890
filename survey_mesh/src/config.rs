//! Load configuration: which documents form a batch and how they are meshed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SurfaceError, SurfaceResult};
use crate::io::DirectorySource;
use crate::surface::LoadPolicy;

/// A batch of sources resolved against a directory.
///
/// ```json
/// {
///   "root": "geometry",
///   "sources": ["EG_Harvey.xml", "FG_Harvey.xml"],
///   "policy": { "faces": { "exclude_boundary": true }, "tiling_factor": 8.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub root: PathBuf,
    pub sources: Vec<String>,
    #[serde(default)]
    pub policy: LoadPolicy,
}

impl CatalogConfig {
    pub fn new(root: impl Into<PathBuf>, sources: Vec<String>) -> Self {
        Self {
            root: root.into(),
            sources,
            policy: LoadPolicy::default(),
        }
    }

    pub fn byte_source(&self) -> DirectorySource {
        DirectorySource::new(&self.root)
    }
}

/// Parses a JSON configuration. A relative `root` is taken relative to
/// `base_dir`.
pub fn parse_catalog_config(json: &str, base_dir: &Path) -> SurfaceResult<CatalogConfig> {
    let mut config: CatalogConfig =
        serde_json::from_str(json).map_err(|e| SurfaceError::Config(e.to_string()))?;
    if config.root.is_relative() {
        config.root = base_dir.join(&config.root);
    }
    config.policy.validate()?;
    Ok(config)
}

/// Reads a JSON configuration file.
pub fn read_catalog_config(path: &str) -> SurfaceResult<CatalogConfig> {
    let contents = crate::io::read_to_string(path).map_err(|e| SurfaceError::from_io(path, e))?;
    let base_dir = Path::new(path).parent().unwrap_or_else(|| Path::new(""));
    parse_catalog_config(&contents, base_dir)
}
