//! Config directory layout

use std::path::PathBuf;

use crate::storage::file::File;

/// Where storectl keeps its local state
#[derive(Debug, Clone)]
pub struct ConfigLayout {
    pub base_dir: PathBuf,
}

impl ConfigLayout {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The credentials file
    pub fn credentials_file(&self) -> File {
        File::new(self.base_dir.join("credentials.json"))
    }
}

impl Default for ConfigLayout {
    fn default() -> Self {
        let base_dir = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
            })
            .unwrap_or_else(|| PathBuf::from("."))
            .join("storectl");
        Self::new(base_dir)
    }
}
