use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// One side of the comparison, read once at startup and never changed.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub path: PathBuf,
    pub contents: String,
}

impl SourceText {
    /// Read `path` as text. Invalid UTF-8 is replaced rather than rejected.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Error reading {}", path.display()))?;
        let contents = String::from_utf8_lossy(&bytes).into_owned();
        tracing::info!(path = %path.display(), bytes = bytes.len(), "loaded file");
        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    pub fn label(&self) -> String {
        self.path.display().to_string()
    }
}
