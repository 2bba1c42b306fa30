use std::path::{Path, PathBuf};

/// Utility for generating storage paths under one root
#[derive(Debug, Clone)]
pub struct PathBuilder {
    root: PathBuf,
}

impl PathBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding in-progress uploads: /root/temp
    pub fn temp_dir(&self) -> PathBuf {
        self.root.join("temp")
    }

    /// Directory holding finished archives: /root/zips
    pub fn zips_dir(&self) -> PathBuf {
        self.root.join("zips")
    }

    /// Generate temp upload path: /root/temp/{uuid}
    pub fn temp_path(&self, id: uuid::Uuid) -> PathBuf {
        self.temp_dir().join(id.to_string())
    }

    /// Final archive path: /root/zips/{filename}
    pub fn zip_path(&self, filename: &str) -> PathBuf {
        self.zips_dir().join(filename)
    }
}
