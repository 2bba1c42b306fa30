use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Characters that may not appear in a download filename
static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_-]").expect("Invalid filename regex"));

/// Human-readable bundle label, used only to name the produced archive
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectName(String);

impl ProjectName {
    const MAX_LENGTH: usize = 200;
    pub const DEFAULT: &'static str = "project";

    /// Build from an optional client value; blank or missing falls back to the default.
    /// The name is only a label, so anything past `MAX_LENGTH` chars is cut off.
    pub fn new(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => {
                Self(v.trim().chars().take(Self::MAX_LENGTH).collect())
            }
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filename-safe stem: everything outside `[A-Za-z0-9_-]` becomes `-`
    pub fn sanitized(&self) -> String {
        UNSAFE_FILENAME_CHARS.replace_all(&self.0, "-").into_owned()
    }

    /// `<sanitized>.zip`
    pub fn archive_filename(&self) -> String {
        format!("{}.zip", self.sanitized())
    }
}

impl Default for ProjectName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl std::fmt::Display for ProjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
