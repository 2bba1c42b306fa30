use bytes::Bytes;
use std::collections::HashSet;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{EntryPath, FileKind, ProjectName, SourceUrl};

/// Where the bytes of an entry come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    /// Literal text, archived verbatim as UTF-8
    Inline(String),
    /// Downloaded before the archive is opened
    Remote(SourceUrl),
}

/// One validated file of a bundle, not yet resolved to bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    path: EntryPath,
    kind: FileKind,
    language: Option<String>,
    source: EntrySource,
}

impl BundleEntry {
    /// Pick the entry source.
    ///
    /// A binary entry with a URL is always fetched, even if it also carries
    /// inline content. Every other entry needs `content`; an empty string counts.
    pub fn new(
        path: EntryPath,
        kind: FileKind,
        language: Option<String>,
        content: Option<String>,
        source_url: Option<SourceUrl>,
    ) -> Result<Self, DomainError> {
        let source = match (kind.is_binary(), source_url, content) {
            (true, Some(url), _) => EntrySource::Remote(url),
            (_, _, Some(content)) => EntrySource::Inline(content),
            _ => return Err(DomainError::MissingSource(path.to_string())),
        };

        Ok(Self {
            path,
            kind,
            language,
            source,
        })
    }

    pub fn path(&self) -> &EntryPath {
        &self.path
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn source(&self) -> &EntrySource {
        &self.source
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.source, EntrySource::Remote(_))
    }

    pub fn into_parts(self) -> (EntryPath, EntrySource) {
        (self.path, self.source)
    }
}

/// Validated bundle: non-empty, ordered, unique paths
#[derive(Debug, Clone)]
pub struct Bundle {
    project_name: ProjectName,
    entries: Vec<BundleEntry>,
}

impl Bundle {
    pub fn new(project_name: ProjectName, entries: Vec<BundleEntry>) -> Result<Self, DomainError> {
        if entries.is_empty() {
            return Err(DomainError::EmptyBundle);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.path.as_str()) {
                return Err(DomainError::DuplicatePath(entry.path.to_string()));
            }
        }

        Ok(Self {
            project_name,
            entries,
        })
    }

    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }

    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn remote_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_remote()).count()
    }

    pub fn into_parts(self) -> (ProjectName, Vec<BundleEntry>) {
        (self.project_name, self.entries)
    }
}

/// Entry whose bytes are in memory and ready to be archived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub path: EntryPath,
    pub bytes: Bytes,
}

/// Bundle after every entry was resolved; order matches the request
#[derive(Debug, Clone)]
pub struct ResolvedBundle {
    project_name: ProjectName,
    entries: Vec<ResolvedEntry>,
}

impl ResolvedBundle {
    pub fn new(project_name: ProjectName, entries: Vec<ResolvedEntry>) -> Self {
        Self {
            project_name,
            entries,
        }
    }

    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }

    pub fn entries(&self) -> &[ResolvedEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ResolvedEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Uncompressed payload size
    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.bytes.len() as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> EntryPath {
        EntryPath::new(p).unwrap()
    }

    fn inline(p: &str, content: &str) -> BundleEntry {
        BundleEntry::new(path(p), FileKind::Text, None, Some(content.to_string()), None).unwrap()
    }

    #[test]
    fn test_binary_with_url_is_remote_even_with_content() {
        let url = SourceUrl::parse("https://example.com/logo.png").unwrap();
        let entry = BundleEntry::new(
            path("logo.png"),
            FileKind::Binary,
            None,
            Some("ignored".to_string()),
            Some(url.clone()),
        )
        .unwrap();

        assert_eq!(entry.source(), &EntrySource::Remote(url));
    }

    #[test]
    fn test_non_binary_with_url_uses_content() {
        let url = SourceUrl::parse("https://example.com/notes.md").unwrap();
        let entry = BundleEntry::new(
            path("notes.md"),
            FileKind::Markdown,
            None,
            Some("# notes".to_string()),
            Some(url),
        )
        .unwrap();

        assert_eq!(entry.source(), &EntrySource::Inline("# notes".to_string()));
    }

    #[test]
    fn test_non_binary_with_only_url_is_missing_source() {
        let url = SourceUrl::parse("https://example.com/notes.md").unwrap();
        let err =
            BundleEntry::new(path("notes.md"), FileKind::Text, None, None, Some(url)).unwrap_err();

        assert_eq!(err, DomainError::MissingSource("notes.md".to_string()));
    }

    #[test]
    fn test_empty_content_is_valid() {
        let entry = inline("empty.txt", "");
        assert_eq!(entry.source(), &EntrySource::Inline(String::new()));
    }

    #[test]
    fn test_bundle_rejects_empty_entries() {
        let err = Bundle::new(ProjectName::default(), vec![]).unwrap_err();
        assert_eq!(err, DomainError::EmptyBundle);
    }

    #[test]
    fn test_bundle_rejects_duplicate_paths() {
        let err = Bundle::new(
            ProjectName::default(),
            vec![inline("a.txt", "1"), inline("b.txt", "2"), inline("a.txt", "3")],
        )
        .unwrap_err();

        assert_eq!(err, DomainError::DuplicatePath("a.txt".to_string()));
    }

    #[test]
    fn test_bundle_preserves_order() {
        let bundle = Bundle::new(
            ProjectName::default(),
            vec![inline("z.txt", ""), inline("a.txt", ""), inline("m.txt", "")],
        )
        .unwrap();

        let paths: Vec<&str> = bundle.entries().iter().map(|e| e.path().as_str()).collect();
        assert_eq!(paths, vec!["z.txt", "a.txt", "m.txt"]);
        assert_eq!(bundle.remote_count(), 0);
    }
}
