//! Request normalization and validation shared by the use cases.
//!
//! Client aliases are folded away here, once, so the domain only ever sees
//! canonical field names.

use validator::{Validate, ValidationErrors};

use crate::application::dto::{BundleRequest, FileEntryDto};
use crate::domain::entities::{Bundle, BundleEntry};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{EntryPath, FileKind, ProjectName, SourceUrl};

/// Prefer `primary`; an absent or empty primary falls back to the alias
fn prefer(primary: Option<String>, alias: Option<String>) -> Option<String> {
    primary.filter(|v| !v.is_empty()).or(alias)
}

/// Fold `filename` into `projectName` and `name` into `path`
pub fn normalize_aliases(request: BundleRequest) -> BundleRequest {
    let files = request.files.map(|files| {
        files
            .into_iter()
            .map(|file| FileEntryDto {
                path: prefer(file.path, file.name),
                name: None,
                ..file
            })
            .collect()
    });

    BundleRequest {
        project_name: prefer(request.project_name, request.filename),
        filename: None,
        files,
    }
}

/// Turn a raw request into a validated bundle.
///
/// Everything that can be checked without the network is checked here, so a
/// bad request never triggers a download.
pub fn validate_bundle_request(request: BundleRequest) -> Result<Bundle, DomainError> {
    let request = normalize_aliases(request);

    let files = match request.files {
        Some(files) if !files.is_empty() => files,
        _ => return Err(DomainError::EmptyBundle),
    };
    let project_name = ProjectName::new(request.project_name);

    let entries = files
        .into_iter()
        .enumerate()
        .map(|(index, file)| validate_file(index, file))
        .collect::<Result<Vec<_>, _>>()?;

    Bundle::new(project_name, entries)
}

fn validate_file(index: usize, file: FileEntryDto) -> Result<BundleEntry, DomainError> {
    let path = match file.path {
        Some(path) if !path.trim().is_empty() => EntryPath::new(path)?,
        _ => return Err(DomainError::MissingPath { index }),
    };

    let kind = match file.kind.as_deref() {
        Some(kind) if !kind.trim().is_empty() => kind.parse::<FileKind>()?,
        _ => FileKind::default(),
    };

    // A URL only matters for binary entries; other kinds ignore it
    let source_url = match (&file.source_url, kind.is_binary()) {
        (Some(url), true) if !url.trim().is_empty() => Some(SourceUrl::parse(url.trim())?),
        _ => None,
    };

    BundleEntry::new(path, kind, file.language, file.content, source_url)
}

/// First violation of a `validator` payload, in the given field order
pub fn first_violation<T: Validate>(payload: &T, field_order: &[&str]) -> Result<(), String> {
    payload
        .validate()
        .map_err(|errors| first_message(&errors, field_order))
}

fn first_message(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let field_errors = errors.field_errors();
    field_order
        .iter()
        .filter_map(|field| field_errors.get(*field).copied())
        .chain(field_errors.values().copied())
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Validation failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::UpsertMemoryRequest;
    use crate::domain::entities::EntrySource;
    use serde_json::json;

    fn request(files: Vec<FileEntryDto>) -> BundleRequest {
        BundleRequest {
            files: Some(files),
            ..BundleRequest::default()
        }
    }

    #[test]
    fn test_aliases_fill_absent_fields_only() {
        let normalized = normalize_aliases(BundleRequest {
            project_name: Some("primary".to_string()),
            filename: Some("alias".to_string()),
            files: Some(vec![FileEntryDto {
                name: Some("from-name.txt".to_string()),
                content: Some(String::new()),
                ..FileEntryDto::default()
            }]),
        });

        assert_eq!(normalized.project_name.as_deref(), Some("primary"));
        let files = normalized.files.unwrap();
        assert_eq!(files[0].path.as_deref(), Some("from-name.txt"));
        assert!(files[0].name.is_none());
    }

    #[test]
    fn test_filename_used_when_project_name_empty() {
        let normalized = normalize_aliases(BundleRequest {
            project_name: Some(String::new()),
            filename: Some("alias".to_string()),
            files: None,
        });
        assert_eq!(normalized.project_name.as_deref(), Some("alias"));
    }

    #[test]
    fn test_missing_or_empty_files_rejected() {
        assert_eq!(
            validate_bundle_request(BundleRequest::default()).unwrap_err(),
            DomainError::EmptyBundle
        );
        assert_eq!(
            validate_bundle_request(request(vec![])).unwrap_err(),
            DomainError::EmptyBundle
        );
    }

    #[test]
    fn test_missing_path_reports_index() {
        let err = validate_bundle_request(request(vec![
            FileEntryDto::inline("a.txt", "a"),
            FileEntryDto {
                content: Some("b".to_string()),
                ..FileEntryDto::default()
            },
        ]))
        .unwrap_err();
        assert_eq!(err, DomainError::MissingPath { index: 1 });
    }

    #[test]
    fn test_entry_without_source_names_path() {
        let err = validate_bundle_request(request(vec![FileEntryDto {
            path: Some("empty.bin".to_string()),
            ..FileEntryDto::default()
        }]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "File empty.bin: either content or sourceUrl (for binary) is required"
        );
    }

    #[test]
    fn test_source_url_ignored_for_non_binary() {
        let err = validate_bundle_request(request(vec![FileEntryDto {
            path: Some("notes.md".to_string()),
            kind: Some("markdown".to_string()),
            source_url: Some("https://example.com/notes.md".to_string()),
            ..FileEntryDto::default()
        }]))
        .unwrap_err();
        assert!(matches!(err, DomainError::MissingSource(_)));
    }

    #[test]
    fn test_binary_entry_with_url_is_remote() {
        let bundle = validate_bundle_request(request(vec![
            FileEntryDto::remote("logo.png", "https://cdn.example.com/logo.png"),
            FileEntryDto::inline("README.md", ""),
        ]))
        .unwrap();

        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.remote_count(), 1);
        assert!(matches!(
            bundle.entries()[1].source(),
            EntrySource::Inline(s) if s.is_empty()
        ));
        assert_eq!(bundle.project_name().as_str(), "project");
    }

    #[test]
    fn test_invalid_url_and_kind_rejected() {
        let bad_url = validate_bundle_request(request(vec![FileEntryDto::remote(
            "x.bin",
            "ftp://example.com/x.bin",
        )]));
        assert!(matches!(bad_url, Err(DomainError::InvalidSourceUrl { .. })));

        let bad_kind = validate_bundle_request(request(vec![FileEntryDto {
            kind: Some("video".to_string()),
            ..FileEntryDto::inline("x", "y")
        }]));
        assert!(matches!(bad_kind, Err(DomainError::InvalidFileKind(_))));
    }

    #[test]
    fn test_duplicate_paths_rejected() {
        let err = validate_bundle_request(request(vec![
            FileEntryDto::inline("a.txt", "1"),
            FileEntryDto::inline("a.txt", "2"),
        ]))
        .unwrap_err();
        assert_eq!(err, DomainError::DuplicatePath("a.txt".to_string()));
    }

    #[test]
    fn test_first_violation_respects_field_order() {
        let payload = UpsertMemoryRequest {
            user_id: String::new(),
            key: String::new(),
            value: json!([1, 2]),
        };
        let order = ["user_id", "key", "value"];
        assert_eq!(
            first_violation(&payload, &order).unwrap_err(),
            "userId is required"
        );

        let payload = UpsertMemoryRequest {
            user_id: "u".to_string(),
            key: "k".to_string(),
            value: json!("text"),
        };
        assert_eq!(
            first_violation(&payload, &order).unwrap_err(),
            "value must be an object"
        );
    }
}
