//! Property-based tests using proptest
//!
//! Random inputs for the invariants the bundle pipeline relies on: safe
//! archive names, safe entry paths and order-preserving archives.

use bytes::Bytes;
use proptest::prelude::*;
use std::collections::HashSet;
use std::io::{Cursor, Read};

use gpt_backend::application::dto::{BundleRequest, FileEntryDto};
use gpt_backend::application::validation::validate_bundle_request;
use gpt_backend::domain::entities::ResolvedEntry;
use gpt_backend::domain::value_objects::{EntryPath, ProjectName};
use gpt_backend::infrastructure::archive::build_in_memory;

/// Strategy for relative paths made of 1-4 plain segments
fn entry_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9_][a-zA-Z0-9_.-]{0,11}", 1..4)
        .prop_map(|segments| segments.join("/"))
}

/// Strategy for a list of files with unique paths
fn files_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((entry_path_strategy(), ".{0,64}"), 1..12).prop_map(|files| {
        let mut seen = HashSet::new();
        files
            .into_iter()
            .filter(|(path, _)| seen.insert(path.clone()))
            .collect()
    })
}

fn read_archive(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            file.read_to_end(&mut content).unwrap();
            (file.name().unwrap().to_string(), content)
        })
        .collect()
}

proptest! {
    /// Sanitized project names only use filename-safe characters and keep their length
    #[test]
    fn sanitized_name_is_filename_safe(name in "\\PC{1,60}") {
        let project = ProjectName::new(Some(name));
        let sanitized = project.sanitized();
        prop_assert!(sanitized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        prop_assert_eq!(sanitized.chars().count(), project.as_str().chars().count());
        prop_assert!(project.archive_filename().ends_with(".zip"));
    }

    /// Accepted entry paths never escape the extraction directory
    #[test]
    fn accepted_paths_stay_relative(raw in "[a-zA-Z./\\\\]{1,40}") {
        if let Ok(path) = EntryPath::new(raw) {
            prop_assert!(!path.as_str().starts_with('/'));
            prop_assert!(!path.as_str().contains('\\'));
            prop_assert!(path.as_str().split('/').all(|segment| segment != ".."));
        }
    }

    /// Validation keeps the request order of inline files
    #[test]
    fn validation_preserves_order(files in files_strategy()) {
        let request = BundleRequest {
            files: Some(
                files
                    .iter()
                    .map(|(path, content)| FileEntryDto::inline(path.clone(), content.clone()))
                    .collect(),
            ),
            ..BundleRequest::default()
        };

        let bundle = validate_bundle_request(request).unwrap();
        let paths: Vec<&str> = bundle.entries().iter().map(|e| e.path().as_str()).collect();
        let expected: Vec<&str> = files.iter().map(|(path, _)| path.as_str()).collect();
        prop_assert_eq!(paths, expected);
    }

    /// Archives contain exactly the given entries, in order, byte for byte
    #[test]
    fn archive_round_trip_preserves_entries(files in files_strategy()) {
        let entries: Vec<ResolvedEntry> = files
            .iter()
            .map(|(path, content)| ResolvedEntry {
                path: EntryPath::new(path.clone()).unwrap(),
                bytes: Bytes::from(content.clone()),
            })
            .collect();

        let archive = build_in_memory(&entries, 9).unwrap();
        let expected: Vec<(String, Vec<u8>)> = files
            .into_iter()
            .map(|(path, content)| (path, content.into_bytes()))
            .collect();
        prop_assert_eq!(read_archive(&archive), expected);
    }

    /// The same entries always produce the same bytes
    #[test]
    fn archive_is_deterministic(files in files_strategy()) {
        let entries: Vec<ResolvedEntry> = files
            .iter()
            .map(|(path, content)| ResolvedEntry {
                path: EntryPath::new(path.clone()).unwrap(),
                bytes: Bytes::from(content.clone()),
            })
            .collect();

        prop_assert_eq!(
            build_in_memory(&entries, 9).unwrap(),
            build_in_memory(&entries, 9).unwrap()
        );
    }
}
