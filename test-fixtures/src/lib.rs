//! Test fixture loader for the sample course corpora and vector artifacts.
//!
//! Shared by integration tests across the workspace crates.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("corpus").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixture_path(relative_path).exists()
}

/// Read a fixture file as UTF-8 text.
///
/// # Panics
/// Panics if the file doesn't exist.
pub fn load_text(relative_path: &str) -> String {
    let path = fixture_path(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let content = load_text(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", relative_path, e))
}

/// The main sample course: two steps, three modules, seven lessons.
pub fn sample_course() -> String {
    load_text("corpus/course.txt")
}

/// Path of the main sample course.
pub fn sample_course_path() -> PathBuf {
    fixture_path("corpus/course.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn all_corpus_files_exist() {
        let files = [
            "corpus/course.txt",
            "corpus/no_headers.txt",
            "corpus/step_reset.txt",
            "vectors/wrapped.json",
        ];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn sample_course_mentions_every_level() {
        let text = sample_course();
        assert!(text.contains("СТРУКТУРА КУРСА"));
        assert!(text.contains("ступень"));
        assert!(text.contains("модуль"));
        assert!(text.contains("урок"));
    }

    #[test]
    fn vector_fixture_parses_as_json() {
        let v: serde_json::Value = load_fixture("vectors/wrapped.json");
        assert_eq!(v["vectors"].as_array().map(|a| a.len()), Some(3));
    }
}
