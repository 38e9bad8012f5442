//! Test utilities for Warden crates.

use proptest::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Creates a temporary file with given content.
pub fn temp_file(content: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().join("test_file");
    std::fs::write(&path, content).expect("Failed to write temp file");
    (dir, path)
}

/// Creates a project directory with `.warden/config.yaml` holding `yaml`.
pub fn temp_project(yaml: &str) -> TempDir {
    let dir = temp_dir();
    write_file(dir.path(), ".warden/config.yaml", yaml);
    dir
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(&path, content).expect("Failed to write file");
    path
}

/// Role JSON in the persisted `activeRole` layout.
pub fn role_json(id: &str, name: &str, grants: &[(&str, &[&str])]) -> serde_json::Value {
    let permissions: serde_json::Map<String, serde_json::Value> = grants
        .iter()
        .map(|(resource, actions)| (resource.to_string(), serde_json::json!(actions)))
        .collect();
    serde_json::json!({
        "id": id,
        "name": name,
        "description": format!("{name} test role"),
        "permissions": permissions,
    })
}

/// Resource or action names as they appear in fixtures.
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,11}"
}

/// A `resource -> actions` map with up to `max_resources` entries.
pub fn grants_strategy(
    max_resources: usize,
) -> impl Strategy<Value = std::collections::BTreeMap<String, std::collections::BTreeSet<String>>> {
    prop::collection::btree_map(
        name_strategy(),
        prop::collection::btree_set(name_strategy(), 0..5),
        0..=max_resources,
    )
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
