//! Shared testing utilities for dagster-chart tests.

use assert_cmd::Command;
use dagster_chart::{ConfigMap, DagsterHelmValues, InstanceDocument, render_instance};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for invoking the compiled `dagster-chart` binary in the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("dagster-chart").expect("Failed to locate binary");
        cmd.current_dir(self.work_dir()).env_remove("DAGSTER_CHART_LOG");
        cmd
    }

    /// Write a file relative to the work directory and return its path.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }
}

/// Render the embedded chart and return the single instance ConfigMap.
#[allow(dead_code)]
pub fn render_config_map(values: &DagsterHelmValues) -> ConfigMap {
    let config_maps = render_instance(values).expect("rendering failed");
    assert_eq!(config_maps.len(), 1, "expected exactly one instance ConfigMap");
    config_maps.into_iter().next().expect("one ConfigMap")
}

/// Render and parse `dagster.yaml`.
#[allow(dead_code)]
pub fn render_instance_doc(values: &DagsterHelmValues) -> InstanceDocument {
    render_config_map(values).instance().expect("dagster.yaml is not a mapping")
}

/// Keys of a YAML mapping, as strings.
#[allow(dead_code)]
pub fn mapping_keys(value: &Value) -> Vec<String> {
    value
        .as_mapping()
        .map(|mapping| {
            mapping.keys().filter_map(|key| key.as_str().map(str::to_string)).collect()
        })
        .unwrap_or_default()
}
