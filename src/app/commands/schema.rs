//! `values.schema.json` generation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{AppError, values_schema};

pub const SCHEMA_FILE_NAME: &str = "values.schema.json";

/// The schema document as pretty-printed JSON with a trailing newline.
pub fn show() -> Result<String, AppError> {
    let mut rendered = serde_json::to_string_pretty(&values_schema())?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write the schema next to the chart's `values.yaml`. Returns the written path.
pub fn apply(chart_dir: &Path) -> Result<PathBuf, AppError> {
    if !chart_dir.join("Chart.yaml").is_file() {
        return Err(AppError::ChartNotFound(chart_dir.display().to_string()));
    }
    let path = chart_dir.join(SCHEMA_FILE_NAME);
    fs::write(&path, show()?)?;
    info!(path = %path.display(), "wrote values schema");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn show_is_valid_json() {
        let parsed: serde_json::Value = serde_json::from_str(&show().unwrap()).unwrap();
        assert!(parsed["properties"]["computeLogManager"].is_object());
    }

    #[test]
    fn apply_writes_schema_into_chart() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Chart.yaml"), "name: dagster\nversion: 0.11.0\n").unwrap();

        let path = apply(dir.path()).unwrap();
        assert_eq!(path, dir.path().join(SCHEMA_FILE_NAME));
        assert_eq!(fs::read_to_string(path).unwrap(), show().unwrap());
    }

    #[test]
    fn apply_requires_a_chart() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(apply(dir.path()).unwrap_err(), AppError::ChartNotFound(_)));
    }
}
