use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::{AppError, ReleaseInfo};
use crate::ports::ChartRenderer;

/// Renders an on-disk chart with `helm template`.
#[derive(Debug, Clone)]
pub struct HelmCommandRenderer {
    binary: String,
    chart_dir: PathBuf,
    subcharts: Vec<PathBuf>,
}

impl HelmCommandRenderer {
    pub fn new(binary: impl Into<String>, chart_dir: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into(), chart_dir: chart_dir.into(), subcharts: Vec::new() }
    }

    /// Subcharts (relative to the chart directory) that must exist before rendering.
    pub fn with_subcharts(mut self, subcharts: Vec<PathBuf>) -> Self {
        self.subcharts = subcharts;
        self
    }

    fn ensure_chart(&self) -> Result<(), AppError> {
        let dirs = std::iter::once(self.chart_dir.clone())
            .chain(self.subcharts.iter().map(|subchart| self.chart_dir.join(subchart)));
        for dir in dirs {
            if !dir.join("Chart.yaml").is_file() {
                return Err(AppError::ChartNotFound(dir.display().to_string()));
            }
        }
        Ok(())
    }

    fn run(&self, args: &[&str]) -> Result<String, AppError> {
        let command_line = format!("{} {}", self.binary, args.join(" "));
        debug!(command = %command_line, "invoking helm");

        let output = Command::new(&self.binary).args(args).output().map_err(|e| {
            AppError::HelmError { command: command_line.clone(), details: e.to_string() }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::HelmError {
                command: command_line,
                details: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ChartRenderer for HelmCommandRenderer {
    fn default_values(&self) -> Result<serde_yaml::Value, AppError> {
        self.ensure_chart()?;
        let content = fs::read_to_string(self.chart_dir.join("values.yaml"))?;
        Ok(serde_yaml::from_str(&content)?)
    }

    fn render(
        &self,
        values: &serde_yaml::Value,
        release: &ReleaseInfo,
        template: &str,
    ) -> Result<String, AppError> {
        self.ensure_chart()?;

        // Helm only reads values from files; the file lives until rendering returns.
        let mut values_file = NamedTempFile::new()?;
        values_file.write_all(serde_yaml::to_string(values)?.as_bytes())?;
        values_file.flush()?;

        let chart_dir = self.chart_dir.to_string_lossy();
        let values_path = values_file.path().to_string_lossy();
        self.run(&[
            "template",
            &release.name,
            &chart_dir,
            "--namespace",
            &release.namespace,
            "--values",
            &values_path,
            "--show-only",
            template,
        ])
    }
}
