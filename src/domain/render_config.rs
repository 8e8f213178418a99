//! Render configuration loaded from `dagster-chart.toml`.

use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::AppError;
use crate::domain::release::{DEFAULT_NAMESPACE, DEFAULT_RELEASE_NAME, ReleaseInfo};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "dagster-chart.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Release identity used for object names.
    #[serde(default)]
    pub release: ReleaseSettings,
    /// How to reach an on-disk chart through the helm binary.
    #[serde(default)]
    pub helm: HelmSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseSettings {
    #[serde(default = "default_release_name")]
    pub name: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for ReleaseSettings {
    fn default() -> Self {
        Self { name: default_release_name(), namespace: default_namespace() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HelmSettings {
    /// Executable invoked for `helm template`.
    #[serde(default = "default_helm_binary")]
    pub binary: String,
    /// Chart directory; only required when rendering through helm.
    #[serde(default)]
    pub chart_dir: Option<PathBuf>,
    /// Subchart directories, relative to `chart_dir`, that must be present.
    #[serde(default)]
    pub subcharts: Vec<PathBuf>,
}

impl Default for HelmSettings {
    fn default() -> Self {
        Self { binary: default_helm_binary(), chart_dir: None, subcharts: Vec::new() }
    }
}

fn default_release_name() -> String {
    DEFAULT_RELEASE_NAME.to_string()
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_helm_binary() -> String {
    "helm".to_string()
}

impl RenderConfig {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let config: RenderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.release_info().validate()?;
        if self.helm.binary.trim().is_empty() {
            return Err(AppError::config_error("helm.binary must not be empty"));
        }
        if let Some(subchart) = self.helm.subcharts.iter().find(|path| path.is_absolute()) {
            return Err(AppError::config_error(format!(
                "helm.subcharts entries must be relative to chart_dir: {}",
                subchart.display()
            )));
        }
        Ok(())
    }

    pub fn release_info(&self) -> ReleaseInfo {
        ReleaseInfo::new(&self.release.name, &self.release.namespace)
    }
}
