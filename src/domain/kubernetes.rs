//! The slice of the Kubernetes object model the chart renders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::AppError;
use crate::domain::instance::InstanceDocument;

/// Data key holding the instance configuration.
pub const INSTANCE_DATA_KEY: &str = "dagster.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMap {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl ConfigMap {
    /// Raw `dagster.yaml` text.
    pub fn instance_yaml(&self) -> Result<&str, AppError> {
        self.data.get(INSTANCE_DATA_KEY).map(String::as_str).ok_or_else(|| {
            AppError::InvalidManifest(format!(
                "ConfigMap '{}' has no '{}' key",
                self.metadata.name, INSTANCE_DATA_KEY
            ))
        })
    }

    /// Parsed `dagster.yaml`.
    pub fn instance(&self) -> Result<InstanceDocument, AppError> {
        InstanceDocument::parse(self.instance_yaml()?)
    }

    /// SHA-256 of `dagster.yaml`, as used for `checksum/dagster-instance`
    /// pod annotations so deployments roll when the instance changes.
    pub fn instance_checksum(&self) -> Result<String, AppError> {
        let mut hasher = Sha256::new();
        hasher.update(self.instance_yaml()?.as_bytes());
        let digest = hasher.finalize();
        Ok(digest.iter().map(|byte| format!("{:02x}", byte)).collect())
    }
}

/// Split a rendered multi-document manifest into ConfigMaps.
///
/// Empty documents (Helm emits them for templates that render nothing) are
/// skipped; any other object kind is an error.
pub fn parse_config_maps(manifest: &str) -> Result<Vec<ConfigMap>, AppError> {
    let mut config_maps = Vec::new();
    for document in serde_yaml::Deserializer::from_str(manifest) {
        let value = serde_yaml::Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }
        let kind = value.get("kind").and_then(serde_yaml::Value::as_str).unwrap_or_default();
        if kind != "ConfigMap" {
            return Err(AppError::InvalidManifest(format!(
                "expected a ConfigMap, found kind '{}'",
                kind
            )));
        }
        config_maps.push(serde_yaml::from_value(value)?);
    }
    Ok(config_maps)
}
