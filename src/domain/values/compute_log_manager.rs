use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ConfigurableClass;
use crate::domain::AppError;
use crate::domain::schema::{ObjectSchema, ValuesSchema, boolean, string, string_enum};

/// Where step stdout/stderr is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComputeLogManagerType {
    #[serde(rename = "NoOpComputeLogManager")]
    NoOp,
    /// Rendered as a no-op manager: local files die with the run pod.
    #[serde(rename = "LocalComputeLogManager")]
    Local,
    #[serde(rename = "AzureBlobComputeLogManager")]
    AzureBlob,
    #[serde(rename = "GCSComputeLogManager")]
    Gcs,
    #[serde(rename = "S3ComputeLogManager")]
    S3,
    #[serde(rename = "CustomComputeLogManager")]
    Custom,
}

impl ComputeLogManagerType {
    pub const ALL: [ComputeLogManagerType; 6] = [
        ComputeLogManagerType::NoOp,
        ComputeLogManagerType::Local,
        ComputeLogManagerType::AzureBlob,
        ComputeLogManagerType::Gcs,
        ComputeLogManagerType::S3,
        ComputeLogManagerType::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComputeLogManagerType::NoOp => "NoOpComputeLogManager",
            ComputeLogManagerType::Local => "LocalComputeLogManager",
            ComputeLogManagerType::AzureBlob => "AzureBlobComputeLogManager",
            ComputeLogManagerType::Gcs => "GCSComputeLogManager",
            ComputeLogManagerType::S3 => "S3ComputeLogManager",
            ComputeLogManagerType::Custom => "CustomComputeLogManager",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputeLogManager {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ComputeLogManagerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ComputeLogManagerConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeLogManagerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_blob_compute_log_manager: Option<AzureBlobComputeLogManager>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcs_compute_log_manager: Option<GCSComputeLogManager>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_compute_log_manager: Option<S3ComputeLogManager>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_compute_log_manager: Option<ConfigurableClass>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AzureBlobComputeLogManager {
    pub storage_account: String,
    pub container: String,
    pub secret_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GCSComputeLogManager {
    pub bucket: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct S3ComputeLogManager {
    pub bucket: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_cert_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_empty_files: Option<bool>,
}

impl ComputeLogManager {
    pub fn validate(&self) -> Result<(), AppError> {
        let config = self.config.as_ref();
        let missing = |field: &str, kind: ComputeLogManagerType| {
            AppError::invalid_values(
                format!("computeLogManager.config.{field}"),
                format!("required when computeLogManager.type is {}", kind.as_str()),
            )
        };

        match self.kind.unwrap_or(ComputeLogManagerType::NoOp) {
            ComputeLogManagerType::NoOp | ComputeLogManagerType::Local => Ok(()),
            kind @ ComputeLogManagerType::AzureBlob => {
                let azure = config
                    .and_then(|config| config.azure_blob_compute_log_manager.as_ref())
                    .ok_or_else(|| missing("azureBlobComputeLogManager", kind))?;
                require_non_empty(
                    "computeLogManager.config.azureBlobComputeLogManager.storageAccount",
                    &azure.storage_account,
                )?;
                require_non_empty(
                    "computeLogManager.config.azureBlobComputeLogManager.container",
                    &azure.container,
                )
            }
            kind @ ComputeLogManagerType::Gcs => {
                let gcs = config
                    .and_then(|config| config.gcs_compute_log_manager.as_ref())
                    .ok_or_else(|| missing("gcsComputeLogManager", kind))?;
                require_non_empty("computeLogManager.config.gcsComputeLogManager.bucket", &gcs.bucket)
            }
            kind @ ComputeLogManagerType::S3 => {
                let s3 = config
                    .and_then(|config| config.s3_compute_log_manager.as_ref())
                    .ok_or_else(|| missing("s3ComputeLogManager", kind))?;
                require_non_empty("computeLogManager.config.s3ComputeLogManager.bucket", &s3.bucket)
            }
            kind @ ComputeLogManagerType::Custom => config
                .and_then(|config| config.custom_compute_log_manager.as_ref())
                .ok_or_else(|| missing("customComputeLogManager", kind))?
                .validate("computeLogManager.config.customComputeLogManager"),
        }
    }
}

fn require_non_empty(path: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_values(path, "must not be empty"));
    }
    Ok(())
}

impl ValuesSchema for ComputeLogManager {
    fn schema() -> Value {
        let names: Vec<&str> =
            ComputeLogManagerType::ALL.iter().map(|kind| kind.as_str()).collect();
        ObjectSchema::new("ComputeLogManager")
            .required("type", string_enum(&names))
            .optional("config", ComputeLogManagerConfig::schema())
            .build()
    }
}

impl ValuesSchema for ComputeLogManagerConfig {
    fn schema() -> Value {
        ObjectSchema::new("ComputeLogManagerConfig")
            .optional("azureBlobComputeLogManager", AzureBlobComputeLogManager::schema())
            .optional("gcsComputeLogManager", GCSComputeLogManager::schema())
            .optional("s3ComputeLogManager", S3ComputeLogManager::schema())
            .optional("customComputeLogManager", ConfigurableClass::schema())
            .build()
    }
}

impl ValuesSchema for AzureBlobComputeLogManager {
    fn schema() -> Value {
        ObjectSchema::new("AzureBlobComputeLogManager")
            .required("storageAccount", string())
            .required("container", string())
            .required("secretKey", string())
            .optional("localDir", string())
            .optional("prefix", string())
            .build()
    }
}

impl ValuesSchema for GCSComputeLogManager {
    fn schema() -> Value {
        ObjectSchema::new("GCSComputeLogManager")
            .required("bucket", string())
            .optional("localDir", string())
            .optional("prefix", string())
            .build()
    }
}

impl ValuesSchema for S3ComputeLogManager {
    fn schema() -> Value {
        ObjectSchema::new("S3ComputeLogManager")
            .required("bucket", string())
            .optional("localDir", string())
            .optional("prefix", string())
            .optional("useSsl", boolean())
            .optional("verify", boolean())
            .optional("verifyCertPath", string())
            .optional("endpointUrl", string())
            .optional("skipEmptyFiles", boolean())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_manager_needs_no_config() {
        let manager = ComputeLogManager { kind: Some(ComputeLogManagerType::Local), config: None };
        assert!(manager.validate().is_ok());
    }

    #[test]
    fn s3_manager_requires_its_config_block() {
        let manager = ComputeLogManager {
            kind: Some(ComputeLogManagerType::S3),
            config: Some(ComputeLogManagerConfig {
                gcs_compute_log_manager: Some(GCSComputeLogManager {
                    bucket: "bucket".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
        };
        let err = manager.validate().unwrap_err();
        assert!(err.to_string().contains("computeLogManager.config.s3ComputeLogManager"));
        assert!(err.to_string().contains("S3ComputeLogManager"));
    }

    #[test]
    fn blank_bucket_is_rejected() {
        let manager = ComputeLogManager {
            kind: Some(ComputeLogManagerType::Gcs),
            config: Some(ComputeLogManagerConfig {
                gcs_compute_log_manager: Some(GCSComputeLogManager::default()),
                ..Default::default()
            }),
        };
        assert!(manager.validate().is_err());
    }

    #[test]
    fn unknown_s3_fields_are_rejected() {
        let result: Result<S3ComputeLogManager, _> =
            serde_yaml::from_str("bucket: logs\nregion: eu-west-1\n");
        assert!(result.is_err());
    }

    #[test]
    fn gcs_type_uses_upper_case_chart_name() {
        let kind: ComputeLogManagerType = serde_yaml::from_str("GCSComputeLogManager").unwrap();
        assert_eq!(kind, ComputeLogManagerType::Gcs);
    }
}
