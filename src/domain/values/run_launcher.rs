use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ConfigurableClass;
use crate::domain::AppError;
use crate::domain::schema::{ObjectSchema, ValuesSchema, array_of, boolean, string, string_enum};

/// How runs are launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunLauncherType {
    #[serde(rename = "K8sRunLauncher")]
    K8s,
    #[serde(rename = "CustomRunLauncher")]
    Custom,
}

impl RunLauncherType {
    pub const ALL: [RunLauncherType; 2] = [RunLauncherType::K8s, RunLauncherType::Custom];

    pub fn as_str(self) -> &'static str {
        match self {
            RunLauncherType::K8s => "K8sRunLauncher",
            RunLauncherType::Custom => "CustomRunLauncher",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunLauncher {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RunLauncherType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<RunLauncherConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunLauncherConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k8s_run_launcher: Option<K8sRunLauncherConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_run_launcher: Option<ConfigurableClass>,
}

/// Settings for launching each run as a Kubernetes job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct K8sRunLauncherConfig {
    /// Namespace for run jobs; the release namespace when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_incluster_config: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_config_maps: Option<Vec<EnvSourceRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_secrets: Option<Vec<EnvSourceRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_vars: Option<Vec<String>>,
}

/// Reference to a ConfigMap or Secret whose keys become environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvSourceRef {
    pub name: String,
}

impl EnvSourceRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl RunLauncher {
    pub fn validate(&self) -> Result<(), AppError> {
        let config = self.config.as_ref();
        match self.kind.unwrap_or(RunLauncherType::K8s) {
            RunLauncherType::K8s => config
                .and_then(|config| config.k8s_run_launcher.as_ref())
                .ok_or_else(|| {
                    AppError::invalid_values(
                        "runLauncher.config.k8sRunLauncher",
                        "required when runLauncher.type is K8sRunLauncher",
                    )
                })?
                .validate(),
            RunLauncherType::Custom => config
                .and_then(|config| config.custom_run_launcher.as_ref())
                .ok_or_else(|| {
                    AppError::invalid_values(
                        "runLauncher.config.customRunLauncher",
                        "required when runLauncher.type is CustomRunLauncher",
                    )
                })?
                .validate("runLauncher.config.customRunLauncher"),
        }
    }
}

impl K8sRunLauncherConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.load_incluster_config.unwrap_or(true) && self.kubeconfig_file.is_some() {
            return Err(AppError::invalid_values(
                "runLauncher.config.k8sRunLauncher.kubeconfigFile",
                "kubeconfigFile is set but loadInclusterConfig is true",
            ));
        }
        let mut named = self.env_config_maps.iter().chain(self.env_secrets.iter()).flatten();
        if named.any(|source| source.name.trim().is_empty()) {
            return Err(AppError::invalid_values(
                "runLauncher.config.k8sRunLauncher",
                "envConfigMaps and envSecrets entries need a name",
            ));
        }
        Ok(())
    }
}

impl ValuesSchema for RunLauncher {
    fn schema() -> Value {
        let names: Vec<&str> = RunLauncherType::ALL.iter().map(|kind| kind.as_str()).collect();
        ObjectSchema::new("RunLauncher")
            .required("type", string_enum(&names))
            .required("config", RunLauncherConfig::schema())
            .build()
    }
}

impl ValuesSchema for RunLauncherConfig {
    fn schema() -> Value {
        ObjectSchema::new("RunLauncherConfig")
            .optional("k8sRunLauncher", K8sRunLauncherConfig::schema())
            .optional("customRunLauncher", ConfigurableClass::schema())
            .build()
    }
}

impl ValuesSchema for K8sRunLauncherConfig {
    fn schema() -> Value {
        let env_source = ObjectSchema::new("EnvSource").required("name", string()).open().build();
        ObjectSchema::new("K8sRunLauncherConfig")
            .optional("jobNamespace", string())
            .required("loadInclusterConfig", boolean())
            .optional("kubeconfigFile", string())
            .required("envConfigMaps", array_of(env_source.clone()))
            .required("envSecrets", array_of(env_source))
            .required("envVars", array_of(string()))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_serializes_under_chart_names() {
        let launcher = RunLauncher { kind: Some(RunLauncherType::K8s), config: None };
        assert_eq!(serde_yaml::to_string(&launcher).unwrap(), "type: K8sRunLauncher\n");
    }

    #[test]
    fn custom_launcher_requires_class() {
        let launcher = RunLauncher { kind: Some(RunLauncherType::Custom), config: None };
        let err = launcher.validate().unwrap_err();
        assert!(err.to_string().contains("customRunLauncher"));
    }

    #[test]
    fn k8s_launcher_requires_config_block() {
        let launcher = RunLauncher { kind: None, config: Some(RunLauncherConfig::default()) };
        let err = launcher.validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidValues { .. }));
        assert!(err.to_string().contains("runLauncher.config.k8sRunLauncher"));

        let launcher = RunLauncher {
            kind: Some(RunLauncherType::K8s),
            config: Some(RunLauncherConfig {
                k8s_run_launcher: Some(K8sRunLauncherConfig::default()),
                ..Default::default()
            }),
        };
        assert!(launcher.validate().is_ok());
    }

    #[test]
    fn kubeconfig_conflicts_with_incluster_config() {
        let config = K8sRunLauncherConfig {
            load_incluster_config: Some(true),
            kubeconfig_file: Some("/kube/config".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = K8sRunLauncherConfig { load_incluster_config: Some(false), ..config };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_sources_need_names() {
        let config = K8sRunLauncherConfig {
            env_secrets: Some(vec![EnvSourceRef::new("")]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
