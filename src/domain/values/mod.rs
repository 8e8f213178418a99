//! Typed chart values.
//!
//! Every field is optional so callers can describe only the settings a
//! scenario cares about; anything left unset falls back to the chart's
//! `values.yaml` once the values are merged.

mod compute_log_manager;
mod configurable_class;
mod daemon;
pub mod merge;
mod postgresql;
mod run_launcher;
mod scheduler;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::AppError;
use crate::domain::release::{MAX_NAME_LEN, check_dns_label};
use crate::domain::schema::{ObjectSchema, ValuesSchema, boolean, string};

pub use compute_log_manager::{
    AzureBlobComputeLogManager, ComputeLogManager, ComputeLogManagerConfig, ComputeLogManagerType,
    GCSComputeLogManager, S3ComputeLogManager,
};
pub use configurable_class::ConfigurableClass;
pub use daemon::{
    Daemon, QueuedRunCoordinatorConfig, RunCoordinator, RunCoordinatorConfig, RunCoordinatorType,
    TagConcurrencyLimit,
};
pub use postgresql::{PostgreSQL, Service};
pub use run_launcher::{
    EnvSourceRef, K8sRunLauncherConfig, RunLauncher, RunLauncherConfig, RunLauncherType,
};
pub use scheduler::{Scheduler, SchedulerConfig, SchedulerType};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DagsterHelmValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account: Option<ServiceAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgresql: Option<PostgreSQL>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_launcher: Option<RunLauncher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dagster_daemon: Option<Daemon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<Scheduler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_log_manager: Option<ComputeLogManager>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ServiceAccount {
    /// The service account run pods use, given the release fullname.
    pub fn resolved_name(&self, fullname: &str) -> String {
        match self.name.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None if self.create.unwrap_or(true) => fullname.to_string(),
            None => "default".to_string(),
        }
    }
}

impl DagsterHelmValues {
    /// Serialize to the YAML shape Helm reads from a values file.
    pub fn to_yaml_value(&self) -> Result<serde_yaml::Value, AppError> {
        Ok(serde_yaml::to_value(self)?)
    }

    /// Read values back from a (merged) YAML document.
    pub fn from_yaml_value(value: serde_yaml::Value) -> Result<Self, AppError> {
        Ok(serde_yaml::from_value(value)?)
    }

    /// Check the values the way the chart's schema and instance would.
    ///
    /// Meant for values already merged over the chart defaults: a partial
    /// values object legitimately leaves required settings to `values.yaml`.
    pub fn validate(&self) -> Result<(), AppError> {
        // Both end up in object names and labels.
        let overrides =
            [("nameOverride", &self.name_override), ("fullnameOverride", &self.fullname_override)];
        for (path, value) in overrides {
            if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
                check_dns_label(value, MAX_NAME_LEN)
                    .map_err(|reason| AppError::invalid_values(path, reason))?;
            }
        }
        if let Some(postgresql) = &self.postgresql {
            postgresql.validate()?;
        }
        if let Some(run_launcher) = &self.run_launcher {
            run_launcher.validate()?;
        }
        if let Some(daemon) = &self.dagster_daemon {
            daemon.validate()?;
        }
        if let Some(scheduler) = &self.scheduler {
            scheduler.validate()?;
        }
        if let Some(compute_log_manager) = &self.compute_log_manager {
            compute_log_manager.validate()?;
        }
        Ok(())
    }
}

impl ValuesSchema for DagsterHelmValues {
    fn schema() -> Value {
        // The chart carries many more top-level keys (dagit, user deployments,
        // ingress, ...) than the instance config consumes.
        ObjectSchema::new("DagsterHelmValues")
            .optional("nameOverride", string())
            .optional("fullnameOverride", string())
            .optional("serviceAccount", ServiceAccount::schema())
            .required("postgresql", PostgreSQL::schema())
            .required("runLauncher", RunLauncher::schema())
            .required("dagsterDaemon", Daemon::schema())
            .required("scheduler", Scheduler::schema())
            .required("computeLogManager", ComputeLogManager::schema())
            .open()
            .build()
    }
}

impl ValuesSchema for ServiceAccount {
    fn schema() -> Value {
        ObjectSchema::new("ServiceAccount")
            .optional("create", boolean())
            .optional("name", string())
            .open()
            .build()
    }
}
