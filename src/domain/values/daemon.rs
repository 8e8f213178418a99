use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ConfigurableClass;
use crate::domain::AppError;
use crate::domain::schema::{
    ObjectSchema, ValuesSchema, array_of, boolean, integer_min, string, string_enum,
};

/// The dagster-daemon deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Daemon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_coordinator: Option<RunCoordinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunCoordinatorType {
    #[serde(rename = "QueuedRunCoordinator")]
    Queued,
    #[serde(rename = "CustomRunCoordinator")]
    Custom,
}

impl RunCoordinatorType {
    pub const ALL: [RunCoordinatorType; 2] = [RunCoordinatorType::Queued, RunCoordinatorType::Custom];

    pub fn as_str(self) -> &'static str {
        match self {
            RunCoordinatorType::Queued => "QueuedRunCoordinator",
            RunCoordinatorType::Custom => "CustomRunCoordinator",
        }
    }
}

/// Decides when submitted runs are handed to the run launcher.
///
/// Only written to the instance when both the daemon and the coordinator are
/// enabled, since queued runs are dequeued by the daemon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunCoordinator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RunCoordinatorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<RunCoordinatorConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCoordinatorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queued_run_coordinator: Option<QueuedRunCoordinatorConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_run_coordinator: Option<ConfigurableClass>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QueuedRunCoordinatorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_runs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_concurrency_limits: Option<Vec<TagConcurrencyLimit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dequeue_interval_seconds: Option<u32>,
}

/// Caps concurrent runs carrying a tag (optionally a specific tag value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagConcurrencyLimit {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub limit: u32,
}

impl TagConcurrencyLimit {
    pub fn new(key: impl Into<String>, value: Option<&str>, limit: u32) -> Self {
        Self { key: key.into(), value: value.map(str::to_string), limit }
    }
}

impl Daemon {
    /// Whether the instance gets a `run_coordinator` section.
    pub fn coordinates_runs(&self) -> bool {
        self.enabled.unwrap_or(false)
            && self.run_coordinator.as_ref().and_then(|coordinator| coordinator.enabled).unwrap_or(false)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        match &self.run_coordinator {
            Some(coordinator) if self.coordinates_runs() => coordinator.validate(),
            _ => Ok(()),
        }
    }
}

impl RunCoordinator {
    pub fn validate(&self) -> Result<(), AppError> {
        let config = self.config.as_ref();
        match self.kind.unwrap_or(RunCoordinatorType::Queued) {
            RunCoordinatorType::Queued => {
                if let Some(queued) = config.and_then(|config| config.queued_run_coordinator.as_ref())
                {
                    queued.validate()?;
                }
                Ok(())
            }
            RunCoordinatorType::Custom => config
                .and_then(|config| config.custom_run_coordinator.as_ref())
                .ok_or_else(|| {
                    AppError::invalid_values(
                        "dagsterDaemon.runCoordinator.config.customRunCoordinator",
                        "required when runCoordinator.type is CustomRunCoordinator",
                    )
                })?
                .validate("dagsterDaemon.runCoordinator.config.customRunCoordinator"),
        }
    }
}

impl QueuedRunCoordinatorConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        const PATH: &str = "dagsterDaemon.runCoordinator.config.queuedRunCoordinator";
        if self.dequeue_interval_seconds == Some(0) {
            return Err(AppError::invalid_values(
                format!("{PATH}.dequeueIntervalSeconds"),
                "dequeueIntervalSeconds must be greater than 0",
            ));
        }
        for limit in self.tag_concurrency_limits.iter().flatten() {
            if limit.key.trim().is_empty() {
                return Err(AppError::invalid_values(
                    format!("{PATH}.tagConcurrencyLimits"),
                    "tag concurrency limits need a key",
                ));
            }
        }
        Ok(())
    }
}

impl ValuesSchema for Daemon {
    fn schema() -> Value {
        // The daemon deployment itself (image, resources, ...) is configured
        // alongside these keys.
        ObjectSchema::new("Daemon")
            .optional("enabled", boolean())
            .optional("runCoordinator", RunCoordinator::schema())
            .open()
            .build()
    }
}

impl ValuesSchema for RunCoordinator {
    fn schema() -> Value {
        let names: Vec<&str> = RunCoordinatorType::ALL.iter().map(|kind| kind.as_str()).collect();
        ObjectSchema::new("RunCoordinator")
            .required("enabled", boolean())
            .required("type", string_enum(&names))
            .required("config", RunCoordinatorConfig::schema())
            .build()
    }
}

impl ValuesSchema for RunCoordinatorConfig {
    fn schema() -> Value {
        ObjectSchema::new("RunCoordinatorConfig")
            .optional("queuedRunCoordinator", QueuedRunCoordinatorConfig::schema())
            .optional("customRunCoordinator", ConfigurableClass::schema())
            .build()
    }
}

impl ValuesSchema for QueuedRunCoordinatorConfig {
    fn schema() -> Value {
        ObjectSchema::new("QueuedRunCoordinatorConfig")
            .optional("maxConcurrentRuns", integer_min(0))
            .optional("tagConcurrencyLimits", array_of(TagConcurrencyLimit::schema()))
            .optional("dequeueIntervalSeconds", integer_min(1))
            .build()
    }
}

impl ValuesSchema for TagConcurrencyLimit {
    fn schema() -> Value {
        ObjectSchema::new("TagConcurrencyLimit")
            .required("key", string())
            .optional("value", string())
            .required("limit", integer_min(0))
            .build()
    }
}
