use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ConfigurableClass;
use crate::domain::AppError;
use crate::domain::schema::{ObjectSchema, ValuesSchema, string_enum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerType {
    #[serde(rename = "DagsterDaemonScheduler")]
    Daemon,
    #[serde(rename = "CustomScheduler")]
    Custom,
}

impl SchedulerType {
    pub const ALL: [SchedulerType; 2] = [SchedulerType::Daemon, SchedulerType::Custom];

    pub fn as_str(self) -> &'static str {
        match self {
            SchedulerType::Daemon => "DagsterDaemonScheduler",
            SchedulerType::Custom => "CustomScheduler",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scheduler {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SchedulerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<SchedulerConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_scheduler: Option<ConfigurableClass>,
}

impl Scheduler {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.kind != Some(SchedulerType::Custom) {
            return Ok(());
        }
        self.config
            .as_ref()
            .and_then(|config| config.custom_scheduler.as_ref())
            .ok_or_else(|| {
                AppError::invalid_values(
                    "scheduler.config.customScheduler",
                    "required when scheduler.type is CustomScheduler",
                )
            })?
            .validate("scheduler.config.customScheduler")
    }
}

impl ValuesSchema for Scheduler {
    fn schema() -> Value {
        let names: Vec<&str> = SchedulerType::ALL.iter().map(|kind| kind.as_str()).collect();
        ObjectSchema::new("Scheduler")
            .required("type", string_enum(&names))
            .required(
                "config",
                ObjectSchema::new("SchedulerConfig")
                    .optional("customScheduler", ConfigurableClass::schema())
                    .build(),
            )
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daemon_scheduler_needs_no_config() {
        let scheduler = Scheduler { kind: Some(SchedulerType::Daemon), config: None };
        assert!(scheduler.validate().is_ok());
    }

    #[test]
    fn custom_scheduler_requires_class() {
        let scheduler = Scheduler {
            kind: Some(SchedulerType::Custom),
            config: Some(SchedulerConfig::default()),
        };
        assert!(scheduler.validate().is_err());
    }
}
