use serde_yaml::Value;

use super::find_class;
use crate::domain::AppError;

/// Top-level sections of `dagster.yaml` that hold a configurable class.
pub const CLASS_SECTIONS: &[&str] = &[
    "scheduler",
    "schedule_storage",
    "run_storage",
    "event_log_storage",
    "run_coordinator",
    "run_launcher",
    "compute_logs",
];

/// A parsed `dagster.yaml`.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceDocument {
    root: Value,
}

impl InstanceDocument {
    pub fn parse(text: &str) -> Result<Self, AppError> {
        let root: Value = serde_yaml::from_str(text)?;
        if !root.is_mapping() {
            return Err(AppError::InvalidManifest(
                "dagster.yaml must be a mapping of instance sections".to_string(),
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn contains(&self, section: &str) -> bool {
        self.root.get(section).is_some()
    }

    pub fn section(&self, section: &str) -> Option<&Value> {
        self.root.get(section)
    }

    /// `module` and `class` of a configurable section.
    pub fn class_of(&self, section: &str) -> Option<(&str, &str)> {
        let value = self.section(section)?;
        let module = value.get("module")?.as_str()?;
        let class = value.get("class")?.as_str()?;
        Some((module, class))
    }

    /// `config` of a configurable section.
    pub fn config_of(&self, section: &str) -> Option<&Value> {
        self.section(section)?.get("config")
    }

    /// Every section naming a built-in class may only use config keys that
    /// class accepts. Custom classes are not checked.
    pub fn check_builtin_fields(&self) -> Result<(), AppError> {
        for section in CLASS_SECTIONS {
            let Some((module, class)) = self.class_of(section) else {
                continue;
            };
            let Some(spec) = find_class(module, class) else {
                continue;
            };
            let Some(config) = self.config_of(section).and_then(Value::as_mapping) else {
                continue;
            };
            for key in config.keys() {
                let key = key.as_str().unwrap_or_default();
                if !spec.accepts(key) {
                    return Err(AppError::InvalidManifest(format!(
                        "{section}: {class} does not accept config field '{key}'"
                    )));
                }
            }
        }
        Ok(())
    }
}
