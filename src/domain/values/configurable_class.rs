use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::AppError;
use crate::domain::schema::{ObjectSchema, ValuesSchema, string};

/// An arbitrary `module` / `class` / `config` triple.
///
/// Custom variants of every pluggable subsystem use this shape. The config is
/// handed to the orchestrator verbatim and is not checked against any
/// built-in schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurableClass {
    pub module: String,
    pub class: String,
    #[serde(default)]
    pub config: serde_yaml::Mapping,
}

impl ConfigurableClass {
    pub fn new(module: impl Into<String>, class: impl Into<String>) -> Self {
        Self { module: module.into(), class: class.into(), config: serde_yaml::Mapping::new() }
    }

    pub fn with_config<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<serde_yaml::Value>,
        V: Into<serde_yaml::Value>,
    {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self, path: &str) -> Result<(), AppError> {
        if self.module.trim().is_empty() {
            return Err(AppError::invalid_values(
                format!("{path}.module"),
                "module must not be empty",
            ));
        }
        if self.class.trim().is_empty() {
            return Err(AppError::invalid_values(format!("{path}.class"), "class must not be empty"));
        }
        Ok(())
    }
}

impl ValuesSchema for ConfigurableClass {
    fn schema() -> Value {
        ObjectSchema::new("ConfigurableClass")
            .required("module", string())
            .required("class", string())
            .required("config", json!({ "type": "object" }))
            .build()
    }
}
