use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::AppError;
use crate::domain::schema::{ObjectSchema, ValuesSchema, boolean, free_object, integer_min, string};

/// Connection settings for the Postgres database backing run, event log and
/// schedule storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgreSQL {
    /// Deploy the bundled postgresql subchart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// External host; takes precedence over the bundled service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgresql_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgresql_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgresql_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgresql_database: Option<String>,
    /// Extra libpq connection parameters, passed through as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgresql_params: Option<serde_yaml::Mapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub port: u16,
}

impl PostgreSQL {
    /// The hostname instances connect to, given the release fullname.
    pub fn hostname(&self, fullname: &str) -> Option<String> {
        match self.postgresql_host.as_deref().filter(|host| !host.is_empty()) {
            Some(host) => Some(host.to_string()),
            None if self.enabled.unwrap_or(false) => Some(format!("{fullname}-postgresql")),
            None => None,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(service) = &self.service {
            if service.port == 0 {
                return Err(AppError::invalid_values(
                    "postgresql.service.port",
                    "port must be greater than 0",
                ));
            }
        }
        if !self.enabled.unwrap_or(false)
            && self.postgresql_host.as_deref().is_none_or(|host| host.trim().is_empty())
        {
            return Err(AppError::invalid_values(
                "postgresql.postgresqlHost",
                "postgresqlHost must be set when the bundled postgresql is disabled",
            ));
        }
        if self.postgresql_username.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(AppError::invalid_values(
                "postgresql.postgresqlUsername",
                "postgresqlUsername must not be empty",
            ));
        }
        Ok(())
    }
}

impl ValuesSchema for PostgreSQL {
    fn schema() -> Value {
        // The bundled subchart takes many more keys than the instance config reads.
        ObjectSchema::new("PostgreSQL")
            .optional("enabled", boolean())
            .optional("postgresqlHost", string())
            .optional("postgresqlUsername", string())
            .optional("postgresqlPassword", string())
            .optional("postgresqlDatabase", string())
            .optional("postgresqlParams", free_object())
            .optional("service", Service::schema())
            .open()
            .build()
    }
}

impl ValuesSchema for Service {
    fn schema() -> Value {
        ObjectSchema::new("Service").required("port", integer_min(1)).open().build()
    }
}
