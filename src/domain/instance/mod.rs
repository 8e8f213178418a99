//! Configurable classes the chart writes into `dagster.yaml`.

mod classes;
mod document;

pub use classes::{
    AZURE_BLOB_COMPUTE_LOG_MANAGER, BUILTIN_CLASSES, ClassSpec, DAGSTER_DAEMON_SCHEDULER,
    GCS_COMPUTE_LOG_MANAGER, K8S_RUN_LAUNCHER, NOOP_COMPUTE_LOG_MANAGER,
    POSTGRES_EVENT_LOG_STORAGE, POSTGRES_RUN_STORAGE, POSTGRES_SCHEDULE_STORAGE,
    QUEUED_RUN_COORDINATOR, S3_COMPUTE_LOG_MANAGER, find_class,
};
pub use document::{CLASS_SECTIONS, InstanceDocument};

/// Environment variable holding the Postgres password in every Dagster pod.
pub const PG_PASSWORD_ENV: &str = "DAGSTER_PG_PASSWORD";

/// Environment variable pointing at the Dagster home directory.
pub const DAGSTER_HOME_ENV: &str = "DAGSTER_HOME";

/// Environment variable naming the instance ConfigMap for launched runs.
pub const INSTANCE_CONFIG_MAP_ENV: &str = "DAGSTER_K8S_INSTANCE_CONFIG_MAP";

/// Environment variable naming the Postgres password secret for launched runs.
pub const PG_PASSWORD_SECRET_ENV: &str = "DAGSTER_K8S_PG_PASSWORD_SECRET";

/// Environment variable naming the ConfigMap injected into every run pod.
pub const RUN_ENV_CONFIG_MAP_ENV: &str = "DAGSTER_K8S_PIPELINE_RUN_ENV_CONFIGMAP";
