use crate::domain::casing::to_camel_case;

/// A class the orchestrator instantiates from `dagster.yaml`, together with
/// the config fields it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSpec {
    pub module: &'static str,
    pub class: &'static str,
    /// Accepted config keys, snake_case, in declaration order.
    pub config_fields: &'static [&'static str],
}

impl ClassSpec {
    /// Config field names as they appear in chart values.
    pub fn values_fields(&self) -> Vec<String> {
        self.config_fields.iter().map(|field| to_camel_case(field)).collect()
    }

    pub fn accepts(&self, field: &str) -> bool {
        self.config_fields.contains(&field)
    }
}

const POSTGRES_STORAGE_FIELDS: &[&str] = &["postgres_db"];

pub const POSTGRES_SCHEDULE_STORAGE: ClassSpec = ClassSpec {
    module: "dagster_postgres.schedule_storage",
    class: "PostgresScheduleStorage",
    config_fields: POSTGRES_STORAGE_FIELDS,
};

pub const POSTGRES_RUN_STORAGE: ClassSpec = ClassSpec {
    module: "dagster_postgres.run_storage",
    class: "PostgresRunStorage",
    config_fields: POSTGRES_STORAGE_FIELDS,
};

pub const POSTGRES_EVENT_LOG_STORAGE: ClassSpec = ClassSpec {
    module: "dagster_postgres.event_log",
    class: "PostgresEventLogStorage",
    config_fields: POSTGRES_STORAGE_FIELDS,
};

pub const K8S_RUN_LAUNCHER: ClassSpec = ClassSpec {
    module: "dagster_k8s",
    class: "K8sRunLauncher",
    config_fields: &[
        "load_incluster_config",
        "kubeconfig_file",
        "job_namespace",
        "service_account_name",
        "dagster_home",
        "instance_config_map",
        "postgres_password_secret",
        "env_config_maps",
        "env_secrets",
        "env_vars",
    ],
};

pub const QUEUED_RUN_COORDINATOR: ClassSpec = ClassSpec {
    module: "dagster.core.run_coordinator",
    class: "QueuedRunCoordinator",
    config_fields: &["max_concurrent_runs", "tag_concurrency_limits", "dequeue_interval_seconds"],
};

pub const DAGSTER_DAEMON_SCHEDULER: ClassSpec = ClassSpec {
    module: "dagster.core.scheduler",
    class: "DagsterDaemonScheduler",
    config_fields: &[],
};

pub const NOOP_COMPUTE_LOG_MANAGER: ClassSpec = ClassSpec {
    module: "dagster.core.storage.noop_compute_log_manager",
    class: "NoOpComputeLogManager",
    config_fields: &[],
};

pub const AZURE_BLOB_COMPUTE_LOG_MANAGER: ClassSpec = ClassSpec {
    module: "dagster_azure.blob.compute_log_manager",
    class: "AzureBlobComputeLogManager",
    config_fields: &["storage_account", "container", "secret_key", "local_dir", "prefix"],
};

pub const GCS_COMPUTE_LOG_MANAGER: ClassSpec = ClassSpec {
    module: "dagster_gcp.gcs.compute_log_manager",
    class: "GCSComputeLogManager",
    config_fields: &["bucket", "local_dir", "prefix"],
};

pub const S3_COMPUTE_LOG_MANAGER: ClassSpec = ClassSpec {
    module: "dagster_aws.s3.compute_log_manager",
    class: "S3ComputeLogManager",
    config_fields: &[
        "bucket",
        "local_dir",
        "prefix",
        "use_ssl",
        "verify",
        "verify_cert_path",
        "endpoint_url",
        "skip_empty_files",
    ],
};

pub const BUILTIN_CLASSES: &[ClassSpec] = &[
    POSTGRES_SCHEDULE_STORAGE,
    POSTGRES_RUN_STORAGE,
    POSTGRES_EVENT_LOG_STORAGE,
    K8S_RUN_LAUNCHER,
    QUEUED_RUN_COORDINATOR,
    DAGSTER_DAEMON_SCHEDULER,
    NOOP_COMPUTE_LOG_MANAGER,
    AZURE_BLOB_COMPUTE_LOG_MANAGER,
    GCS_COMPUTE_LOG_MANAGER,
    S3_COMPUTE_LOG_MANAGER,
];

/// Look up a built-in class by module and class name.
pub fn find_class(module: &str, class: &str) -> Option<&'static ClassSpec> {
    BUILTIN_CLASSES.iter().find(|spec| spec.module == module && spec.class == class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_fields_are_camel_cased() {
        assert_eq!(
            S3_COMPUTE_LOG_MANAGER.values_fields(),
            vec![
                "bucket",
                "localDir",
                "prefix",
                "useSsl",
                "verify",
                "verifyCertPath",
                "endpointUrl",
                "skipEmptyFiles"
            ]
        );
    }

    #[test]
    fn finds_builtin_classes_by_module_and_class() {
        let spec = find_class("dagster_k8s", "K8sRunLauncher").unwrap();
        assert!(spec.accepts("env_config_maps"));
        assert!(find_class("dagster_k8s", "CeleryK8sRunLauncher").is_none());
    }
}
