mod common;

use common::{mapping_keys, render_instance_doc};
use dagster_chart::DagsterHelmValues;
use dagster_chart::domain::instance::{
    AZURE_BLOB_COMPUTE_LOG_MANAGER, GCS_COMPUTE_LOG_MANAGER, S3_COMPUTE_LOG_MANAGER,
};
use dagster_chart::values::{
    AzureBlobComputeLogManager, ComputeLogManager, ComputeLogManagerConfig, ComputeLogManagerType,
    ConfigurableClass, GCSComputeLogManager, S3ComputeLogManager,
};
use serde_yaml::Value;
use std::collections::BTreeSet;

fn manager_values(kind: ComputeLogManagerType, config: ComputeLogManagerConfig) -> DagsterHelmValues {
    DagsterHelmValues {
        compute_log_manager: Some(ComputeLogManager { kind: Some(kind), config: Some(config) }),
        ..Default::default()
    }
}

fn key_set(value: &Value) -> BTreeSet<String> {
    mapping_keys(value).into_iter().collect()
}

fn field_set(fields: &[&str]) -> BTreeSet<String> {
    fields.iter().map(|field| field.to_string()).collect()
}

#[test]
fn noop_and_local_managers_render_noop() {
    for kind in [ComputeLogManagerType::NoOp, ComputeLogManagerType::Local] {
        let values = DagsterHelmValues {
            compute_log_manager: Some(ComputeLogManager { kind: Some(kind), config: None }),
            ..Default::default()
        };
        let instance = render_instance_doc(&values);
        assert_eq!(
            instance.class_of("compute_logs"),
            Some(("dagster.core.storage.noop_compute_log_manager", "NoOpComputeLogManager")),
            "{}",
            kind.as_str()
        );
    }
}

#[test]
fn azure_blob_compute_log_manager() {
    let values = manager_values(
        ComputeLogManagerType::AzureBlob,
        ComputeLogManagerConfig {
            azure_blob_compute_log_manager: Some(AzureBlobComputeLogManager {
                storage_account: "account".to_string(),
                container: "container".to_string(),
                secret_key: "secret_key".to_string(),
                local_dir: Some("/dir".to_string()),
                prefix: Some("prefix".to_string()),
            }),
            ..Default::default()
        },
    );
    let instance = render_instance_doc(&values);

    assert_eq!(
        instance.class_of("compute_logs"),
        Some(("dagster_azure.blob.compute_log_manager", "AzureBlobComputeLogManager"))
    );
    let config = instance.config_of("compute_logs").unwrap();
    assert_eq!(
        config,
        &serde_yaml::from_str::<Value>(
            "storage_account: account\ncontainer: container\nsecret_key: secret_key\nlocal_dir: /dir\nprefix: prefix\n"
        )
        .unwrap()
    );
    assert_eq!(key_set(config), field_set(AZURE_BLOB_COMPUTE_LOG_MANAGER.config_fields));
}

#[test]
fn gcs_compute_log_manager() {
    let values = manager_values(
        ComputeLogManagerType::Gcs,
        ComputeLogManagerConfig {
            gcs_compute_log_manager: Some(GCSComputeLogManager {
                bucket: "bucket".to_string(),
                local_dir: Some("/dir".to_string()),
                prefix: Some("prefix".to_string()),
            }),
            ..Default::default()
        },
    );
    let instance = render_instance_doc(&values);

    assert_eq!(
        instance.class_of("compute_logs"),
        Some(("dagster_gcp.gcs.compute_log_manager", "GCSComputeLogManager"))
    );
    let config = instance.config_of("compute_logs").unwrap();
    assert_eq!(
        config,
        &serde_yaml::from_str::<Value>("bucket: bucket\nlocal_dir: /dir\nprefix: prefix\n").unwrap()
    );
    assert_eq!(key_set(config), field_set(GCS_COMPUTE_LOG_MANAGER.config_fields));
}

#[test]
fn s3_compute_log_manager() {
    let values = manager_values(
        ComputeLogManagerType::S3,
        ComputeLogManagerConfig {
            s3_compute_log_manager: Some(S3ComputeLogManager {
                bucket: "bucket".to_string(),
                local_dir: Some("/dir".to_string()),
                prefix: Some("prefix".to_string()),
                use_ssl: Some(true),
                verify: Some(true),
                verify_cert_path: Some("/path".to_string()),
                endpoint_url: Some("endpoint.com".to_string()),
                skip_empty_files: Some(true),
            }),
            ..Default::default()
        },
    );
    let instance = render_instance_doc(&values);

    assert_eq!(
        instance.class_of("compute_logs"),
        Some(("dagster_aws.s3.compute_log_manager", "S3ComputeLogManager"))
    );
    let config = instance.config_of("compute_logs").unwrap();
    assert_eq!(
        config,
        &serde_yaml::from_str::<Value>(
            "bucket: bucket\nlocal_dir: /dir\nprefix: prefix\nuse_ssl: true\nverify: true\nverify_cert_path: /path\nendpoint_url: endpoint.com\nskip_empty_files: true\n"
        )
        .unwrap()
    );
    assert_eq!(key_set(config), field_set(S3_COMPUTE_LOG_MANAGER.config_fields));
}

#[test]
fn s3_without_its_config_block_is_rejected() {
    let values = manager_values(ComputeLogManagerType::S3, ComputeLogManagerConfig::default());
    let err = dagster_chart::render_instance(&values).unwrap_err();
    assert!(err.to_string().contains("s3ComputeLogManager"), "unexpected error: {err}");
}

#[test]
fn custom_compute_log_manager_config() {
    let values = manager_values(
        ComputeLogManagerType::Custom,
        ComputeLogManagerConfig {
            custom_compute_log_manager: Some(
                ConfigurableClass::new("a_module", "Class")
                    .with_config("config_field_one", "1")
                    .with_config("config_field_two", "two"),
            ),
            ..Default::default()
        },
    );
    let instance = render_instance_doc(&values);

    assert_eq!(instance.class_of("compute_logs"), Some(("a_module", "Class")));
    assert_eq!(
        instance.config_of("compute_logs").unwrap(),
        &serde_yaml::from_str::<Value>("config_field_one: '1'\nconfig_field_two: two\n").unwrap()
    );
}
