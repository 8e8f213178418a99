mod common;

use common::TestContext;
use dagster_chart::values::{
    ComputeLogManager, ComputeLogManagerConfig, ComputeLogManagerType, ConfigurableClass, Daemon,
    QueuedRunCoordinatorConfig, RunCoordinator, RunCoordinatorConfig, RunCoordinatorType,
    S3ComputeLogManager, TagConcurrencyLimit,
};
use dagster_chart::{DagsterHelmValues, render_instance};
use std::fs;
use yamllint_rs::{FileProcessor, ProcessingOptions, Severity};

fn scenarios() -> Vec<(&'static str, DagsterHelmValues)> {
    vec![
        ("defaults", DagsterHelmValues::default()),
        (
            "queued-s3",
            DagsterHelmValues {
                dagster_daemon: Some(Daemon {
                    run_coordinator: Some(RunCoordinator {
                        enabled: Some(true),
                        kind: Some(RunCoordinatorType::Queued),
                        config: Some(RunCoordinatorConfig {
                            queued_run_coordinator: Some(QueuedRunCoordinatorConfig {
                                max_concurrent_runs: Some(25),
                                tag_concurrency_limits: Some(vec![TagConcurrencyLimit::new(
                                    "team", None, 2,
                                )]),
                                dequeue_interval_seconds: None,
                            }),
                            ..Default::default()
                        }),
                    }),
                    ..Default::default()
                }),
                compute_log_manager: Some(ComputeLogManager {
                    kind: Some(ComputeLogManagerType::S3),
                    config: Some(ComputeLogManagerConfig {
                        s3_compute_log_manager: Some(S3ComputeLogManager {
                            bucket: "logs".to_string(),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }),
                }),
                ..Default::default()
            },
        ),
        (
            "custom-compute-logs",
            DagsterHelmValues {
                compute_log_manager: Some(ComputeLogManager {
                    kind: Some(ComputeLogManagerType::Custom),
                    config: Some(ComputeLogManagerConfig {
                        custom_compute_log_manager: Some(
                            ConfigurableClass::new("a_module", "Class").with_config("nested", "x: y"),
                        ),
                        ..Default::default()
                    }),
                }),
                ..Default::default()
            },
        ),
    ]
}

#[test]
fn rendered_instances_pass_yaml_lint() {
    let ctx = TestContext::new();

    let mut files = Vec::new();
    for (name, values) in scenarios() {
        let config_maps = render_instance(&values).unwrap();
        for config_map in config_maps {
            let path = ctx.work_dir().join(format!("{}-dagster.yaml", name));
            fs::write(&path, config_map.instance_yaml().unwrap()).unwrap();
            files.push(path);
        }
    }
    assert!(!files.is_empty(), "no instance files rendered");

    let mut config = yamllint_rs::config::Config::new();
    config.set_rule_enabled("line-length", false);
    config.set_rule_enabled("indentation", false);
    config.set_rule_enabled("truthy", false);
    config.set_rule_enabled("document-start", false);
    config.set_rule_enabled("comments", false);

    let processor = FileProcessor::with_config(ProcessingOptions::default(), config);

    let mut errors = Vec::new();
    for file in files {
        match processor.process_file(&file) {
            Ok(result) => {
                let issues: Vec<_> = result
                    .issues
                    .iter()
                    .filter(|(issue, _)| issue.severity == Severity::Error)
                    .collect();

                if !issues.is_empty() {
                    let mut msg = format!("\n  {}:", file.display());
                    for (issue, line) in &issues {
                        msg.push_str(&format!("\n    L{}: {} - {}", issue.line, issue.message, line));
                    }
                    errors.push(msg);
                }
            }
            Err(e) => {
                errors.push(format!("\n  {}: failed to lint - {}", file.display(), e));
            }
        }
    }

    assert!(errors.is_empty(), "YAML lint errors:{}", errors.join(""));
}
