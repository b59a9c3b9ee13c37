// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::backends::stub::{
    FailingTask, FixedOutputTask, ParameterEchoTask, RejectingTask, StubTask,
};
use crate::backends::{LocalTaskFactory, MemoryStorage};
use crate::config::{ConfigView, Payload};
use crate::engine::{assign_collections, RunOptions, TaskContext, TaskParameters, TaskRunner};
use crate::errors::{ConfigError, TaskError};
use crate::traits::Task;

/// Integration tests for the task lifecycle using stub and built-in tasks
#[cfg(test)]
mod tests {
    use super::*;

    fn payload(value: Value) -> Payload {
        Payload::from_value(value).unwrap()
    }

    fn runner(task: Arc<dyn Task>) -> TaskRunner {
        TaskRunner::new(task, Arc::new(MemoryStorage::new()))
    }

    fn collections(payload: &Payload) -> Vec<Option<String>> {
        payload
            .view()
            .items_as_dicts()
            .unwrap()
            .iter()
            .map(|r| r.get("collection").and_then(Value::as_str).map(str::to_string))
            .collect()
    }

    #[tokio::test]
    async fn test_echo_task_assigns_catch_all_collection() {
        let input = payload(json!({
            "id": "payload-1",
            "type": "FeatureCollection",
            "features": [
                {"id": "a", "properties": {}},
                {"id": "b", "properties": {}}
            ],
            "process": [{
                "tasks": {"echo": {}},
                "collection_matchers": [{"type": "catch_all", "collection_name": "default"}],
                "upload_options": {"path_template": "/x"}
            }]
        }));

        let output = runner(Arc::new(StubTask::named("echo"))).run(input).await.unwrap();

        let features = output.view().items_as_dicts().unwrap().to_vec();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["id"], "a");
        assert_eq!(features[1]["id"], "b");
        assert_eq!(
            collections(&output),
            vec![Some("default".to_string()), Some("default".to_string())]
        );
        assert_eq!(output.id(), Some("payload-1"));
        assert_eq!(output.document()["type"], "FeatureCollection");
    }

    #[tokio::test]
    async fn test_parameters_merge_workflow_and_task_options() {
        let input = payload(json!({
            "features": [],
            "process": [{
                "workflow_options": {"a": 1, "shared": "workflow"},
                "tasks": {"parameter-echo": {"a": 2, "b": 3}}
            }]
        }));

        let output = runner(Arc::new(ParameterEchoTask)).run(input).await.unwrap();
        let features = output.view().items_as_dicts().unwrap().to_vec();

        assert_eq!(
            features[0]["properties"],
            json!({"a": 2, "shared": "workflow", "b": 3})
        );
    }

    #[tokio::test]
    async fn test_legacy_task_list_feeds_parameters() {
        let input = payload(json!({
            "features": [],
            "process": [{
                "tasks": [{"name": "parameter-echo", "parameters": {"p": 1}}]
            }]
        }));

        let output = runner(Arc::new(ParameterEchoTask)).run(input).await.unwrap();
        let features = output.view().items_as_dicts().unwrap().to_vec();
        assert_eq!(features[0]["properties"], json!({"p": 1}));
    }

    #[tokio::test]
    async fn test_matchers_first_match_wins_then_catch_all() {
        let input = payload(json!({
            "features": [
                {"id": "clear", "properties": {"cloud_cover": 5}},
                {"id": "cloudy", "properties": {"cloud_cover": 80}}
            ],
            "process": [{
                "upload_options": {"path_template": "/g"},
                "collection_matchers": [
                    {"type": "jsonpath", "pattern": "$[?(@.properties.cloud_cover < 20)]", "collection_name": "A"},
                    {"type": "catch_all", "collection_name": "B"}
                ]
            }]
        }));

        let output = runner(Arc::new(StubTask::named("echo"))).run(input).await.unwrap();
        assert_eq!(
            collections(&output),
            vec![Some("A".to_string()), Some("B".to_string())]
        );
    }

    #[tokio::test]
    async fn test_legacy_mapping_assigns_collections() {
        let input = payload(json!({
            "features": [
                {"id": "s2", "properties": {"platform": "sentinel-2a"}},
                {"id": "ls", "properties": {"platform": "landsat-8"}}
            ],
            "process": [{
                "upload_options": {
                    "path_template": "/g",
                    "collections": {
                        "sentinel": "$[?(@.properties.platform == 'sentinel-2a')]",
                        "anything": "$"
                    }
                }
            }]
        }));

        let output = runner(Arc::new(StubTask::named("echo"))).run(input).await.unwrap();
        assert_eq!(
            collections(&output),
            vec![Some("sentinel".to_string()), Some("anything".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unknown_matcher_type_fails_only_when_reached() {
        struct TestCase {
            name: &'static str,
            matchers: Value,
            expect_error: bool,
        }

        let test_cases = vec![
            TestCase {
                name: "shadowed by catch_all",
                matchers: json!([
                    {"type": "catch_all", "collection_name": "A"},
                    {"type": "bogus", "collection_name": "X"}
                ]),
                expect_error: false,
            },
            TestCase {
                name: "reached after a miss",
                matchers: json!([
                    {"type": "jsonpath", "pattern": "$.nothing_here", "collection_name": "A"},
                    {"type": "bogus", "collection_name": "X"}
                ]),
                expect_error: true,
            },
        ];

        for test_case in test_cases {
            let input = payload(json!({
                "features": [{"id": "a"}],
                "process": [{
                    "upload_options": {"path_template": "/g"},
                    "collection_matchers": test_case.matchers
                }]
            }));

            let result = runner(Arc::new(StubTask::named("echo"))).run(input).await;
            match (test_case.expect_error, result) {
                (true, Err(TaskError::Config(ConfigError::UnknownMatcherType { matcher_type }))) => {
                    assert_eq!(matcher_type, "bogus", "case: {}", test_case.name)
                }
                (false, Ok(_)) => {}
                (_, other) => panic!("case {}: unexpected result {:?}", test_case.name, other.map(|_| ())),
            }
        }
    }

    #[tokio::test]
    async fn test_mutually_exclusive_config_rejected() {
        let body = json!({
            "features": [{"id": "a"}],
            "process": [{
                "upload_options": {"path_template": "/g", "collections": {"A": "$"}},
                "collection_matchers": [{"type": "catch_all", "collection_name": "B"}]
            }]
        });

        let err = runner(Arc::new(StubTask::named("echo")))
            .run(payload(body.clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::Config(ConfigError::MutuallyExclusiveConfig)));

        // With validation off, the conflict surfaces when collections are assigned.
        let err = runner(Arc::new(StubTask::named("echo")))
            .with_options(RunOptions {
                validate: false,
                ..RunOptions::default()
            })
            .run(payload(body))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::Config(ConfigError::MutuallyExclusiveConfig)));
    }

    #[tokio::test]
    async fn test_missing_upload_options_rejected() {
        let input = payload(json!({
            "features": [{"id": "a"}],
            "process": [{
                "collection_matchers": [{"type": "catch_all", "collection_name": "Z"}]
            }]
        }));

        let err = runner(Arc::new(StubTask::named("echo"))).run(input).await.unwrap_err();
        match err {
            TaskError::Config(ConfigError::MissingUploadOptions { collection }) => {
                assert_eq!(collection, "Z")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_validation_rejection_stops_before_process() {
        for fail_with_error in [false, true] {
            let task = Arc::new(RejectingTask::new(fail_with_error));
            let called = task.process_called.clone();

            let err = runner(task)
                .run(payload(json!({"features": [{"id": "a"}]})))
                .await
                .unwrap_err();

            assert!(matches!(err, TaskError::TaskValidationFailed { .. }));
            assert_eq!(err.kind(), "TaskValidationFailure");
            assert!(!called.load(Ordering::SeqCst));
        }
    }

    #[tokio::test]
    async fn test_skipping_validation_runs_rejecting_task() {
        let task = Arc::new(RejectingTask::new(false));
        let called = task.process_called.clone();

        runner(task)
            .with_options(RunOptions {
                validate: false,
                ..RunOptions::default()
            })
            .run(payload(json!({"features": [{"id": "a"}]})))
            .await
            .unwrap();

        assert!(called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_process_failure_is_returned() {
        let err = runner(Arc::new(FailingTask))
            .run(payload(json!({"features": []})))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "ProcessingError");
        assert_eq!(err.to_string(), "task 'failing' failed: simulated failure");
    }

    #[tokio::test]
    async fn test_output_records_are_normalized() {
        struct TestCase {
            name: &'static str,
            records: Vec<Value>,
            expected: Result<Value, &'static str>,
        }

        let test_cases = vec![
            TestCase {
                name: "extensions sorted",
                records: vec![json!({"id": "a", "stac_extensions": ["https://z", "https://a"]})],
                expected: Ok(json!(["https://a", "https://z"])),
            },
            TestCase {
                name: "non-list extensions",
                records: vec![json!({"id": "a", "stac_extensions": "https://a"})],
                expected: Err("stac_extensions"),
            },
            TestCase {
                name: "record is not a mapping",
                records: vec![json!("not a record")],
                expected: Err("item"),
            },
        ];

        for test_case in test_cases {
            let result = runner(Arc::new(FixedOutputTask {
                records: test_case.records,
            }))
            .run(payload(json!({"features": []})))
            .await;

            match (test_case.expected, result) {
                (Ok(extensions), Ok(output)) => {
                    let features = output.view().items_as_dicts().unwrap().to_vec();
                    assert_eq!(features[0]["stac_extensions"], extensions, "case: {}", test_case.name);
                }
                (Err(expected_field), Err(TaskError::PostProcessType { field, .. })) => {
                    assert_eq!(field, expected_field, "case: {}", test_case.name)
                }
                (_, other) => panic!("case {}: unexpected result {:?}", test_case.name, other.map(|_| ())),
            }
        }
    }

    #[tokio::test]
    async fn test_fan_out_and_fan_in() {
        let input = payload(json!({"features": [{"id": "only"}]}));
        let fan_out = FixedOutputTask {
            records: vec![json!({"id": "x"}), json!({"id": "y"}), json!({"id": "z"})],
        };
        let output = runner(Arc::new(fan_out)).run(input).await.unwrap();
        assert_eq!(output.view().items_as_dicts().unwrap().len(), 3);

        let input = payload(json!({"features": [{"id": "a"}, {"id": "b"}]}));
        let fan_in = FixedOutputTask {
            records: vec![json!({"id": "merged"})],
        };
        let output = runner(Arc::new(fan_in)).run(input).await.unwrap();
        assert_eq!(output.view().items_as_dicts().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_derived_item_task_end_to_end() {
        let task = LocalTaskFactory::create_task("derived-item").unwrap();
        let input = payload(json!({
            "features": [{
                "id": "source",
                "properties": {},
                "links": [{"rel": "self", "href": "s3://bucket/source.json"}],
                "stac_extensions": ["https://z.example/schema.json"]
            }],
            "process": [{
                "upload_options": {"path_template": "/g"},
                "collection_matchers": [{"type": "catch_all", "collection_name": "derived"}]
            }]
        }));

        let output = runner(task).run(input).await.unwrap();
        let record = &output.view().items_as_dicts().unwrap()[0];

        assert_eq!(record["collection"], "derived");
        assert_eq!(
            record["stac_extensions"],
            json!([
                "https://stac-extensions.github.io/processing/v1.1.0/schema.json",
                "https://z.example/schema.json"
            ])
        );
        assert!(record["properties"]["processing:software"]["derived-item"].is_string());
    }

    /// Writes one asset into the working directory, then publishes the asset
    /// and the item.
    struct PublishingTask;

    #[async_trait]
    impl Task for PublishingTask {
        fn name(&self) -> &'static str {
            "publishing"
        }

        fn version(&self) -> &'static str {
            "0.0.0"
        }

        fn description(&self) -> &'static str {
            "Writes and uploads a thumbnail"
        }

        async fn process(
            &self,
            ctx: &TaskContext,
            _parameters: TaskParameters,
        ) -> Result<Vec<Value>, TaskError> {
            let mut output = Vec::new();
            for item in ctx.items() {
                let local = ctx.workdir().join("thumb.png");
                tokio::fs::write(&local, b"png").await?;

                let mut item = item.clone();
                item["assets"] = json!({
                    "thumbnail": {"href": local.to_string_lossy(), "type": "image/png"}
                });
                let mut item = ctx.upload_item_assets(&item, None).await?;
                ctx.upload_item(&mut item).await?;
                output.push(item);
            }
            Ok(output)
        }
    }

    #[tokio::test]
    async fn test_uploads_follow_collection_options_and_upload_flag() {
        let body = json!({
            "features": [{"id": "item-1", "collection": "C", "properties": {}, "links": []}],
            "process": [{
                "upload_options": {"path_template": "mem://global/${id}"},
                "collection_options": {
                    "C": {"upload_options": {"path_template": "mem://c/${id}", "public_assets": "ALL"}}
                },
                "collection_matchers": [{"type": "catch_all", "collection_name": "C"}]
            }]
        });

        let storage = Arc::new(MemoryStorage::new());
        let output = TaskRunner::new(Arc::new(PublishingTask), storage.clone())
            .run(payload(body.clone()))
            .await
            .unwrap();

        let uploads = storage.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].url, "mem://c/item-1/thumb.png");
        assert!(uploads[0].public);
        assert_eq!(uploads[0].headers.get("ContentType").map(String::as_str), Some("image/png"));

        let stored = storage.get_json("mem://c/item-1/item-1.json").unwrap();
        assert!(stored["properties"]["created"].is_string());

        let record = &output.view().items_as_dicts().unwrap()[0];
        assert_eq!(record["assets"]["thumbnail"]["href"], "mem://c/item-1/thumb.png");

        let storage = Arc::new(MemoryStorage::new());
        TaskRunner::new(Arc::new(PublishingTask), storage.clone())
            .with_options(RunOptions {
                upload: false,
                ..RunOptions::default()
            })
            .run(payload(body))
            .await
            .unwrap();
        assert!(storage.uploads().is_empty());
        assert!(storage.get("mem://c/item-1/item-1.json").is_none());
    }

    #[tokio::test]
    async fn test_saved_workdir_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = dir.path().join("work");

        runner(Arc::new(StubTask::named("echo")))
            .with_options(RunOptions {
                workdir: Some(workdir.clone()),
                save_workdir: Some(true),
                ..RunOptions::default()
            })
            .run(payload(json!({"features": []})))
            .await
            .unwrap();

        assert!(workdir.exists());
    }

    #[test]
    fn test_assignment_is_idempotent() {
        let body = json!({
            "features": [
                {"id": "a", "properties": {"cloud_cover": 5}},
                {"id": "b", "properties": {"cloud_cover": 50}}
            ],
            "process": [{
                "upload_options": {"path_template": "/g"},
                "collection_matchers": [
                    {"type": "jsonpath", "pattern": "$[?(@.properties.cloud_cover < 20)]", "collection_name": "low"},
                    {"type": "catch_all", "collection_name": "high"}
                ]
            }]
        });
        let document = body.as_object().unwrap();
        let view = ConfigView::new(document);
        let config = view.collection_config().unwrap();

        let mut records = view.items_as_dicts().unwrap().to_vec();
        assign_collections(&config, &mut records).unwrap();
        let first = records.clone();
        assign_collections(&config, &mut records).unwrap();

        assert_eq!(records, first);
        assert_eq!(records[0]["collection"], "low");
        assert_eq!(records[1]["collection"], "high");
    }
}
