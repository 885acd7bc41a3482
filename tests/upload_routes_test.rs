// ABOUTME: HTTP tests for the upload and health routes using in-process axum requests
// ABOUTME: Checks validation order, error bodies, and the successful evaluation response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{
    constant_model, init_test_logging, sample_rows, write_motion_file, StaticPoseEstimator,
    FIXTURE_COLUMNS,
};
use helpers::axum_test::{AxumTestRequest, MultipartForm};
use pierre_technique::{
    config::UploadConfig,
    models::Discipline,
    server::{build_router, AppState},
    services::EvaluationService,
};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use technique_intelligence::{ModelRegistry, TechniqueAnalyzer};
use tempfile::TempDir;

struct TestServer {
    _dir: TempDir,
    upload_dir: PathBuf,
    pose: Arc<StaticPoseEstimator>,
    app: axum::Router,
}

fn test_server() -> TestServer {
    test_server_with_limit(1024 * 1024)
}

fn test_server_with_limit(max_upload_bytes: usize) -> TestServer {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("pose_output");
    fs::create_dir_all(&output_dir).unwrap();
    write_motion_file(
        &output_dir,
        "clip_Sports2D_angles_person00.mot",
        &FIXTURE_COLUMNS,
        &sample_rows(),
    );

    let registry =
        ModelRegistry::from_models([(Discipline::LongJump, constant_model(dir.path(), 3.5))]);
    let pose = Arc::new(StaticPoseEstimator::producing(&output_dir));
    let evaluation = EvaluationService::new(
        TechniqueAnalyzer::default(),
        Arc::new(registry),
        pose.clone(),
    );

    let upload_dir = dir.path().join("uploads");
    let state = AppState {
        evaluation,
        upload: UploadConfig {
            upload_dir: upload_dir.clone(),
            allowed_extensions: vec!["mp4".to_owned()],
            max_upload_bytes,
            request_timeout_secs: 30,
        },
    };

    TestServer {
        _dir: dir,
        upload_dir,
        pose,
        app: build_router(Arc::new(state)),
    }
}

fn upload_count(upload_dir: &PathBuf) -> usize {
    fs::read_dir(upload_dir).map_or(0, Iterator::count)
}

#[tokio::test]
async fn test_root_and_health() {
    let server = test_server();

    let root = AxumTestRequest::get("/").send(server.app.clone()).await;
    assert_eq!(root.status(), 200);
    assert!(root.text().contains("running"));

    let health: Value = AxumTestRequest::get("/health")
        .send(server.app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(health["status"], "healthy");
}

#[tokio::test]
async fn test_successful_upload_returns_results() {
    let server = test_server();
    let form = MultipartForm::new()
        .text("discipline", "long-jump")
        .file("video", "clip.mp4", b"fake video");

    let body: Value = AxumTestRequest::post("/upload")
        .multipart(form)
        .send(server.app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["success"], true);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["person_id"], "person00");
    assert!((results[0]["score"].as_f64().unwrap() - 3.5).abs() < 1e-9);
    assert!(!results[0]["feedback"].as_array().unwrap().is_empty());
    assert_eq!(server.pose.calls(), 1);
    assert_eq!(upload_count(&server.upload_dir), 1);
}

#[tokio::test]
async fn test_missing_video_field_is_rejected() {
    let server = test_server();
    let form = MultipartForm::new().text("discipline", "long-jump");

    let body: Value = AxumTestRequest::post("/upload")
        .multipart(form)
        .send(server.app)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("video"));
    assert_eq!(server.pose.calls(), 0);
}

#[tokio::test]
async fn test_missing_discipline_field_is_rejected() {
    let server = test_server();
    let form = MultipartForm::new().file("video", "clip.mp4", b"fake video");

    let body: Value = AxumTestRequest::post("/upload")
        .multipart(form)
        .send(server.app)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert!(body["error"].as_str().unwrap().contains("discipline"));
    assert_eq!(upload_count(&server.upload_dir), 0);
}

#[tokio::test]
async fn test_unknown_discipline_never_reaches_pose_tool() {
    let server = test_server();
    let form = MultipartForm::new()
        .text("discipline", "pole-vault")
        .file("video", "clip.avi", b"fake video");

    let body: Value = AxumTestRequest::post("/upload")
        .multipart(form)
        .send(server.app)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    // Discipline is checked before the extension
    assert_eq!(body["code"], "UNKNOWN_DISCIPLINE");
    assert!(body["error"].as_str().unwrap().contains("pole-vault"));
    assert_eq!(server.pose.calls(), 0);
    assert_eq!(upload_count(&server.upload_dir), 0);
}

#[tokio::test]
async fn test_disallowed_extension_is_rejected() {
    let server = test_server();
    let form = MultipartForm::new()
        .text("discipline", "long-jump")
        .file("video", "clip.avi", b"fake video");

    let body: Value = AxumTestRequest::post("/upload")
        .multipart(form)
        .send(server.app)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "INVALID_FORMAT");
    assert!(body["error"].as_str().unwrap().contains("mp4"));
    assert_eq!(server.pose.calls(), 0);
}

#[tokio::test]
async fn test_discipline_without_model_is_server_error() {
    let server = test_server();
    let form = MultipartForm::new()
        .text("discipline", "shot-put")
        .file("video", "clip.mp4", b"fake video");

    let body: Value = AxumTestRequest::post("/upload")
        .multipart(form)
        .send(server.app)
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .json();

    assert_eq!(body["code"], "MODEL_LOAD_FAILED");
    assert_eq!(server.pose.calls(), 0);
}

#[tokio::test]
async fn test_oversized_upload_is_json_error() {
    let server = test_server_with_limit(200);
    let form = MultipartForm::new()
        .text("discipline", "long-jump")
        .file("video", "clip.mp4", &[0_u8; 5000]);

    let body: Value = AxumTestRequest::post("/upload")
        .multipart(form)
        .send(server.app)
        .await
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .json();

    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(server.pose.calls(), 0);
    assert_eq!(upload_count(&server.upload_dir), 0);
}
