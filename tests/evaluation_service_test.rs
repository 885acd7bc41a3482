// ABOUTME: Integration tests for the video evaluation service
// ABOUTME: Covers person selection, per-person failures, pose failures, and elaboration wiring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    constant_model, init_test_logging, sample_rows, write_motion_file, FakeLlmBehavior,
    FakeLlmProvider, StaticPoseEstimator, FIXTURE_COLUMNS,
};
use pierre_technique::{
    constants::feedback::ELABORATION_PLACEHOLDER,
    errors::ErrorCode,
    models::{Discipline, PersonEvaluation, PersonSelection},
    services::{EvaluationService, FeedbackElaborator},
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use technique_intelligence::{ModelRegistry, TechniqueAnalyzer};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    video: PathBuf,
    output_dir: PathBuf,
}

fn fixture() -> Fixture {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let video = dir.path().join("jump.mp4");
    fs::write(&video, b"video bytes").unwrap();
    let output_dir = dir.path().join("jump_Sports2D");
    fs::create_dir_all(&output_dir).unwrap();
    Fixture {
        dir,
        video,
        output_dir,
    }
}

fn service(dir: &Path, pose: Arc<StaticPoseEstimator>, score: f64) -> EvaluationService {
    let registry = ModelRegistry::from_models([(Discipline::LongJump, constant_model(dir, score))]);
    EvaluationService::new(TechniqueAnalyzer::default(), Arc::new(registry), pose)
}

#[tokio::test]
async fn test_primary_athlete_only_by_default() {
    let fx = fixture();
    write_motion_file(&fx.output_dir, "jump_Sports2D_angles_person00.mot", &FIXTURE_COLUMNS, &sample_rows());
    write_motion_file(&fx.output_dir, "jump_Sports2D_angles_person01.mot", &FIXTURE_COLUMNS, &sample_rows());

    let pose = Arc::new(StaticPoseEstimator::producing(&fx.output_dir));
    let evaluation = service(fx.dir.path(), Arc::clone(&pose), 3.25)
        .evaluate_video(&fx.video, Discipline::LongJump)
        .await
        .unwrap();

    assert_eq!(pose.calls(), 1);
    assert_eq!(evaluation.results.len(), 1);
    let scored = evaluation.results[0].as_scored().unwrap();
    assert_eq!(scored.person_id, "person00");
    assert!((scored.overall_score - 3.25).abs() < 1e-9);
    assert!(!scored.feedback.is_empty() && scored.feedback.len() <= 3);
    assert!(evaluation.elaboration.is_none());
}

#[tokio::test]
async fn test_multi_person_keeps_failures_local() {
    let fx = fixture();
    write_motion_file(&fx.output_dir, "jump_Sports2D_angles_person00.mot", &FIXTURE_COLUMNS, &sample_rows());
    fs::write(
        fx.output_dir.join("jump_Sports2D_angles_person01.mot"),
        "truncated\n",
    )
    .unwrap();

    let pose = Arc::new(StaticPoseEstimator::producing(&fx.output_dir));
    let evaluation = service(fx.dir.path(), pose, 2.0)
        .with_selection(PersonSelection::MultiPerson)
        .evaluate_video(&fx.video, Discipline::LongJump)
        .await
        .unwrap();

    assert_eq!(evaluation.results.len(), 2);
    assert_eq!(evaluation.results[0].person_id(), "person00");
    assert!(evaluation.results[0].as_scored().is_some());
    match &evaluation.results[1] {
        PersonEvaluation::Failed { person_id, error } => {
            assert_eq!(person_id, "person01");
            assert!(!error.is_empty());
        }
        PersonEvaluation::Scored(_) => panic!("broken motion file should not score"),
    }
}

#[tokio::test]
async fn test_all_persons_failing_is_an_error() {
    let fx = fixture();
    fs::write(
        fx.output_dir.join("jump_Sports2D_angles_person00.mot"),
        "only one line\n",
    )
    .unwrap();

    let pose = Arc::new(StaticPoseEstimator::producing(&fx.output_dir));
    let err = service(fx.dir.path(), pose, 2.0)
        .evaluate_video(&fx.video, Discipline::LongJump)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidMotionData);
}

#[tokio::test]
async fn test_missing_video_never_runs_pose_tool() {
    let fx = fixture();
    let pose = Arc::new(StaticPoseEstimator::producing(&fx.output_dir));
    let err = service(fx.dir.path(), Arc::clone(&pose), 2.0)
        .evaluate_video(&fx.dir.path().join("missing.mp4"), Discipline::LongJump)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(pose.calls(), 0);
}

#[tokio::test]
async fn test_missing_model_fails_before_pose_tool() {
    let fx = fixture();
    let pose = Arc::new(StaticPoseEstimator::producing(&fx.output_dir));
    let err = service(fx.dir.path(), Arc::clone(&pose), 2.0)
        .evaluate_video(&fx.video, Discipline::ShotPut)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ModelLoadFailed);
    assert_eq!(pose.calls(), 0);
}

#[tokio::test]
async fn test_pose_tool_failure_maps_to_external_service_error() {
    let fx = fixture();
    let err = service(fx.dir.path(), Arc::new(StaticPoseEstimator::failing()), 2.0)
        .evaluate_video(&fx.video, Discipline::LongJump)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert_eq!(err.http_status(), 502);
}

#[tokio::test]
async fn test_output_without_primary_marker_is_no_motion_file() {
    let fx = fixture();
    write_motion_file(&fx.output_dir, "jump_Sports2D_angles_person01.mot", &FIXTURE_COLUMNS, &sample_rows());

    let pose = Arc::new(StaticPoseEstimator::producing(&fx.output_dir));
    let err = service(fx.dir.path(), pose, 2.0)
        .evaluate_video(&fx.video, Discipline::LongJump)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::NoMotionFile);
    assert!(err.message.contains("person00"));
}

#[tokio::test]
async fn test_elaboration_uses_primary_result() {
    let fx = fixture();
    write_motion_file(&fx.output_dir, "jump_Sports2D_angles_person00.mot", &FIXTURE_COLUMNS, &sample_rows());

    let provider = Arc::new(FakeLlmProvider::new(FakeLlmBehavior::Reply(
        "Keep your trunk upright.".to_owned(),
    )));
    let elaborator = FeedbackElaborator::new(provider.clone(), 150, Duration::from_secs(5));
    let pose = Arc::new(StaticPoseEstimator::producing(&fx.output_dir));
    let evaluation = service(fx.dir.path(), pose, 4.5)
        .with_elaborator(Some(elaborator))
        .evaluate_video(&fx.video, Discipline::LongJump)
        .await
        .unwrap();

    assert_eq!(evaluation.elaboration.as_deref(), Some("Keep your trunk upright."));
    assert!(provider.last_prompt().unwrap().contains("overall score of 4.50"));
}

#[tokio::test]
async fn test_failed_elaboration_still_returns_scores() {
    let fx = fixture();
    write_motion_file(&fx.output_dir, "jump_Sports2D_angles_person00.mot", &FIXTURE_COLUMNS, &sample_rows());

    let provider = Arc::new(FakeLlmProvider::new(FakeLlmBehavior::Fail));
    let elaborator = FeedbackElaborator::new(provider, 150, Duration::from_secs(5));
    let pose = Arc::new(StaticPoseEstimator::producing(&fx.output_dir));
    let evaluation = service(fx.dir.path(), pose, 1.0)
        .with_elaborator(Some(elaborator))
        .evaluate_video(&fx.video, Discipline::LongJump)
        .await
        .unwrap();

    assert_eq!(evaluation.scored().count(), 1);
    assert_eq!(evaluation.elaboration.as_deref(), Some(ELABORATION_PLACEHOLDER));
}
