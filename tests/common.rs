// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides motion file and model fixtures plus fake pose and LLM collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `pierre_technique`
//!
//! This module provides common fixtures to reduce duplication across
//! integration tests.

use async_trait::async_trait;
use pierre_technique::{
    errors::{AppError, ScoringError},
    llm::{ChatRequest, ChatResponse, LlmProvider},
    pose::PoseEstimator,
};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;
use technique_intelligence::{load_model, ScoringModel};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Columns used by most fixtures
pub const FIXTURE_COLUMNS: [&str; 4] = ["trunk", "pelvis", "right knee", "head"];

/// Write a Sports2D-style `.mot` file with a 10-line header block
pub fn write_motion_file(dir: &Path, name: &str, columns: &[&str], rows: &[Vec<f64>]) -> PathBuf {
    let mut content = String::from(
        "Coordinates\nversion=1\nnRows=0\nnColumns=0\ninDegrees=yes\n\n\
         Units are S.I. units (second, meters, Newtons, ...)\n\
         If the header above contains a line with 'inDegrees', this indicates whether rotational values are in degrees (yes) or radians (no).\n\n\
         endheader\n",
    );
    content.push_str("time");
    for column in columns {
        write!(content, "\t{column}").unwrap();
    }
    content.push('\n');
    for (frame, row) in rows.iter().enumerate() {
        write!(content, "{:.2}", frame as f64 * 0.04).unwrap();
        for value in row {
            write!(content, "\t{value}").unwrap();
        }
        content.push('\n');
    }

    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// A small varied motion table over [`FIXTURE_COLUMNS`]
pub fn sample_rows() -> Vec<Vec<f64>> {
    vec![
        vec![10.0, 40.0, 90.0, 5.0],
        vec![12.0, 42.0, 120.0, 6.0],
        vec![14.0, 44.0, 150.0, 5.5],
        vec![16.0, 46.0, 170.0, 7.0],
    ]
}

/// Write a linear model artifact; `intercept` alone decides the score when all
/// coefficients are zero
pub fn write_linear_model(path: &Path, features: &[&str], coefficients: &[f64], intercept: f64) {
    let artifact = serde_json::json!({
        "kind": "linear",
        "feature_names": features,
        "coefficients": coefficients,
        "intercept": intercept,
    });
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, serde_json::to_string_pretty(&artifact).unwrap()).unwrap();
}

/// Load a constant-score model over [`FIXTURE_COLUMNS`]
pub fn constant_model(dir: &Path, score: f64) -> Arc<dyn ScoringModel> {
    let path = dir.join("constant_model.json");
    write_linear_model(&path, &FIXTURE_COLUMNS, &[0.0; 4], score);
    load_model(&path).unwrap()
}

/// Pose estimator that returns a prepared output directory
#[derive(Debug)]
pub struct StaticPoseEstimator {
    output_dir: Option<PathBuf>,
    calls: AtomicUsize,
}

impl StaticPoseEstimator {
    /// Always "produce" `output_dir`
    pub fn producing(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(output_dir.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail like a crashed pose tool
    pub fn failing() -> Self {
        Self {
            output_dir: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times the tool was invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PoseEstimator for StaticPoseEstimator {
    async fn estimate(&self, _video: &Path) -> Result<PathBuf, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.output_dir
            .clone()
            .ok_or_else(|| ScoringError::PoseToolExecution {
                program: "fake-pose".to_owned(),
                status: Some(1),
                reason: "simulated crash".to_owned(),
            })
    }
}

/// Behaviour of [`FakeLlmProvider`]
#[derive(Debug, Clone)]
pub enum FakeLlmBehavior {
    /// Reply with fixed text
    Reply(String),
    /// Fail with an API error
    Fail,
    /// Never answer within any reasonable timeout
    Hang,
}

/// LLM provider with scripted behaviour that records the last prompt
#[derive(Debug)]
pub struct FakeLlmProvider {
    behavior: FakeLlmBehavior,
    last_prompt: std::sync::Mutex<Option<String>>,
}

impl FakeLlmProvider {
    pub fn new(behavior: FakeLlmBehavior) -> Self {
        Self {
            behavior,
            last_prompt: std::sync::Mutex::new(None),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for FakeLlmProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn default_model(&self) -> &str {
        "fake-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        *self.last_prompt.lock().unwrap() = request.messages.last().map(|m| m.content.clone());
        match &self.behavior {
            FakeLlmBehavior::Reply(text) => Ok(ChatResponse {
                content: text.clone(),
                model: "fake-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            FakeLlmBehavior::Fail => Err(AppError::external_service("LLM", "simulated outage")),
            FakeLlmBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(AppError::internal("unreachable"))
            }
        }
    }
}
