// ABOUTME: Integration tests for LLM feedback elaboration
// ABOUTME: Verifies prompt content and the placeholder fallback on errors and timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{FakeLlmBehavior, FakeLlmProvider};
use pierre_technique::{
    config::ElaborationConfig, constants::feedback::ELABORATION_PLACEHOLDER,
    services::FeedbackElaborator,
};
use std::sync::Arc;
use std::time::Duration;

fn feedback() -> Vec<String> {
    vec![
        "Landing should be performed with a sliding technique to ensure stability.".to_owned(),
        "Run-up should be accelerated without slowing down or tripping before the repulsion."
            .to_owned(),
    ]
}

#[tokio::test]
async fn test_elaboration_returns_completion_text() {
    let provider = Arc::new(FakeLlmProvider::new(FakeLlmBehavior::Reply(
        "  Great effort! Slide into the landing.  ".to_owned(),
    )));
    let elaborator = FeedbackElaborator::new(provider.clone(), 150, Duration::from_secs(5));

    let text = elaborator.elaborate(3.137, &feedback()).await;

    assert_eq!(text, "Great effort! Slide into the landing.");
    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.starts_with("Based on the athlete's overall score of 3.14,"));
    assert!(prompt.contains("sliding technique"));
    assert!(prompt.ends_with("Provide actionable and motivating feedback to the athlete."));
}

#[tokio::test]
async fn test_provider_error_yields_placeholder() {
    let provider = Arc::new(FakeLlmProvider::new(FakeLlmBehavior::Fail));
    let elaborator = FeedbackElaborator::new(provider, 150, Duration::from_secs(5));

    assert_eq!(elaborator.elaborate(2.0, &feedback()).await, ELABORATION_PLACEHOLDER);
}

#[tokio::test]
async fn test_empty_completion_yields_placeholder() {
    let provider = Arc::new(FakeLlmProvider::new(FakeLlmBehavior::Reply("   ".to_owned())));
    let elaborator = FeedbackElaborator::new(provider, 150, Duration::from_secs(5));

    assert_eq!(elaborator.elaborate(2.0, &feedback()).await, ELABORATION_PLACEHOLDER);
}

#[tokio::test]
async fn test_hanging_provider_times_out() {
    let provider = Arc::new(FakeLlmProvider::new(FakeLlmBehavior::Hang));
    let elaborator = FeedbackElaborator::new(provider, 150, Duration::from_millis(50));

    assert_eq!(elaborator.elaborate(2.0, &feedback()).await, ELABORATION_PLACEHOLDER);
}

#[tokio::test]
async fn test_unavailable_elaborator_yields_placeholder() {
    assert_eq!(
        FeedbackElaborator::unavailable()
            .elaborate(2.0, &feedback())
            .await,
        ELABORATION_PLACEHOLDER
    );
}

#[test]
fn test_disabled_config_builds_no_elaborator() {
    let config = ElaborationConfig::default();
    assert!(!config.enabled);
    assert!(FeedbackElaborator::from_config(&config).unwrap().is_none());

    let enabled = ElaborationConfig {
        enabled: true,
        ..ElaborationConfig::default()
    };
    assert!(FeedbackElaborator::from_config(&enabled).unwrap().is_some());
}
