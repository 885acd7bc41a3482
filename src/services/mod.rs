// ABOUTME: Domain service layer shared by the upload server and the CLI
// ABOUTME: Orchestrates pose estimation, scoring, and feedback elaboration per video
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! This module contains protocol-agnostic orchestration. The HTTP upload route
//! and the command-line tool both drive the same [`EvaluationService`], so a
//! video is scored identically regardless of the entry point.

/// Optional LLM rewrite of the feedback into a coaching paragraph
pub mod elaboration;

/// Video to per-person score results
pub mod evaluation;

pub use elaboration::FeedbackElaborator;
pub use evaluation::EvaluationService;
