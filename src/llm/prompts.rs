// ABOUTME: Prompt templates for LLM feedback elaboration
// ABOUTME: Builds the athlete-facing elaboration prompt from a score and feedback lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Elaboration Prompts

/// System prompt for the elaboration model
pub const COACH_SYSTEM_PROMPT: &str = "You are an experienced athletics coach. \
    Write short, encouraging and concrete technique advice addressed directly to the athlete.";

/// Build the elaboration prompt for a score and its feedback lines
#[must_use]
pub fn elaboration_prompt(overall_score: f64, feedback: &[String]) -> String {
    format!(
        "Based on the athlete's overall score of {overall_score:.2}, generate feedback for improvement. \
         Include the following suggestions:\n{}\nProvide actionable and motivating feedback to the athlete.",
        feedback.join("\n")
    )
}
