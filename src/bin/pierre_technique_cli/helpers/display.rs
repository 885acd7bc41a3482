// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for pierre-technique-cli
// ABOUTME: Prints score results, feedback lines, and the elaborated paragraph

use pierre_technique::constants::scoring::NOMINAL_MAX_SCORE;
use pierre_technique::models::{PersonEvaluation, VideoEvaluation};

/// Print the evaluation block for every person, then the elaboration
pub fn display_evaluation(evaluation: &VideoEvaluation) {
    println!("\n{} Evaluation Results {}", "=".repeat(5), "=".repeat(5));

    for (index, result) in evaluation.results.iter().enumerate() {
        if index > 0 {
            println!();
        }
        match result {
            PersonEvaluation::Scored(score) => {
                println!("Person: {}", score.person_id);
                println!(
                    "Overall Score: {:.2} / {:.1}",
                    score.overall_score, NOMINAL_MAX_SCORE
                );
                println!("Feedback:");
                for line in &score.feedback {
                    println!("- {line}");
                }
            }
            PersonEvaluation::Failed { person_id, error } => {
                println!("Person: {person_id}");
                println!("Could not be scored: {error}");
            }
        }
    }

    if let Some(elaboration) = &evaluation.elaboration {
        println!("\nElaborated Feedback:");
        println!("{elaboration}");
    }
}
