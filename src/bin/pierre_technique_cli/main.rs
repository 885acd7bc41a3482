// ABOUTME: Pierre technique CLI - evaluates a local athlete video from the command line
// ABOUTME: Runs the same pose, scoring, and elaboration pipeline as the upload server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Score a long jump video
//! pierre-technique-cli clips/jump.mp4
//!
//! # Score a shot put video without LLM elaboration
//! pierre-technique-cli clips/put.mp4 --discipline shot-put --no-elaborate
//!
//! # Score every detected person
//! pierre-technique-cli clips/start.mp4 --discipline sprint-start --multi-person
//! ```

mod helpers;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use pierre_technique::{
    config::environment::ServerConfig,
    logging::LoggingConfig,
    models::{Discipline, PersonSelection},
    server::evaluation_service,
};
use technique_intelligence::{load_model, ModelRegistry};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pierre-technique-cli",
    about = "Evaluate an athlete's technique from a video",
    long_about = "Runs pose estimation on a local video, scores the technique with the discipline's model and prints coaching feedback."
)]
struct Cli {
    /// Path to the athlete video
    video: PathBuf,

    /// Discipline key (long-jump, shot-put, sprint-start, discus-throw)
    #[arg(long, short = 'd', default_value = "long-jump")]
    discipline: String,

    /// Keypoint likelihood threshold passed to the pose tool
    #[arg(long)]
    threshold: Option<f64>,

    /// Score every detected person instead of the primary athlete
    #[arg(long)]
    multi_person: bool,

    /// Skip LLM elaboration
    #[arg(long)]
    no_elaborate: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = LoggingConfig::for_cli(cli.verbose).init() {
        eprintln!("Warning: logging unavailable: {e}");
    }

    if !cli.video.exists() {
        eprintln!(
            "Error: Video file does not exist at {}",
            cli.video.display()
        );
        eprintln!("Usage: pierre-technique-cli <VIDEO> [--discipline <key>]");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let discipline: Discipline = cli.discipline.parse()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(threshold) = cli.threshold {
        config.pose.keypoint_threshold = threshold;
    }
    if cli.multi_person {
        config.pose.person_selection = PersonSelection::MultiPerson;
    }
    if cli.no_elaborate {
        config.elaboration.enabled = false;
    }
    config.validate()?;

    // Load the model before spending minutes on pose estimation
    let model_path = config.models.model_path(discipline);
    let model = load_model(&model_path)?;
    info!(discipline = %discipline, path = %model_path.display(), "Scoring model loaded");

    let service = evaluation_service(&config, ModelRegistry::from_models([(discipline, model)]))?;
    let evaluation = service
        .evaluate_video(&cli.video, discipline)
        .await
        .map_err(|e| anyhow!(e.message))
        .with_context(|| format!("Failed to evaluate {}", cli.video.display()))?;

    helpers::display::display_evaluation(&evaluation);
    Ok(())
}
