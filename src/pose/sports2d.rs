// ABOUTME: Sports2D command-line runner implementing the pose estimation contract
// ABOUTME: Spawns the tool without a shell and resolves its per-video output directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, instrument};

use super::{output_dir_for, output_dir_name, PoseEstimator};
use crate::config::PoseToolConfig;
use crate::errors::ScoringError;
use crate::logging::AppLogger;

/// Bytes of stderr kept in a failure message
const STDERR_TAIL_BYTES: usize = 2000;

/// Runs the `sports2d` program for multi-person angle extraction
#[derive(Debug, Clone)]
pub struct Sports2dRunner {
    program: String,
    keypoint_threshold: f64,
}

impl Sports2dRunner {
    /// Create a runner for the given program and keypoint likelihood threshold
    #[must_use]
    pub fn new(program: impl Into<String>, keypoint_threshold: f64) -> Self {
        Self {
            program: program.into(),
            keypoint_threshold,
        }
    }

    /// Create a runner from pose tool configuration
    #[must_use]
    pub fn from_config(config: &PoseToolConfig) -> Self {
        Self::new(config.program.clone(), config.keypoint_threshold)
    }

    /// Command-line arguments for one video
    #[must_use]
    pub fn arguments(&self, video: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "--save_vid",
            "false",
            "--save_img",
            "false",
            "--save_pose",
            "false",
            "--show_graphs",
            "false",
            "--multiperson",
            "true",
            "--keypoint_likelihood_threshold",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(self.keypoint_threshold.to_string().into());
        args.push("--video_input".into());
        args.push(video.as_os_str().to_owned());
        args
    }

    fn execution_error(&self, status: Option<i32>, reason: impl Into<String>) -> ScoringError {
        ScoringError::PoseToolExecution {
            program: self.program.clone(),
            status,
            reason: reason.into(),
        }
    }

    /// The tool ran from the video's directory, so its output sits beside
    /// the video
    async fn resolve_output_dir(video: &Path) -> Result<PathBuf, ScoringError> {
        let beside_video = output_dir_for(video);
        if fs::metadata(&beside_video).await.is_ok_and(|m| m.is_dir()) {
            debug!(dir = %beside_video.display(), "Resolved pose output directory");
            return Ok(beside_video);
        }

        Err(ScoringError::NoMotionFile {
            directory: beside_video,
            marker: output_dir_name(video),
        })
    }
}

/// Working directory and video argument for one run
///
/// Sports2D writes `<stem>_Sports2D` into its working directory, so each run
/// starts in the video's own directory and receives the bare file name.
fn invocation(video: &Path) -> (Option<&Path>, &Path) {
    match (video.parent(), video.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            (Some(parent), Path::new(name))
        }
        _ => (None, video),
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    let start = trimmed
        .char_indices()
        .rev()
        .nth(STDERR_TAIL_BYTES)
        .map_or(0, |(idx, _)| idx);
    trimmed[start..].to_owned()
}

#[async_trait]
impl PoseEstimator for Sports2dRunner {
    #[instrument(skip(self), fields(program = %self.program))]
    async fn estimate(&self, video: &Path) -> Result<PathBuf, ScoringError> {
        let start = Instant::now();
        let (working_dir, video_arg) = invocation(video);

        let mut command = Command::new(&self.program);
        command
            .args(self.arguments(video_arg))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .await
            .map_err(|e| {
                AppLogger::log_pose_tool_run(&self.program, video, None, start.elapsed());
                self.execution_error(None, format!("failed to start: {e}"))
            })?;

        let exit_code = output.status.code();
        AppLogger::log_pose_tool_run(&self.program, video, exit_code, start.elapsed());

        if !output.status.success() {
            return Err(self.execution_error(exit_code, stderr_tail(&output.stderr)));
        }

        Self::resolve_output_dir(video).await
    }
}
