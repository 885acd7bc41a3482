// ABOUTME: Pose estimation collaborator contract and motion file discovery
// ABOUTME: Turns a video into per-person .mot files via an external tool like Sports2D
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pose Estimation
//!
//! The scoring engine never looks at pixels. A [`PoseEstimator`] turns a video
//! into a directory of joint-angle `.mot` files, one per detected person, and
//! [`locate_motion_files`] picks the files to score.

mod sports2d;

pub use sports2d::Sports2dRunner;

use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::fs;

use crate::constants::motion::MOTION_FILE_EXTENSION;
use crate::constants::pose_tool::{OUTPUT_DIR_SUFFIX, PERSON_MARKER_PREFIX};
use crate::errors::ScoringError;
use crate::models::PersonSelection;

/// Matches `person00`, `person01`, ... anywhere in a file name
static PERSON_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"{PERSON_MARKER_PREFIX}\d+")).ok());

/// External pose estimation step
#[async_trait]
pub trait PoseEstimator: Send + Sync {
    /// Run pose estimation on `video` and return the directory holding the
    /// produced motion files
    async fn estimate(&self, video: &Path) -> Result<PathBuf, ScoringError>;
}

/// Output directory the pose tool writes for `video`: `<video dir>/<stem>_Sports2D`
#[must_use]
pub fn output_dir_for(video: &Path) -> PathBuf {
    let parent = video.parent().unwrap_or_else(|| Path::new(""));
    parent.join(output_dir_name(video))
}

/// Directory name (without parent) for the pose tool output of `video`
#[must_use]
pub fn output_dir_name(video: &Path) -> String {
    let stem = video
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}{OUTPUT_DIR_SUFFIX}")
}

/// Person marker (`person00`) embedded in a motion file name, falling back
/// to the file stem
#[must_use]
pub fn person_id_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    PERSON_MARKER
        .as_ref()
        .and_then(|re| re.find(&stem))
        .map_or(stem.clone(), |m| m.as_str().to_owned())
}

fn is_selected(path: &Path, selection: PersonSelection) -> bool {
    let is_motion_file = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MOTION_FILE_EXTENSION));
    if !is_motion_file {
        return false;
    }

    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    match selection.required_marker() {
        Some(marker) => name.contains(marker),
        None => PERSON_MARKER.as_ref().is_some_and(|re| re.is_match(&name)),
    }
}

/// Motion files in `dir` for the selected people, sorted by file name
///
/// # Errors
///
/// Returns [`ScoringError::NoMotionFile`] if the directory is missing,
/// unreadable or contains no matching `.mot` file.
pub async fn locate_motion_files(
    dir: &Path,
    selection: PersonSelection,
) -> Result<Vec<PathBuf>, ScoringError> {
    let marker = selection
        .required_marker()
        .map_or_else(|| format!("{PERSON_MARKER_PREFIX}NN"), str::to_owned);
    let no_motion_file = || ScoringError::NoMotionFile {
        directory: dir.to_path_buf(),
        marker: marker.clone(),
    };

    let mut entries = fs::read_dir(dir).await.map_err(|_| no_motion_file())?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|_| no_motion_file())? {
        let path = entry.path();
        let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
        if is_file && is_selected(&path, selection) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(no_motion_file());
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
