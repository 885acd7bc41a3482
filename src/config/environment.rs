// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses server, upload, model, pose tool, and elaboration settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use anyhow::{anyhow, bail, Result};
use std::collections::BTreeMap;
use std::env;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

use crate::constants::pose_tool;
use crate::models::{Discipline, PersonSelection};
use technique_intelligence::config::TechniqueConfig;

/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default upload size limit (512 MiB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

/// Default whole-request timeout; pose estimation on long clips is slow
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 900;

/// Default OpenAI-compatible endpoint for elaboration
const DEFAULT_ELABORATION_BASE_URL: &str = "https://router.huggingface.co/v1";

/// Default elaboration model
const DEFAULT_ELABORATION_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";

/// Upload handling
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Root directory for request-scoped upload folders
    pub upload_dir: PathBuf,
    /// Accepted video extensions, lowercase, without dot
    pub allowed_extensions: Vec<String>,
    /// Maximum request body size
    pub max_upload_bytes: usize,
    /// Whole-request timeout
    pub request_timeout_secs: u64,
}

impl UploadConfig {
    /// True when `extension` (any case, no dot) is accepted
    #[must_use]
    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.allowed_extensions.iter().any(|e| *e == extension)
    }
}

/// Scoring model artifact locations
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Directory holding `<discipline>_scoring_model.json` artifacts
    pub model_dir: PathBuf,
    /// Per-discipline overrides
    pub overrides: BTreeMap<Discipline, PathBuf>,
}

impl ModelConfig {
    /// Artifact path for a discipline
    #[must_use]
    pub fn model_path(&self, discipline: Discipline) -> PathBuf {
        self.overrides.get(&discipline).cloned().unwrap_or_else(|| {
            self.model_dir
                .join(format!("{}_scoring_model.json", discipline.file_stem()))
        })
    }

    /// Artifact paths for every discipline
    pub fn model_paths(&self) -> impl Iterator<Item = (Discipline, PathBuf)> + '_ {
        Discipline::ALL
            .into_iter()
            .map(|discipline| (discipline, self.model_path(discipline)))
    }
}

/// Pose-estimation tool invocation
#[derive(Debug, Clone)]
pub struct PoseToolConfig {
    /// Program name or path
    pub program: String,
    /// Keypoint likelihood threshold passed to the tool
    pub keypoint_threshold: f64,
    /// Which detected people are scored
    pub person_selection: PersonSelection,
}

impl Default for PoseToolConfig {
    fn default() -> Self {
        Self {
            program: pose_tool::DEFAULT_PROGRAM.to_owned(),
            keypoint_threshold: pose_tool::DEFAULT_KEYPOINT_THRESHOLD,
            person_selection: PersonSelection::default(),
        }
    }
}

/// Where technique tables come from
#[derive(Debug, Clone, Default)]
pub struct TechniqueSettings {
    /// Optional JSON override of weights, catalog and limits
    pub config_path: Option<PathBuf>,
    /// Unweighted vocabulary entries fail startup instead of warning
    pub strict_vocabulary: bool,
    /// Motion header line count override
    pub header_lines: Option<usize>,
}

/// LLM feedback elaboration
#[derive(Debug, Clone)]
pub struct ElaborationConfig {
    /// Whether elaboration runs at all
    pub enabled: bool,
    /// OpenAI-compatible base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Bearer token
    pub api_key: Option<String>,
    /// Upper bound on one elaboration call
    pub timeout_secs: u64,
    /// Completion length cap
    pub max_tokens: u32,
}

impl Default for ElaborationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: DEFAULT_ELABORATION_BASE_URL.to_owned(),
            model: DEFAULT_ELABORATION_MODEL.to_owned(),
            api_key: None,
            timeout_secs: 30,
            max_tokens: 150,
        }
    }
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Upload handling
    pub upload: UploadConfig,
    /// Scoring model locations
    pub models: ModelConfig,
    /// Pose tool invocation
    pub pose: PoseToolConfig,
    /// Technique table sources
    pub technique: TechniqueSettings,
    /// LLM elaboration
    pub elaboration: ElaborationConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed, or
    /// if the resulting configuration is inconsistent
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let model_dir = PathBuf::from(env_var_or("MODEL_DIR", "./models"));
        let overrides = Discipline::ALL
            .into_iter()
            .filter_map(|discipline| {
                let key = format!("MODEL_PATH_{}", discipline.file_stem().to_uppercase());
                env::var(key).ok().map(|path| (discipline, PathBuf::from(path)))
            })
            .collect();

        let config = Self {
            http_port: parse_env("HTTP_PORT", DEFAULT_HTTP_PORT)?,
            host: env_var_or("HOST", "127.0.0.1"),
            upload: UploadConfig {
                upload_dir: PathBuf::from(env_var_or("UPLOAD_DIR", "./uploads")),
                allowed_extensions: parse_list(&env_var_or("ALLOWED_VIDEO_EXTENSIONS", "mp4")),
                max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
                request_timeout_secs: parse_env(
                    "REQUEST_TIMEOUT_SECS",
                    DEFAULT_REQUEST_TIMEOUT_SECS,
                )?,
            },
            models: ModelConfig {
                model_dir,
                overrides,
            },
            pose: PoseToolConfig {
                program: env_var_or("SPORTS2D_BIN", pose_tool::DEFAULT_PROGRAM),
                keypoint_threshold: parse_env(
                    "KEYPOINT_LIKELIHOOD_THRESHOLD",
                    pose_tool::DEFAULT_KEYPOINT_THRESHOLD,
                )?,
                person_selection: PersonSelection::from_str_or_default(&env_var_or(
                    "PERSON_SELECTION",
                    "primary",
                )),
            },
            technique: TechniqueSettings {
                config_path: env::var("TECHNIQUE_CONFIG_PATH").ok().map(PathBuf::from),
                strict_vocabulary: parse_env("TECHNIQUE_STRICT_VOCABULARY", false)?,
                header_lines: env::var("MOTION_HEADER_LINES")
                    .ok()
                    .map(|v| parse_value::<usize>("MOTION_HEADER_LINES", &v))
                    .transpose()?,
            },
            elaboration: ElaborationConfig {
                enabled: parse_env("ELABORATION_ENABLED", true)?,
                base_url: env_var_or("ELABORATION_BASE_URL", DEFAULT_ELABORATION_BASE_URL),
                model: env_var_or("ELABORATION_MODEL", DEFAULT_ELABORATION_MODEL),
                api_key: env::var("HUGGINGFACE_API_TOKEN")
                    .or_else(|_| env::var("ELABORATION_API_KEY"))
                    .ok()
                    .filter(|k| !k.is_empty()),
                timeout_secs: parse_env("ELABORATION_TIMEOUT_SECS", 30)?,
                max_tokens: parse_env("ELABORATION_MAX_TOKENS", 150)?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for values no deployment could run with
    pub fn validate(&self) -> Result<()> {
        if self.upload.allowed_extensions.is_empty() {
            bail!("ALLOWED_VIDEO_EXTENSIONS must name at least one extension");
        }
        if !(0.0..=1.0).contains(&self.pose.keypoint_threshold) {
            bail!(
                "KEYPOINT_LIKELIHOOD_THRESHOLD must be within [0, 1], got {}",
                self.pose.keypoint_threshold
            );
        }
        if self.elaboration.timeout_secs == 0 {
            bail!("ELABORATION_TIMEOUT_SECS must be at least 1");
        }
        if self.elaboration.enabled && self.elaboration.api_key.is_none() {
            warn!("Elaboration is enabled but no API token is configured; placeholder text will be returned");
        }
        Ok(())
    }

    /// Build and validate the technique configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the override file cannot be loaded or the tables
    /// fail validation
    pub fn load_technique_config(&self) -> Result<TechniqueConfig> {
        let mut config = match &self.technique.config_path {
            Some(path) => TechniqueConfig::from_file(path)
                .map_err(|e| anyhow!("Invalid technique config {}: {e}", path.display()))?,
            None => TechniqueConfig::default(),
        };
        if let Some(header_lines) = self.technique.header_lines {
            config.limits.header_lines = header_lines;
        }
        let report = config
            .validate(self.technique.strict_vocabulary)
            .map_err(|e| anyhow!("Technique configuration rejected: {e}"))?;
        info!(
            disciplines = config.catalog.disciplines().count(),
            unweighted = report.unweighted.len(),
            header_lines = config.limits.header_lines,
            "Technique configuration validated"
        );
        Ok(config)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Pierre Technique Configuration:\n\
             - Bind: {}:{}\n\
             - Upload Dir: {}\n\
             - Allowed Extensions: {}\n\
             - Max Upload: {} bytes\n\
             - Model Dir: {}\n\
             - Pose Tool: {} (threshold {:.2}, {:?})\n\
             - Technique Overrides: {}\n\
             - Elaboration: {}",
            self.host,
            self.http_port,
            self.upload.upload_dir.display(),
            self.upload.allowed_extensions.join(", "),
            self.upload.max_upload_bytes,
            self.models.model_dir.display(),
            self.pose.program,
            self.pose.keypoint_threshold,
            self.pose.person_selection,
            self.technique
                .config_path
                .as_deref()
                .map_or_else(|| "none".to_owned(), |p| p.display().to_string()),
            if self.elaboration.enabled && self.elaboration.api_key.is_some() {
                format!("Enabled ({})", self.elaboration.model)
            } else {
                "Disabled".to_owned()
            },
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    env::var(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| anyhow!("Invalid {key} value '{raw}': {e}"))
}

/// Parse a comma-separated list into lowercase entries without dots
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// True when `path` has an extension accepted by `upload`
#[must_use]
pub fn has_allowed_extension(upload: &UploadConfig, path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| upload.is_allowed_extension(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("mp4, .MOV ,,avi"), vec!["mp4", "mov", "avi"]);
        assert_eq!(parse_list(""), Vec::<String>::new());
    }

    #[test]
    fn test_default_model_path_uses_file_stem() {
        let models = ModelConfig {
            model_dir: PathBuf::from("/models"),
            overrides: BTreeMap::from([(Discipline::ShotPut, PathBuf::from("/tmp/shot.json"))]),
        };
        assert_eq!(
            models.model_path(Discipline::LongJump),
            PathBuf::from("/models/long_jump_scoring_model.json")
        );
        assert_eq!(
            models.model_path(Discipline::ShotPut),
            PathBuf::from("/tmp/shot.json")
        );
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let upload = UploadConfig {
            upload_dir: PathBuf::from("uploads"),
            allowed_extensions: vec!["mp4".into()],
            max_upload_bytes: 1,
            request_timeout_secs: 1,
        };
        assert!(has_allowed_extension(&upload, Path::new("jump.MP4")));
        assert!(!has_allowed_extension(&upload, Path::new("jump.avi")));
        assert!(!has_allowed_extension(&upload, Path::new("jump")));
    }
}
