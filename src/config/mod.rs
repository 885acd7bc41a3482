// ABOUTME: Configuration management module for centralized server settings and parameters
// ABOUTME: Environment-only configuration for the server, pose tool, models, and elaboration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for Pierre Technique
//!
//! - **Environment**: Server configuration from environment variables
//! - **Technique**: Weights, feedback catalog and limits live in
//!   `technique_intelligence::config` and are loaded through
//!   [`environment::ServerConfig::load_technique_config`]

/// Environment and server configuration
pub mod environment;

pub use environment::{
    ElaborationConfig, ModelConfig, PoseToolConfig, ServerConfig, TechniqueSettings, UploadConfig,
};
pub use technique_intelligence::config::TechniqueConfig;
