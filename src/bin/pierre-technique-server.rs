// ABOUTME: HTTP server binary for the technique scoring upload service
// ABOUTME: Loads configuration from the environment, preloads models, and serves /upload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pierre Technique Server Binary
//!
//! Accepts athlete videos over HTTP and returns per-person technique scores
//! with coaching feedback.

use anyhow::Result;
use clap::Parser;
use pierre_technique::{config::environment::ServerConfig, logging, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pierre-technique-server")]
#[command(about = "Pierre Technique - video upload and technique scoring server")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    info!("Starting Pierre Technique scoring server");
    info!("{}", config.summary());

    if let Err(e) = server::run(config).await {
        error!("Server error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
