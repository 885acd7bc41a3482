// ABOUTME: Unified error handling re-exported from technique-core
// ABOUTME: AppError, ErrorCode and the ScoringError taxonomy with HTTP mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use technique_core::errors::*;
