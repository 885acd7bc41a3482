// ABOUTME: Pipeline constants re-exported from technique-core
// ABOUTME: Motion format, pose tool, feedback, and service name constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use technique_core::constants::*;
