// ABOUTME: Domain models re-exported from technique-core
// ABOUTME: Disciplines, person selection, and evaluation result types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use technique_core::models::*;
