// ABOUTME: Turns the weakest features into discipline-specific coaching messages
// ABOUTME: Deduplicates in weakness order, caps the list, and never returns it empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::debug;

use crate::config::{FeedbackCatalog, TechniqueConfig};
use crate::contribution::FeatureContribution;

/// Maps ranked weak features to coaching messages
#[derive(Debug, Clone, Copy)]
pub struct FeedbackGenerator<'a> {
    catalog: &'a FeedbackCatalog,
    fallback: &'a str,
    max_messages: usize,
}

impl<'a> FeedbackGenerator<'a> {
    /// Build a generator over an explicit catalog
    #[must_use]
    pub const fn new(catalog: &'a FeedbackCatalog, fallback: &'a str, max_messages: usize) -> Self {
        Self {
            catalog,
            fallback,
            max_messages,
        }
    }

    /// Build a generator from the technique configuration
    #[must_use]
    pub fn from_config(config: &'a TechniqueConfig) -> Self {
        Self::new(
            &config.catalog,
            &config.fallback_message,
            config.limits.max_feedback_messages,
        )
    }

    /// Coaching messages for `weakest`, in weakness order
    ///
    /// Unknown disciplines, unmapped features and empty input all produce
    /// the single fallback message.
    #[must_use]
    pub fn generate(&self, discipline: &str, weakest: &[FeatureContribution]) -> Vec<String> {
        let mut messages: Vec<String> = Vec::with_capacity(self.max_messages);

        if let Some(tables) = self.catalog.discipline(discipline) {
            for contribution in weakest {
                if messages.len() >= self.max_messages {
                    break;
                }
                match tables.message_for(&contribution.feature) {
                    Some(message) if !messages.iter().any(|m| m == message) => {
                        messages.push(message.to_owned());
                    }
                    Some(_) => {}
                    None => debug!(
                        discipline,
                        feature = %contribution.feature,
                        "Feature has no feedback category"
                    ),
                }
            }
        } else {
            debug!(discipline, "No feedback catalog for discipline");
        }

        if messages.is_empty() {
            messages.push(self.fallback.to_owned());
        }
        messages
    }
}
