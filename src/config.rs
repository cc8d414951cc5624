// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Matcher configuration.
//!
//! A single immutable struct threaded through [`crate::build_index`] and
//! [`crate::parse`], the way the teacher threads `IndexThresholds` through its
//! own build/search split. All fields are `Copy`, so `MatcherConfig` is too —
//! there is no reason to share it behind a reference.

use crate::error::ConfigError;

/// Tunable knobs for the three-tier matcher, constant for an index's lifetime.
///
/// Construct with [`MatcherConfig::new`] for validation, or use
/// [`MatcherConfig::default`] for the documented defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    /// Minimum LCS similarity `s = 2*lcs_len/(|I|+|C|)` for Tier 2 acceptance.
    pub lcs_threshold: f64,
    /// Maximum Levenshtein distance accepted by Tier 3.
    pub edit_max_distance: usize,
    /// Minimum input phrase length (characters) required to invoke Tier 3.
    pub edit_min_phrase_chars: usize,
    /// Maximum sliding-window size (tokens) scanned by Tier 1.
    pub trie_window_max_tokens: usize,
    /// Per-query wall-clock budget in milliseconds.
    pub budget_ms: u64,
}

impl MatcherConfig {
    /// Construct a config, validating all fields.
    pub fn new(
        lcs_threshold: f64,
        edit_max_distance: usize,
        edit_min_phrase_chars: usize,
        trie_window_max_tokens: usize,
        budget_ms: u64,
    ) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&lcs_threshold) {
            return Err(ConfigError::LcsThresholdOutOfRange(lcs_threshold.to_string()));
        }
        if edit_max_distance == 0 {
            return Err(ConfigError::EditMaxDistanceZero);
        }
        if trie_window_max_tokens == 0 {
            return Err(ConfigError::TrieWindowZero);
        }
        Ok(Self {
            lcs_threshold,
            edit_max_distance,
            edit_min_phrase_chars,
            trie_window_max_tokens,
            budget_ms,
        })
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            lcs_threshold: 0.4,
            edit_max_distance: 2,
            edit_min_phrase_chars: 4,
            trie_window_max_tokens: 6,
            budget_ms: 100,
        }
    }
}
