// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Error types for index construction and configuration.
//!
//! Query-time failure is never represented as an `Err` — see [`crate::ParsedAddress`]
//! for why. Only the two boundaries where external input can genuinely be wrong
//! (a malformed gazetteer, a malformed config) get a `Result`.

use crate::types::Level;
use std::fmt;

/// Fatal errors surfaced by [`crate::build_index`].
///
/// These correspond to genuine defects in the supplied gazetteer source, not
/// to anything a query can trigger. `build_index` is expected to be called
/// once per process; a `BuildError` should be treated as fatal by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A district or ward record referenced a `parent_code` that does not
    /// exist in the parent level.
    MissingParent {
        level: Level,
        code: String,
        parent_code: String,
    },
    /// Two records at the same level declared the same `code`.
    DuplicateCode { level: Level, code: String },
    /// A level (provinces, districts, or wards) had zero records.
    EmptyLevel { level: Level },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MissingParent {
                level,
                code,
                parent_code,
            } => write!(
                f,
                "{level} '{code}' references parent_code '{parent_code}' which does not exist"
            ),
            BuildError::DuplicateCode { level, code } => {
                write!(f, "duplicate {level} code '{code}'")
            }
            BuildError::EmptyLevel { level } => write!(f, "gazetteer has no {level} records"),
        }
    }
}

impl std::error::Error for BuildError {}

/// Errors from constructing a [`crate::MatcherConfig`] with out-of-range values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `lcs_threshold` was outside `[0.0, 1.0]`.
    LcsThresholdOutOfRange(String),
    /// `edit_max_distance` was zero (Tier 3 would accept only exact matches,
    /// which Tier 1 already handles).
    EditMaxDistanceZero,
    /// `trie_window_max_tokens` was zero (Tier 1 could never hit).
    TrieWindowZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LcsThresholdOutOfRange(v) => {
                write!(f, "lcs_threshold {v} must be within [0.0, 1.0]")
            }
            ConfigError::EditMaxDistanceZero => {
                write!(f, "edit_max_distance must be at least 1")
            }
            ConfigError::TrieWindowZero => {
                write!(f, "trie_window_max_tokens must be at least 1")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
