// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Core data types shared across the gazetteer index, the three tiers, and
//! the orchestrator.
//!
//! # Invariants
//!
//! - **`EntityId` validity**: every `EntityId` handed out by a built
//!   [`crate::GazetteerIndex`] indexes a live slot in that index's arena.
//!   `EntityId`s from one index must never be used against another.
//! - **`ParsedAddress` hierarchy**: `province.is_none()` implies
//!   `district.is_none() && ward.is_none()`; `district.is_none()` implies
//!   `ward.is_none()`. Enforced by the orchestrator, not by this type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Administrative level: province, district, or ward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Province,
    District,
    Ward,
}

impl Level {
    /// The level containing this one, if any. Provinces have no parent level.
    pub fn parent(self) -> Option<Level> {
        match self {
            Level::Province => None,
            Level::District => Some(Level::Province),
            Level::Ward => Some(Level::District),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Province => "province",
            Level::District => "district",
            Level::Ward => "ward",
        };
        write!(f, "{s}")
    }
}

/// An opaque administrative code. Reference-counted so the index, trie
/// payloads, and `ParsedAddress` results can share one allocation per code
/// instead of copying strings around the hot path.
pub type Code = Arc<str>;

/// Dense index into a [`crate::GazetteerIndex`]'s entity arena.
///
/// Newtype over `u32` so a province's id can't accidentally be compared
/// against a ward's id from a different arena slot, and so arena lookups are
/// a single slice index rather than a hash lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    pub(crate) fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// A single province/district/ward record as supplied by a gazetteer source.
///
/// This is the shape any [`crate::GazetteerSource`] must produce, whether
/// built in memory or loaded from JSON via
/// [`crate::VecGazetteerSource::from_json`]. `parent_code` is `None` for
/// provinces and `Some` for districts and wards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GazetteerRecord {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_code: Option<String>,
}

impl GazetteerRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>, parent_code: Option<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            parent_code,
        }
    }
}

/// Which tier ultimately produced a [`ParsedAddress`].
///
/// Per the spec's resolution of the tag-choice ambiguity: when a result mixes
/// sources across levels, the *most-downgraded* level dictates the tag
/// (`EditDistance` > `Lcs` > `Trie`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    Trie,
    Lcs,
    EditDistance,
    #[default]
    None,
}

impl MatchMethod {
    /// Combine two sources, keeping the more-downgraded one.
    pub(crate) fn downgrade(self, other: MatchMethod) -> MatchMethod {
        fn rank(m: MatchMethod) -> u8 {
            match m {
                MatchMethod::None => 0,
                MatchMethod::Trie => 1,
                MatchMethod::Lcs => 2,
                MatchMethod::EditDistance => 3,
            }
        }
        if rank(other) > rank(self) {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchMethod::Trie => "trie",
            MatchMethod::Lcs => "lcs",
            MatchMethod::EditDistance => "edit_distance",
            MatchMethod::None => "none",
        };
        write!(f, "{s}")
    }
}

/// The result of parsing one input string against a [`crate::GazetteerIndex`].
///
/// Created fresh per query, returned by value, never shared. A fully empty
/// `ParsedAddress` (all fields `None`, `valid: false`, `confidence: 0.0`,
/// `match_method: MatchMethod::None`) means the input could not be resolved
/// at all — see [`ParsedAddress::empty`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward_code: Option<String>,
    pub confidence: f64,
    pub match_method: MatchMethod,
    pub valid: bool,
}

impl ParsedAddress {
    /// The canonical "could not resolve anything" result.
    pub fn empty() -> Self {
        Self::default()
    }
}
