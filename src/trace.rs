// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Optional diagnostic trace for `parse_traced`. Not used anywhere in the
//! production `parse` path and introduces no logging dependency of its own —
//! the caller owns what, if anything, to do with a `ParseTrace`.

use crate::types::{Level, MatchMethod};

/// Why a handoff step kept or cleared a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandoffReason {
    /// The level resolved to exactly one candidate whose parent chain checks out.
    Resolved,
    /// Tier 1 produced no hit at this level.
    NoHit,
    /// A hit existed but its candidate(s) had no entity matching the required parent.
    ParentMismatch,
    /// Multiple candidates shared the alias and more than one (or zero)
    /// passed parent validation, so no single winner could be chosen.
    AmbiguousCandidates,
    /// The level's own parent was never resolved, so this level was never attempted.
    ParentUnresolved,
}

/// One line of the handoff/tier decision log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub level: Level,
    pub method: MatchMethod,
    pub reason: HandoffReason,
}

/// A single Tier 1 hit, as reported to the trace (independent of whether it
/// survived handoff).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieHitTrace {
    pub level: Level,
    pub span: (usize, usize),
    pub candidate_count: usize,
}

/// Tier 2/3 activity for one level: how many candidates were inspected and
/// what was ultimately chosen, if anything.
#[derive(Debug, Clone, PartialEq)]
pub struct TierAttemptTrace {
    pub level: Level,
    pub method: MatchMethod,
    pub candidates_inspected: usize,
    pub chosen_score: Option<f64>,
    pub chosen_distance: Option<usize>,
}

/// The full debug trace for one `parse_traced` call.
#[derive(Debug, Clone, Default)]
pub struct ParseTrace {
    pub normalized_tokens: Vec<String>,
    pub trie_hits: Vec<TrieHitTrace>,
    pub handoff_decisions: Vec<TraceEntry>,
    pub tier2_attempts: Vec<TierAttemptTrace>,
    pub tier3_attempts: Vec<TierAttemptTrace>,
}
