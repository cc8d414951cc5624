// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Deterministic three-tier matcher for noisy Vietnamese addresses against a
//! fixed province/district/ward gazetteer.
//!
//! ```text
//! input -> normalize -> prefix handler -> Tier 1 (trie)
//!       -> handoff validation
//!       -> Tier 2 (LCS, if incomplete)
//!       -> Tier 3 (edit distance, if still incomplete)
//!       -> ParsedAddress { confidence, match_method, valid }
//! ```
//!
//! Build an index once from any [`GazetteerSource`] via [`build_index`], then
//! call [`parse`] per query. The index is immutable and `Sync`; nothing in
//! this crate mutates it after construction, so one index can be shared
//! across threads without locking.

mod alias;
mod config;
mod contracts;
mod error;
mod gazetteer;
mod normalize;
mod orchestrator;
mod prefix;
mod search;
mod trace;
mod types;

pub use config::MatcherConfig;
pub use error::{BuildError, ConfigError};
pub use gazetteer::{build_index, GazetteerIndex, GazetteerSource, VecGazetteerSource};
pub use orchestrator::{parse, parse_traced};
pub use trace::{HandoffReason, ParseTrace, TierAttemptTrace, TraceEntry, TrieHitTrace};
pub use types::{GazetteerRecord, Level, MatchMethod, ParsedAddress};
