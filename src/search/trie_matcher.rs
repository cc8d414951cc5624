// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Tier 1: bounded sliding-window scan against the three per-level tries.

use super::RawHit;
use crate::config::MatcherConfig;
use crate::gazetteer::GazetteerIndex;
use crate::types::Level;

/// Tier 1's raw findings, one slot per level. A `None` means no trie hit at
/// that level; it does not yet imply hierarchical validity — that is the
/// handoff step's job.
#[derive(Debug, Clone, Default)]
pub struct TrieResult {
    pub province: Option<RawHit>,
    pub district: Option<RawHit>,
    pub ward: Option<RawHit>,
}

/// Scan `tokens` against all three tries with a sliding window of size
/// `1..=config.trie_window_max_tokens`.
pub fn match_trie(index: &GazetteerIndex, tokens: &[&str], config: &MatcherConfig) -> TrieResult {
    TrieResult {
        province: best_hit(index, tokens, Level::Province, config),
        district: best_hit(index, tokens, Level::District, config),
        ward: best_hit(index, tokens, Level::Ward, config),
    }
}

fn best_hit(index: &GazetteerIndex, tokens: &[&str], level: Level, config: &MatcherConfig) -> Option<RawHit> {
    let trie = index.trie(level);
    let window = config.trie_window_max_tokens;
    let n = tokens.len();

    let mut hits: Vec<RawHit> = Vec::new();
    for i in 0..n {
        let end = (i + window).min(n);
        for (depth, candidates) in trie.walk(&tokens[i..end]) {
            hits.push(RawHit {
                span: (i, i + depth),
                candidates: candidates.to_vec(),
            });
        }
    }

    pick_best(index, hits, level, n)
}

fn pick_best(index: &GazetteerIndex, hits: Vec<RawHit>, level: Level, total_tokens: usize) -> Option<RawHit> {
    let max_len = hits.iter().map(|h| h.span.1 - h.span.0).max()?;
    let longest: Vec<RawHit> = hits.into_iter().filter(|h| h.span.1 - h.span.0 == max_len).collect();

    if longest.len() == 1 {
        return longest.into_iter().next();
    }

    match level {
        Level::Province => longest.into_iter().max_by_key(|h| h.span.0),
        Level::Ward => longest.into_iter().min_by_key(|h| h.span.0),
        Level::District => pick_middle_biased(index, longest, total_tokens),
    }
}

/// District ties favor the window whose center is closest to the midpoint
/// of the input; remaining ties favor the lexicographically smaller
/// candidate name.
fn pick_middle_biased(index: &GazetteerIndex, hits: Vec<RawHit>, total_tokens: usize) -> Option<RawHit> {
    let midpoint = total_tokens as f64 / 2.0;
    hits.into_iter().min_by(|a, b| {
        let center_a = (a.span.0 + a.span.1) as f64 / 2.0;
        let center_b = (b.span.0 + b.span.1) as f64 / 2.0;
        let dist_a = (center_a - midpoint).abs();
        let dist_b = (center_b - midpoint).abs();
        dist_a
            .partial_cmp(&dist_b)
            .unwrap()
            .then_with(|| min_candidate_name(index, a).cmp(&min_candidate_name(index, b)))
    })
}

fn min_candidate_name(index: &GazetteerIndex, hit: &RawHit) -> String {
    hit.candidates
        .iter()
        .map(|&id| index.entity(id).name.clone())
        .min()
        .unwrap_or_default()
}
