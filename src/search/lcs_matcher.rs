// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Tier 2: hierarchical token-level LCS similarity over a constrained
//! candidate set.

use crate::config::MatcherConfig;
use crate::gazetteer::GazetteerIndex;
use crate::types::{EntityId, Level};

/// A Tier 2 acceptance: the winning entity and its similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LcsMatch {
    pub candidate: EntityId,
    pub score: f64,
}

/// Find the best LCS match for `level`, constrained to `parent_code`'s
/// children when given (otherwise the full level).
pub fn match_lcs(
    index: &GazetteerIndex,
    input_tokens: &[&str],
    level: Level,
    parent_code: Option<&str>,
    config: &MatcherConfig,
) -> Option<LcsMatch> {
    let candidates = index.candidates(level, parent_code);
    let mut best: Option<(EntityId, f64)> = None;

    for id in candidates {
        let candidate_tokens = &index.entity(id).tokens;
        if candidate_tokens.is_empty() || input_tokens.is_empty() {
            continue;
        }
        let lcs = lcs_length(input_tokens, candidate_tokens);
        let score = 2.0 * lcs as f64 / (input_tokens.len() + candidate_tokens.len()) as f64;
        if score < config.lcs_threshold {
            continue;
        }

        best = Some(match best {
            None => (id, score),
            Some((best_id, best_score)) => {
                if score > best_score {
                    (id, score)
                } else if score == best_score && is_longer_name(index, id, best_id) {
                    (id, score)
                } else {
                    (best_id, best_score)
                }
            }
        });
    }

    best.map(|(candidate, score)| LcsMatch { candidate, score })
}

fn is_longer_name(index: &GazetteerIndex, a: EntityId, b: EntityId) -> bool {
    index.entity(a).name.chars().count() > index.entity(b).name.chars().count()
}

/// Token-level LCS length via a rolling two-row DP array: `O(|a|*|b|)` time,
/// `O(min(|a|,|b|))` space.
fn lcs_length(a: &[&str], b: &[String]) -> usize {
    let (short, long): (Vec<&str>, Vec<&str>) = if a.len() <= b.len() {
        (a.to_vec(), b.iter().map(String::as_str).collect())
    } else {
        (b.iter().map(String::as_str).collect(), a.to_vec())
    };

    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];

    for &long_token in &long {
        for (j, &short_token) in short.iter().enumerate() {
            curr[j + 1] = if long_token == short_token {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[short.len()]
}
