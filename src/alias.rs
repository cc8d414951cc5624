// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Alias generation: turning one canonical name into several trie keys.
//!
//! Each variant below is cheap to compute and bounded per entity (at most 7,
//! deduplicated). The payoff is at query time: an input like `"tp.hcm"` or
//! `"n.t.thuat"` becomes an O(1) trie hit instead of a fuzzy search, because
//! the corresponding alias was precomputed here at build time.

use crate::normalize::{normalize_aggressive, tokenize};

/// Maximum number of tokens used when computing initials (variant 4).
/// Beyond this, additional tokens don't meaningfully disambiguate and only
/// add noise to an already-short alias.
const MAX_INITIALS_TOKENS: usize = 5;

/// Generate the deduplicated set of aggressive-normalized aliases for a
/// canonical entity name.
///
/// Variant order (duplicates removed at the end, first occurrence kept):
/// 1. full aggressive-normalized form
/// 2. no-space concatenation
/// 3. initials (one char per token, first `MAX_INITIALS_TOKENS` tokens)
/// 4. dotted initials (`a.b.c`, itself re-normalized aggressively)
/// 5. first token + last token (token count >= 3)
/// 6. first-token initial + remaining tokens in full (token count >= 2)
///
/// A one-token name, or a name that is purely numeric (e.g. a ward named
/// `"1"`), only ever produces the full form — initials of a single token are
/// too ambiguous to be useful search keys.
pub fn generate_aliases(canonical_name: &str) -> Vec<String> {
    let full = normalize_aggressive(canonical_name);
    let tokens = tokenize(&full);

    if tokens.len() <= 1 {
        return dedup(vec![full]);
    }

    let mut variants = vec![full.clone()];

    let no_space: String = tokens.concat();
    variants.push(no_space);

    let initial_tokens = &tokens[..tokens.len().min(MAX_INITIALS_TOKENS)];

    let initials: String = initial_tokens
        .iter()
        .filter_map(|t| t.chars().next())
        .collect();
    variants.push(initials);

    let dotted: String = initial_tokens
        .iter()
        .filter_map(|t| t.chars().next())
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(".");
    variants.push(normalize_aggressive(&dotted));

    if tokens.len() >= 3 {
        let first_last = format!("{} {}", tokens[0], tokens[tokens.len() - 1]);
        variants.push(first_last);
    }

    if tokens.len() >= 2 {
        if let Some(first_char) = tokens[0].chars().next() {
            let rest = tokens[1..].join(" ");
            variants.push(format!("{first_char} {rest}"));
        }
    }

    dedup(variants)
}

fn dedup(variants: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::with_capacity(variants.len());
    let mut out = Vec::with_capacity(variants.len());
    for v in variants {
        if v.is_empty() {
            continue;
        }
        if seen.insert(v.clone()) {
            out.push(v);
        }
    }
    out
}
