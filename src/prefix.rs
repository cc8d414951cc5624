// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Prefix handler: recognizing and stripping Vietnamese administrative type
//! markers before the base entity name is handed to a tier.
//!
//! Markers are matched against the *structural* normalization of the input
//! (so a trailing `.` like in `"tx."` or a dot-glued form like `"tp.hcm"`
//! survives long enough to be recognized as a delimiter), then the remainder
//! continues through the normal aggressive pipeline. `normalize_structural`
//! already lowercases, so `stripped_text` comes out lowercase too — matching
//! every other string this crate hands between stages.

use crate::normalize::normalize_structural;
use crate::types::Level;

const PROVINCE_MARKERS: &[&str] = &["tinh", "thanh pho", "tp"];
const DISTRICT_MARKERS: &[&str] = &["quan", "huyen", "thi xa", "tx", "q", "h"];
const WARD_MARKERS: &[&str] = &["phuong", "xa", "thi tran", "p", "x", "tt"];

/// Result of stripping a leading administrative marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixExpansion {
    /// The text with the recognized marker (and its separators) removed.
    pub stripped_text: String,
    /// The administrative level the marker indicated, if any.
    pub hint_level: Option<Level>,
}

/// Identify and strip at most one administrative marker family from `text`.
///
/// Markers are matched against `.`- or whitespace-delimited leading tokens
/// (`"tx."`, `"q.3"`, `"tp hcm"` all recognize their marker). If no marker is
/// recognized, the text is returned unchanged (structurally normalized) with
/// `hint_level: None` — this function never fails.
///
/// `level1_city_names` is the aggressive-normalized set of Level-1 city names
/// (e.g. `"ha noi"`, `"ho chi minh"`) used to resolve the `tp` ambiguity: `tp`
/// means province only when the remaining base name is one of these six
/// cities, otherwise it means a district-level provincial city.
pub fn expand_prefixes(text: &str, level1_city_names: &[&str]) -> PrefixExpansion {
    let structural = normalize_structural(text);

    // Longer, more specific marker families first so "thi xa" isn't left to
    // be mistaken for a dangling "xa" (ward marker) on the remainder.
    if let Some(rest) = strip_any(&structural, DISTRICT_MARKERS) {
        return PrefixExpansion {
            stripped_text: rest,
            hint_level: Some(Level::District),
        };
    }
    if let Some(rest) = strip_any(&structural, WARD_MARKERS) {
        return PrefixExpansion {
            stripped_text: rest,
            hint_level: Some(Level::Ward),
        };
    }
    if let Some((marker, rest)) = strip_any_with_marker(&structural, PROVINCE_MARKERS) {
        let hint = if marker == "tp" {
            resolve_tp_ambiguity(&rest, level1_city_names)
        } else {
            Level::Province
        };
        return PrefixExpansion {
            stripped_text: rest,
            hint_level: Some(hint),
        };
    }

    PrefixExpansion {
        stripped_text: structural,
        hint_level: None,
    }
}

/// `tp` is ambiguous between Level-1 city (province) and provincial city
/// (district). Resolve by checking the remaining base name against the
/// gazetteer's enumerated Level-1 cities.
fn resolve_tp_ambiguity(base_name: &str, level1_city_names: &[&str]) -> Level {
    let normalized_base = crate::normalize::normalize_aggressive(base_name);
    if level1_city_names.contains(&normalized_base.as_str()) {
        Level::Province
    } else {
        Level::District
    }
}

fn strip_any(structural_text: &str, markers: &[&str]) -> Option<String> {
    strip_any_with_marker(structural_text, markers).map(|(_, rest)| rest)
}

/// Try each marker in `markers`, longest (most tokens) first, against the
/// leading tokens of `structural_text`. Tokens are delimited by whitespace
/// *or* `.`, so a dot-glued marker like `"tp.hcm"` is recognized the same as
/// a spaced one. Returns the matched marker text and the remainder, with
/// separators consumed, on success.
fn strip_any_with_marker(structural_text: &str, markers: &[&str]) -> Option<(String, String)> {
    let mut sorted: Vec<&str> = markers.to_vec();
    sorted.sort_by_key(|m| std::cmp::Reverse(m.split_whitespace().count()));

    let delimited: Vec<(usize, usize)> = token_spans(structural_text);

    for marker in sorted {
        let marker_tokens: Vec<&str> = marker.split_whitespace().collect();
        if delimited.len() < marker_tokens.len() {
            continue;
        }
        let matches = delimited[..marker_tokens.len()]
            .iter()
            .zip(&marker_tokens)
            .all(|(&(start, end), m)| &structural_text[start..end] == *m);
        if matches {
            let rest_start = delimited[marker_tokens.len() - 1].1;
            let rest = structural_text[rest_start..]
                .trim_start_matches(|c: char| c.is_whitespace() || c == '.')
                .to_string();
            return Some((marker.to_string(), rest));
        }
    }
    None
}

/// Byte spans of whitespace/`.`-delimited tokens in `text`, in order.
fn token_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        let is_delim = c.is_whitespace() || c == '.';
        match (is_delim, start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                spans.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}
