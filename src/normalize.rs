// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Text normalization: the universal matching form.
//!
//! Every trie key, alias, and candidate token vector is built from
//! [`normalize_aggressive`]. Getting this function right once means every
//! downstream tier can compare strings with plain equality instead of
//! special-casing diacritics everywhere.
//!
//! # Why `đ`/`Đ` needs a special case
//!
//! Unicode NFD decomposes precomposed Latin vowels with diacritics (`á` → `a`
//! + combining acute) but `đ`/`Đ` is encoded as its own base letter (U+0111 /
//! U+0110, LATIN SMALL/CAPITAL LETTER D WITH STROKE), not a combining
//! sequence. NFD leaves it untouched, so it needs an explicit substitution
//! before diacritic stripping would otherwise silently pass it through.

use unicode_normalization::UnicodeNormalization;

/// Normalize text to lowercase, diacritic-free form, preserving `.` and `,`
/// and collapsing whitespace.
///
/// Used by the prefix handler, which needs to recognize marker punctuation
/// like the trailing `.` in `"tx."`.
pub fn normalize_structural(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = false;

    for c in fold_and_strip(text) {
        if c.is_whitespace() {
            if !last_was_space && !out.is_empty() {
                out.push(' ');
            }
            last_was_space = true;
        } else if c.is_alphanumeric() || c == '.' || c == ',' {
            out.push(c);
            last_was_space = false;
        } else {
            // Any other punctuation collapses to a word boundary, same as whitespace.
            if !last_was_space && !out.is_empty() {
                out.push(' ');
            }
            last_was_space = true;
        }
    }

    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Normalize text to lowercase, diacritic-free, punctuation-free form with
/// whitespace collapsed to single spaces.
///
/// This is the dominant mode: trie keys, aliases, and candidate token
/// vectors are all built from this function's output.
pub fn normalize_aggressive(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true; // suppress leading space

    for c in fold_and_strip(text) {
        if c.is_alphanumeric() {
            out.push(c);
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }

    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Split normalized text into non-empty whitespace-delimited tokens.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

/// NFD-decompose, drop combining marks, map `đ`/`Đ` to `d`, lowercase.
///
/// Shared by both normalization modes; the only difference between
/// [`normalize_structural`] and [`normalize_aggressive`] is which characters
/// survive after this step.
fn fold_and_strip(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().filter_map(|c| {
        if is_combining_mark(c) {
            None
        } else {
            Some(map_d_with_stroke(c).to_ascii_lowercase())
        }
    })
}

/// `đ`/`Đ` (D with stroke) does not decompose under NFD; map it explicitly.
fn map_d_with_stroke(c: char) -> char {
    match c {
        '\u{0111}' | '\u{0110}' => 'd',
        other => other,
    }
}

/// Unicode combining diacritical marks relevant to Vietnamese: acute, grave,
/// hook above, tilde, dot below (the six tone marks), plus the general
/// combining-marks block for completeness.
fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}
