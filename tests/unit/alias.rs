// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Alias variants are generated in `src/alias.rs` and exercised exhaustively
//! there; these tests confirm a sample of them actually round-trip through
//! the trie tier via the public `parse` surface.

use crate::common::fixture_index;
use diachi::{parse, MatchMethod, MatcherConfig};

#[test]
fn no_space_concatenation_resolves_district() {
    let index = fixture_index();
    let config = MatcherConfig::default();
    let result = parse(&index, "NamTuLiem, Ha Noi", &config);
    assert_eq!(result.province.as_deref(), Some("Hà Nội"));
    assert_eq!(result.district.as_deref(), Some("Nam Từ Liêm"));
    assert_eq!(result.match_method, MatchMethod::Trie);
}

#[test]
fn initials_alias_resolves_district() {
    let index = fixture_index();
    let config = MatcherConfig::default();
    // "ntl" is the three-token initials alias of "Nam Từ Liêm".
    let result = parse(&index, "ntl, Ha Noi", &config);
    assert_eq!(result.district.as_deref(), Some("Nam Từ Liêm"));
}

#[test]
fn dotted_initials_alias_resolves_district() {
    let index = fixture_index();
    let config = MatcherConfig::default();
    let result = parse(&index, "n.t.l, Ha Noi", &config);
    assert_eq!(result.district.as_deref(), Some("Nam Từ Liêm"));
}
