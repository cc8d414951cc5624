// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Normalization is internal to the crate; these tests exercise its effect
//! through the public `parse` surface rather than the private functions
//! themselves (covered exhaustively by `src/normalize.rs`'s own unit tests).

use crate::common::fixture_index;
use diachi::{parse, MatchMethod, MatcherConfig};

#[test]
fn diacritics_and_case_do_not_affect_matching() {
    let index = fixture_index();
    let config = MatcherConfig::default();
    let a = parse(&index, "Hà Nội", &config);
    let b = parse(&index, "HA NOI", &config);
    let c = parse(&index, "ha noi", &config);
    assert_eq!(a.province, b.province);
    assert_eq!(a.province, c.province);
    assert_eq!(a.match_method, MatchMethod::Trie);
}

#[test]
fn punctuation_noise_between_tokens_is_ignored() {
    let index = fixture_index();
    let config = MatcherConfig::default();
    let result = parse(&index, "Cau-Dien, Nam.Tu.Liem, Ha///Noi", &config);
    assert_eq!(result.ward.as_deref(), Some("Cầu Diễn"));
}

#[test]
fn empty_and_whitespace_only_input_yield_empty_result() {
    let index = fixture_index();
    let config = MatcherConfig::default();
    assert!(!parse(&index, "", &config).valid);
    assert!(!parse(&index, "   \t  ", &config).valid);
}
