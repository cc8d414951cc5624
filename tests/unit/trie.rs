// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Trie internals (node structure, walk order) are covered by
//! `src/gazetteer/trie.rs` and `src/search/trie_matcher.rs`'s own unit
//! tests; these confirm the tier's externally observable behavior — multiple
//! candidates on an ambiguous hit, and handoff narrowing them down — through
//! `parse`/`parse_traced`.

use crate::common::fixture_index;
use diachi::{parse, parse_traced, Level, MatchMethod, MatcherConfig};

#[test]
fn duplicated_ward_name_is_disambiguated_by_parent_district() {
    let index = fixture_index();
    let config = MatcherConfig::default();

    // "Phường 1" names four different wards in the fixture; pairing it with
    // "Tân Phú" should resolve the one whose parent_code is Tân Phú's, not
    // any of the other three.
    let result = parse(&index, "Phuong 1, Tan Phu, Ho Chi Minh", &config);
    assert_eq!(result.province.as_deref(), Some("Hồ Chí Minh"));
    assert_eq!(result.district.as_deref(), Some("Tân Phú"));
    assert_eq!(result.ward.as_deref(), Some("Phường 1"));
    assert_eq!(result.match_method, MatchMethod::Trie);
}

#[test]
fn raw_trie_hit_on_ambiguous_ward_name_carries_all_candidates() {
    let index = fixture_index();
    let config = MatcherConfig::default();
    let (_, trace) = parse_traced(&index, "Phuong 1, Tan Phu, Ho Chi Minh", &config);
    let ward_hit = trace
        .trie_hits
        .iter()
        .find(|h| h.level == Level::Ward)
        .expect("a ward-level trie hit is expected for this input");
    assert_eq!(ward_hit.candidate_count, 4);
}

#[test]
fn ambiguous_ward_without_its_own_district_stays_unresolved() {
    let index = fixture_index();
    let config = MatcherConfig::default();
    // "Phường 1" exists in every province's districts except Đà Nẵng's, so
    // none of the four trie candidates passes handoff here, and neither Tier
    // 2 nor Tier 3 find anything resembling it among Đà Nẵng's own wards.
    let result = parse(&index, "Phuong 1, Da Nang", &config);
    assert_eq!(result.province.as_deref(), Some("Đà Nẵng"));
    assert!(result.district.is_none());
    assert!(result.ward.is_none());
}
