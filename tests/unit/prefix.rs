// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

use crate::common::fixture_index;
use diachi::{parse, MatcherConfig};

#[test]
fn province_marker_stripped_before_matching() {
    let index = fixture_index();
    let config = MatcherConfig::default();
    let result = parse(&index, "Thanh pho Ha Noi", &config);
    assert_eq!(result.province.as_deref(), Some("Hà Nội"));
}

#[test]
fn district_marker_stripped_before_matching() {
    let index = fixture_index();
    let config = MatcherConfig::default();
    let result = parse(&index, "Quan Cau Giay, Ha Noi", &config);
    assert_eq!(result.district.as_deref(), Some("Cầu Giấy"));
}

#[test]
fn tp_marker_resolves_to_province_for_level1_city() {
    let index = fixture_index();
    let config = MatcherConfig::default();
    let result = parse(&index, "TP. Ho Chi Minh", &config);
    assert_eq!(result.province.as_deref(), Some("Hồ Chí Minh"));
}

#[test]
fn tp_marker_resolves_to_district_for_non_level1_name() {
    let index = fixture_index();
    let config = MatcherConfig::default();
    let result = parse(&index, "TP. Tan Phu, Ho Chi Minh", &config);
    assert_eq!(result.province.as_deref(), Some("Hồ Chí Minh"));
    assert_eq!(result.district.as_deref(), Some("Tân Phú"));
}
