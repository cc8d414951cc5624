// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Every ward in the fixture gazetteer must resolve back to itself, its
//! district, and its province when addressed by its own clean hierarchical
//! name — regardless of case or how the comma-separated segments are
//! whitespace-padded. This is the "does every real alias actually work"
//! check; the exhaustive per-variant enumeration lives in `src/alias.rs`.

use crate::common::fixture_index;
use diachi::MatcherConfig;
use proptest::prelude::*;

/// (ward, district, province) triples mirroring `tests/common::fixture_source`.
const WARDS: &[(&str, &str, &str)] = &[
    ("Cau Dien", "Nam Tu Liem", "Ha Noi"),
    ("Phuong 1", "Nam Tu Liem", "Ha Noi"),
    ("Phuong 1", "Cau Giay", "Ha Noi"),
    ("Phuong 1", "Tan Binh", "Ho Chi Minh"),
    ("Phuong 1", "Tan Phu", "Ho Chi Minh"),
    ("Hoa Khanh", "Thanh Binh", "Da Nang"),
];

const EXPECTED_NAMES: &[(&str, &str, &str)] = &[
    ("Cầu Diễn", "Nam Từ Liêm", "Hà Nội"),
    ("Phường 1", "Nam Từ Liêm", "Hà Nội"),
    ("Phường 1", "Cầu Giấy", "Hà Nội"),
    ("Phường 1", "Tân Bình", "Hồ Chí Minh"),
    ("Phường 1", "Tân Phú", "Hồ Chí Minh"),
    ("Hòa Khánh", "Thanh Bình", "Đà Nẵng"),
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn every_ward_resolves_via_its_clean_hierarchical_name(
        idx in 0..WARDS.len(),
        upper in any::<bool>(),
        padding in 0usize..3,
    ) {
        let index = fixture_index();
        let config = MatcherConfig::default();
        let (ward, district, province) = WARDS[idx];
        let (exp_ward, exp_district, exp_province) = EXPECTED_NAMES[idx];

        let pad = " ".repeat(padding);
        let mut text = format!("{ward}{pad}, {district}{pad}, {province}");
        if upper {
            text = text.to_uppercase();
        }

        let result = diachi::parse(&index, &text, &config);
        prop_assert_eq!(result.province.as_deref(), Some(exp_province));
        prop_assert_eq!(result.district.as_deref(), Some(exp_district));
        prop_assert_eq!(result.ward.as_deref(), Some(exp_ward));
    }
}
