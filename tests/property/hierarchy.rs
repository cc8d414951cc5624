// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Universal hierarchy invariants: a valid result's codes must actually nest
//! the way the gazetteer says they do, and an unresolved level must blank
//! out everything beneath it, for every input the matcher might see.

use crate::common::fixture_index;
use diachi::{parse, Level, MatcherConfig};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn valid_results_nest_according_to_the_gazetteer(
        input in "[a-zA-Z0-9 ,./]{0,48}"
    ) {
        let index = fixture_index();
        let config = MatcherConfig::default();
        let result = parse(&index, &input, &config);

        if result.valid {
            prop_assert!(result.province_code.is_some());

            if let Some(district_code) = &result.district_code {
                let province_code = result.province_code.as_deref().unwrap();
                prop_assert_eq!(
                    index.parent_code(Level::District, district_code),
                    Some(province_code)
                );
            }

            if let Some(ward_code) = &result.ward_code {
                let district_code = result.district_code.as_deref().unwrap();
                prop_assert_eq!(
                    index.parent_code(Level::Ward, ward_code),
                    Some(district_code)
                );
            }
        }
    }

    #[test]
    fn unresolved_province_implies_nothing_else_is_resolved(
        input in "[a-zA-Z0-9 ,./]{0,48}"
    ) {
        let index = fixture_index();
        let config = MatcherConfig::default();
        let result = parse(&index, &input, &config);

        if result.province.is_none() {
            prop_assert!(result.district.is_none());
            prop_assert!(result.ward.is_none());
            prop_assert!(!result.valid);
        }
        if result.district.is_none() {
            prop_assert!(result.ward.is_none());
        }
    }

    #[test]
    fn confidence_and_validity_agree(input in "[a-zA-Z0-9 ,./]{0,48}") {
        let index = fixture_index();
        let config = MatcherConfig::default();
        let result = parse(&index, &input, &config);

        if result.valid {
            prop_assert!(result.confidence > 0.0);
            prop_assert!(result.confidence <= 1.0);
        } else {
            prop_assert_eq!(result.confidence, 0.0);
        }
    }
}
