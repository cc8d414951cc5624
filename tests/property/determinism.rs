// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! The matcher is a pure function of (index, input, config): repeated calls
//! with the same arguments must always produce byte-for-byte the same
//! result, and result equality must not depend on call order.

use crate::common::fixture_index;
use diachi::{parse, MatcherConfig};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn repeated_parse_is_stable(input in "[a-zA-Z0-9 ,./]{0,48}") {
        let index = fixture_index();
        let config = MatcherConfig::default();
        let first = parse(&index, &input, &config);
        let second = parse(&index, &input, &config);
        let third = parse(&index, &input, &config);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&second, &third);
    }

    #[test]
    fn interleaved_queries_do_not_affect_each_other(
        a in "[a-zA-Z0-9 ,./]{0,32}",
        b in "[a-zA-Z0-9 ,./]{0,32}",
    ) {
        let index = fixture_index();
        let config = MatcherConfig::default();

        let a_alone = parse(&index, &a, &config);
        let b_alone = parse(&index, &b, &config);

        // Interleave: a, b, a again — the second "a" must match the first.
        let a_first = parse(&index, &a, &config);
        let _ = parse(&index, &b, &config);
        let a_second = parse(&index, &a, &config);

        prop_assert_eq!(&a_alone, &a_first);
        prop_assert_eq!(&a_first, &a_second);
        prop_assert_eq!(&b_alone, &parse(&index, &b, &config));
    }
}
