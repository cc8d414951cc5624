// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Debug-mode invariant checks for a freshly built index.
//!
//! Zero-cost in release builds (every check here is gated behind
//! `debug_assert!`), exercised on every `build_index` call in debug and test
//! builds. These check things that should be *impossible* given correct
//! construction, not things a caller can trigger with bad input — see
//! `error.rs` for that boundary. DO NOT REMOVE THESE CHECKS: they are the
//! only thing standing between a silent off-by-one in `build_index` and a
//! confidently-wrong `ParsedAddress` at query time.

use crate::gazetteer::GazetteerIndex;
use crate::types::Level;

pub(crate) fn verify_build_invariants(index: &GazetteerIndex) {
    debug_assert!(
        no_orphan_parents(index),
        "index has a district or ward whose parent_code does not resolve"
    );
    debug_assert!(
        every_trie_payload_resolves(index),
        "index has a trie payload entity id with no backing code_to_name entry"
    );
}

fn no_orphan_parents(index: &GazetteerIndex) -> bool {
    for level in [Level::District, Level::Ward] {
        let parent_level = level.parent().expect("district/ward always have a parent level");
        for code in index.all_codes(level) {
            let Some(parent_code) = index.parent_code(level, &code) else {
                return false;
            };
            if index.code_to_name(parent_level, parent_code).is_none() {
                return false;
            }
        }
    }
    true
}

fn every_trie_payload_resolves(index: &GazetteerIndex) -> bool {
    for level in [Level::Province, Level::District, Level::Ward] {
        for code in index.all_codes(level) {
            if index.code_to_name(level, &code).is_none() {
                return false;
            }
        }
    }
    true
}
