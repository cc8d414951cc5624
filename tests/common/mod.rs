// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Shared fixture gazetteer for every integration/unit/property test file.
//!
//! Three provinces, a handful of districts, and wards including a name
//! ("Phường 1") duplicated across four different districts, plus two
//! districts ("Tân Bình", "Thanh Bình") that collide on the two-letter
//! initials alias `"tb"` — the kind of ambiguous short alias the build is
//! required to discover rather than special-case.

use diachi::{build_index, GazetteerIndex, GazetteerRecord, VecGazetteerSource};

pub fn fixture_source() -> VecGazetteerSource {
    VecGazetteerSource {
        provinces: vec![
            GazetteerRecord::new("01", "Hà Nội", None),
            GazetteerRecord::new("79", "Hồ Chí Minh", None),
            GazetteerRecord::new("48", "Đà Nẵng", None),
        ],
        districts: vec![
            GazetteerRecord::new("001", "Nam Từ Liêm", Some("01".into())),
            GazetteerRecord::new("002", "Cầu Giấy", Some("01".into())),
            GazetteerRecord::new("760", "Tân Bình", Some("79".into())),
            GazetteerRecord::new("761", "Tân Phú", Some("79".into())),
            GazetteerRecord::new("490", "Thanh Bình", Some("48".into())),
        ],
        wards: vec![
            GazetteerRecord::new("00001", "Cầu Diễn", Some("001".into())),
            GazetteerRecord::new("00002", "Phường 1", Some("001".into())),
            GazetteerRecord::new("00003", "Phường 1", Some("002".into())),
            GazetteerRecord::new("00004", "Phường 1", Some("760".into())),
            GazetteerRecord::new("00005", "Phường 1", Some("761".into())),
            GazetteerRecord::new("00006", "Hòa Khánh", Some("490".into())),
        ],
    }
}

pub fn fixture_index() -> GazetteerIndex {
    build_index(&fixture_source()).expect("fixture gazetteer must build")
}
