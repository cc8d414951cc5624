// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! The gazetteer index: tries, adjacency maps, and precomputed candidate
//! token vectors, built once and shared read-only for the life of the
//! process.

mod trie;

use crate::alias::generate_aliases;
use crate::error::BuildError;
use crate::normalize::normalize_aggressive;
use crate::types::{Code, EntityId, GazetteerRecord, Level};
use std::collections::HashMap;
use trie::Trie;

/// Centrally-governed municipalities: the only provinces for which a leading
/// `tp` marker can mean "province" rather than "district-level provincial
/// city". Intersected against the built index rather than trusted blindly,
/// so a fixture gazetteer that omits one doesn't silently misclassify it.
const KNOWN_LEVEL1_CITY_NAMES: &[&str] =
    &["ha noi", "ho chi minh", "hai phong", "da nang", "can tho", "hue"];

/// External supplier of raw gazetteer records.
///
/// Loading from disk, a database, or an embedded asset is out of scope for
/// this crate; implement this trait over whatever source is available. A
/// simple in-memory implementation is provided as [`VecGazetteerSource`].
pub trait GazetteerSource {
    fn provinces(&self) -> Box<dyn Iterator<Item = GazetteerRecord> + '_>;
    fn districts(&self) -> Box<dyn Iterator<Item = GazetteerRecord> + '_>;
    fn wards(&self) -> Box<dyn Iterator<Item = GazetteerRecord> + '_>;
}

/// A [`GazetteerSource`] backed by three in-memory vectors. Suitable for
/// tests, fixtures, and small embedded gazetteers.
#[derive(Debug, Clone, Default)]
pub struct VecGazetteerSource {
    pub provinces: Vec<GazetteerRecord>,
    pub districts: Vec<GazetteerRecord>,
    pub wards: Vec<GazetteerRecord>,
}

impl GazetteerSource for VecGazetteerSource {
    fn provinces(&self) -> Box<dyn Iterator<Item = GazetteerRecord> + '_> {
        Box::new(self.provinces.iter().cloned())
    }
    fn districts(&self) -> Box<dyn Iterator<Item = GazetteerRecord> + '_> {
        Box::new(self.districts.iter().cloned())
    }
    fn wards(&self) -> Box<dyn Iterator<Item = GazetteerRecord> + '_> {
        Box::new(self.wards.iter().cloned())
    }
}

#[cfg(feature = "serde_json")]
impl VecGazetteerSource {
    /// Loads a gazetteer from three JSON arrays of [`GazetteerRecord`], one
    /// per level. This is a convenience for embedding a gazetteer as data
    /// rather than code; it does no validation of its own, so malformed or
    /// inconsistent records still surface through [`build_index`]'s own
    /// checks.
    pub fn from_json(
        provinces_json: &str,
        districts_json: &str,
        wards_json: &str,
    ) -> serde_json::Result<Self> {
        Ok(Self {
            provinces: serde_json::from_str(provinces_json)?,
            districts: serde_json::from_str(districts_json)?,
            wards: serde_json::from_str(wards_json)?,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Entity {
    pub code: Code,
    pub name: String,
    pub parent_code: Option<Code>,
    pub level: Level,
    /// Aggressive-normalized token vector of `name`, precomputed once at
    /// build time for Tier 2/3 use.
    pub tokens: Vec<String>,
}

/// The immutable in-memory gazetteer: tries, arenas, and adjacency maps.
///
/// Constructed once via [`build_index`] and shared read-only across queries;
/// nothing in this crate mutates it after construction.
#[derive(Debug)]
pub struct GazetteerIndex {
    entities: Vec<Entity>,
    province_trie: Trie,
    district_trie: Trie,
    ward_trie: Trie,
    province_by_code: HashMap<Code, EntityId>,
    district_by_code: HashMap<Code, EntityId>,
    ward_by_code: HashMap<Code, EntityId>,
    all_province_ids: Vec<EntityId>,
    all_district_ids: Vec<EntityId>,
    all_ward_ids: Vec<EntityId>,
    districts_of: HashMap<Code, Vec<EntityId>>,
    wards_of: HashMap<Code, Vec<EntityId>>,
}

impl GazetteerIndex {
    pub(crate) fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.as_usize()]
    }

    pub(crate) fn trie(&self, level: Level) -> &Trie {
        match level {
            Level::Province => &self.province_trie,
            Level::District => &self.district_trie,
            Level::Ward => &self.ward_trie,
        }
    }

    pub(crate) fn by_code(&self, level: Level, code: &str) -> Option<EntityId> {
        let map = match level {
            Level::Province => &self.province_by_code,
            Level::District => &self.district_by_code,
            Level::Ward => &self.ward_by_code,
        };
        map.get(code).copied()
    }

    /// Resolve `code` to its display name at `level`, or `None` if `code`
    /// does not exist.
    pub fn code_to_name(&self, level: Level, code: &str) -> Option<&str> {
        self.by_code(level, code).map(|id| self.entity(id).name.as_str())
    }

    /// Resolve `code`'s parent code at `level` (provinces have none).
    pub fn parent_code(&self, level: Level, code: &str) -> Option<&str> {
        let id = self.by_code(level, code)?;
        self.entity(id).parent_code.as_deref()
    }

    /// All districts of `province_code`, or empty if unknown or there are none.
    pub(crate) fn district_ids_of(&self, province_code: &str) -> &[EntityId] {
        self.districts_of.get(province_code).map_or(&[], Vec::as_slice)
    }

    /// All wards of `district_code`, or empty if unknown or there are none.
    pub(crate) fn ward_ids_of(&self, district_code: &str) -> &[EntityId] {
        self.wards_of.get(district_code).map_or(&[], Vec::as_slice)
    }

    /// The full candidate set at `level`, hierarchically constrained to
    /// `parent_code`'s children when given, otherwise every entity at that
    /// level. Mirrors §4.6/§4.7's candidate-set rule.
    pub(crate) fn candidates(&self, level: Level, parent_code: Option<&str>) -> Vec<EntityId> {
        match (level, parent_code) {
            (Level::District, Some(p)) => self.district_ids_of(p).to_vec(),
            (Level::Ward, Some(p)) => self.ward_ids_of(p).to_vec(),
            (Level::Province, _) => self.all_province_ids.clone(),
            (Level::District, None) => self.all_district_ids.clone(),
            (Level::Ward, None) => self.all_ward_ids.clone(),
        }
    }

    /// Aggressive-normalized names of the recognized centrally-governed
    /// municipalities actually present in this index, for the prefix
    /// handler's `tp` disambiguation.
    pub fn level1_city_names(&self) -> Vec<&str> {
        KNOWN_LEVEL1_CITY_NAMES
            .iter()
            .copied()
            .filter(|known| {
                self.all_province_ids
                    .iter()
                    .any(|&id| normalize_aggressive(&self.entity(id).name) == *known)
            })
            .collect()
    }

    pub(crate) fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// All codes present at `level`, in build order. Used by the debug-mode
    /// invariant checks in `contracts.rs`; not meant for the hot path.
    pub(crate) fn all_codes(&self, level: Level) -> Vec<Code> {
        let ids = match level {
            Level::Province => &self.all_province_ids,
            Level::District => &self.all_district_ids,
            Level::Ward => &self.all_ward_ids,
        };
        ids.iter().map(|&id| self.entity(id).code.clone()).collect()
    }
}

/// Build a [`GazetteerIndex`] from `source`.
///
/// Reads provinces, then districts, then wards, validating parent
/// references as it goes. Errors are returned, never panicked on — a
/// malformed gazetteer is the caller's problem to fix, not this crate's to
/// paper over.
pub fn build_index<S: GazetteerSource>(source: &S) -> Result<GazetteerIndex, BuildError> {
    let mut entities = Vec::new();
    let mut province_by_code = HashMap::new();
    let mut district_by_code = HashMap::new();
    let mut ward_by_code = HashMap::new();
    let mut all_province_ids = Vec::new();
    let mut all_district_ids = Vec::new();
    let mut all_ward_ids = Vec::new();
    let mut districts_of: HashMap<Code, Vec<EntityId>> = HashMap::new();
    let mut wards_of: HashMap<Code, Vec<EntityId>> = HashMap::new();
    let mut province_trie = Trie::new();
    let mut district_trie = Trie::new();
    let mut ward_trie = Trie::new();

    for record in source.provinces() {
        let code: Code = Code::from(record.code.as_str());
        if province_by_code.contains_key(&code) {
            return Err(BuildError::DuplicateCode {
                level: Level::Province,
                code: record.code,
            });
        }
        let id = push_entity(&mut entities, &code, &record.name, None, Level::Province);
        index_aliases(&mut province_trie, &record.name, id);
        province_by_code.insert(code, id);
        all_province_ids.push(id);
    }
    if all_province_ids.is_empty() {
        return Err(BuildError::EmptyLevel { level: Level::Province });
    }

    for record in source.districts() {
        let code: Code = Code::from(record.code.as_str());
        if district_by_code.contains_key(&code) {
            return Err(BuildError::DuplicateCode {
                level: Level::District,
                code: record.code,
            });
        }
        let parent_raw = record.parent_code.clone().ok_or_else(|| BuildError::MissingParent {
            level: Level::District,
            code: record.code.clone(),
            parent_code: String::new(),
        })?;
        let parent_code: Code = Code::from(parent_raw.as_str());
        if !province_by_code.contains_key(&parent_code) {
            return Err(BuildError::MissingParent {
                level: Level::District,
                code: record.code,
                parent_code: parent_raw,
            });
        }
        let id = push_entity(&mut entities, &code, &record.name, Some(parent_code.clone()), Level::District);
        index_aliases(&mut district_trie, &record.name, id);
        district_by_code.insert(code.clone(), id);
        all_district_ids.push(id);
        districts_of.entry(parent_code).or_default().push(id);
    }
    if all_district_ids.is_empty() {
        return Err(BuildError::EmptyLevel { level: Level::District });
    }

    for record in source.wards() {
        let code: Code = Code::from(record.code.as_str());
        if ward_by_code.contains_key(&code) {
            return Err(BuildError::DuplicateCode {
                level: Level::Ward,
                code: record.code,
            });
        }
        let parent_raw = record.parent_code.clone().ok_or_else(|| BuildError::MissingParent {
            level: Level::Ward,
            code: record.code.clone(),
            parent_code: String::new(),
        })?;
        let parent_code: Code = Code::from(parent_raw.as_str());
        if !district_by_code.contains_key(&parent_code) {
            return Err(BuildError::MissingParent {
                level: Level::Ward,
                code: record.code,
                parent_code: parent_raw,
            });
        }
        let id = push_entity(&mut entities, &code, &record.name, Some(parent_code.clone()), Level::Ward);
        index_aliases(&mut ward_trie, &record.name, id);
        ward_by_code.insert(code.clone(), id);
        all_ward_ids.push(id);
        wards_of.entry(parent_code).or_default().push(id);
    }
    if all_ward_ids.is_empty() {
        return Err(BuildError::EmptyLevel { level: Level::Ward });
    }

    let index = GazetteerIndex {
        entities,
        province_trie,
        district_trie,
        ward_trie,
        province_by_code,
        district_by_code,
        ward_by_code,
        all_province_ids,
        all_district_ids,
        all_ward_ids,
        districts_of,
        wards_of,
    };

    crate::contracts::verify_build_invariants(&index);

    Ok(index)
}

fn push_entity(
    entities: &mut Vec<Entity>,
    code: &Code,
    name: &str,
    parent_code: Option<Code>,
    level: Level,
) -> EntityId {
    let id = EntityId(entities.len() as u32);
    let normalized = normalize_aggressive(name);
    let tokens = normalized.split_whitespace().map(str::to_string).collect();
    entities.push(Entity {
        code: code.clone(),
        name: name.to_string(),
        parent_code,
        level,
        tokens,
    });
    id
}

fn index_aliases(trie: &mut Trie, canonical_name: &str, id: EntityId) {
    for alias in generate_aliases(canonical_name) {
        trie.insert(&alias, id);
    }
}
