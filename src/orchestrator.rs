// Copyright 2026-present The Diachi Authors
// SPDX-License-Identifier: Apache-2.0

//! Sequences the three tiers, enforces hierarchical consistency between
//! them, and assigns the final confidence and source tag.

use crate::config::MatcherConfig;
use crate::gazetteer::GazetteerIndex;
use crate::normalize::{normalize_aggressive, tokenize};
use crate::prefix::expand_prefixes;
use crate::search::edit_matcher::{match_edit_distance, EditMatch};
use crate::search::lcs_matcher::{match_lcs, LcsMatch};
use crate::search::trie_matcher::{match_trie, TrieResult};
use crate::search::RawHit;
use crate::trace::{HandoffReason, ParseTrace, TierAttemptTrace, TraceEntry, TrieHitTrace};
use crate::types::{EntityId, Level, MatchMethod, ParsedAddress};
use std::time::Instant;

/// Parse `text` against `index` under `config`. Total function: never
/// panics on malformed input, and returns an empty [`ParsedAddress`] when
/// nothing can be resolved within the configured budget.
pub fn parse(index: &GazetteerIndex, text: &str, config: &MatcherConfig) -> ParsedAddress {
    run(index, text, config, None).0
}

/// Like [`parse`], but also returns a [`ParseTrace`] describing every
/// decision made along the way. Not intended for the production hot path —
/// it allocates trace records that `parse` never builds.
pub fn parse_traced(index: &GazetteerIndex, text: &str, config: &MatcherConfig) -> (ParsedAddress, ParseTrace) {
    let (result, trace) = run(index, text, config, Some(ParseTrace::default()));
    (result, trace.unwrap())
}

/// Per-level provenance tracked internally through the cascade; collapsed to
/// a single [`MatchMethod`] on the returned [`ParsedAddress`] via
/// `MatchMethod::downgrade`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sources {
    province: MatchMethod,
    district: MatchMethod,
    ward: MatchMethod,
}

impl Sources {
    fn none() -> Self {
        Self {
            province: MatchMethod::None,
            district: MatchMethod::None,
            ward: MatchMethod::None,
        }
    }

    fn combined(&self) -> MatchMethod {
        MatchMethod::None
            .downgrade(self.province)
            .downgrade(self.district)
            .downgrade(self.ward)
    }
}

fn run(
    index: &GazetteerIndex,
    text: &str,
    config: &MatcherConfig,
    mut trace: Option<ParseTrace>,
) -> (ParsedAddress, Option<ParseTrace>) {
    let start = Instant::now();
    let level1_names = index.level1_city_names();
    let tokens_owned = build_match_tokens(text, &level1_names);
    let tokens: Vec<&str> = tokens_owned.iter().map(String::as_str).collect();

    if let Some(t) = trace.as_mut() {
        t.normalized_tokens = tokens_owned.clone();
    }

    if tokens.is_empty() {
        return (ParsedAddress::empty(), trace);
    }

    let trie_result = match_trie(index, &tokens, config);
    if let Some(t) = trace.as_mut() {
        record_trie_hits(t, &trie_result);
    }

    let had_trie_hit = [
        trie_result.province.is_some(),
        trie_result.district.is_some(),
        trie_result.ward.is_some(),
    ];

    let (mut result, mut sources) = handoff(index, &trie_result, trace.as_mut());

    if !is_complete(&result) && within_budget(start, config) {
        run_lcs_cascade(index, &tokens, &mut result, &mut sources, config, trace.as_mut());
    }

    if !is_complete(&result) && within_budget(start, config) {
        run_edit_cascade(index, &tokens, &mut result, &mut sources, config, trace.as_mut());
    }

    finalize(&mut result, sources, had_trie_hit);
    (result, trace)
}

fn within_budget(start: Instant, config: &MatcherConfig) -> bool {
    (start.elapsed().as_millis() as u64) < config.budget_ms
}

fn is_complete(result: &ParsedAddress) -> bool {
    result.province.is_some() && result.district.is_some() && result.ward.is_some()
}

/// Segment by comma (each segment keeps its own punctuation for the prefix
/// handler's marker matching), strip administrative markers per segment,
/// then aggressively normalize and concatenate into one flat token sequence
/// for the tiers to scan.
fn build_match_tokens(text: &str, level1_names: &[&str]) -> Vec<String> {
    let mut tokens = Vec::new();
    for raw_segment in text.split(',') {
        let expansion = expand_prefixes(raw_segment, level1_names);
        let agg = normalize_aggressive(&expansion.stripped_text);
        tokens.extend(tokenize(&agg).into_iter().map(str::to_string));
    }
    tokens
}

/// Apply the handoff cascade to a raw Tier 1 result: a level only survives if
/// exactly one of its candidates' parent codes matches the already-resolved
/// parent. Returns the partially-filled address and the per-level provenance
/// established so far.
fn handoff(index: &GazetteerIndex, trie_result: &TrieResult, mut trace: Option<&mut ParseTrace>) -> (ParsedAddress, Sources) {
    let mut result = ParsedAddress::empty();
    let mut sources = Sources::none();

    let (province_id, province_reason) = resolve_level(index, trie_result.province.as_ref(), None);
    log_handoff(trace.as_deref_mut(), Level::Province, &province_reason);
    let Some(province_id) = province_id else {
        return (result, sources);
    };
    fill_province(index, &mut result, province_id);
    sources.province = MatchMethod::Trie;

    let province_code = result.province_code.clone().unwrap();
    let (district_id, district_reason) = resolve_level(index, trie_result.district.as_ref(), Some(&province_code));
    log_handoff(trace.as_deref_mut(), Level::District, &district_reason);
    let Some(district_id) = district_id else {
        return (result, sources);
    };
    fill_district(index, &mut result, district_id);
    sources.district = MatchMethod::Trie;

    let district_code = result.district_code.clone().unwrap();
    let (ward_id, ward_reason) = resolve_level(index, trie_result.ward.as_ref(), Some(&district_code));
    log_handoff(trace.as_deref_mut(), Level::Ward, &ward_reason);
    if let Some(ward_id) = ward_id {
        fill_ward(index, &mut result, ward_id);
        sources.ward = MatchMethod::Trie;
    }

    (result, sources)
}

fn log_handoff(trace: Option<&mut ParseTrace>, level: Level, reason: &HandoffReason) {
    if let Some(t) = trace {
        t.handoff_decisions.push(TraceEntry {
            level,
            method: MatchMethod::Trie,
            reason: reason.clone(),
        });
    }
}

/// Resolve a Tier 1 hit against an (optional) required parent code.
/// `required_parent = None` means "no parent to validate" (province level).
fn resolve_level(index: &GazetteerIndex, hit: Option<&RawHit>, required_parent: Option<&str>) -> (Option<EntityId>, HandoffReason) {
    let Some(hit) = hit else {
        return (None, HandoffReason::NoHit);
    };

    let passing: Vec<EntityId> = hit
        .candidates
        .iter()
        .copied()
        .filter(|&id| match required_parent {
            None => true,
            Some(parent) => index.entity(id).parent_code.as_deref() == Some(parent),
        })
        .collect();

    match passing.as_slice() {
        [] => (None, HandoffReason::ParentMismatch),
        [single] => (Some(*single), HandoffReason::Resolved),
        _ => (None, HandoffReason::AmbiguousCandidates),
    }
}

fn fill_province(index: &GazetteerIndex, result: &mut ParsedAddress, id: EntityId) {
    let e = index.entity(id);
    result.province = Some(e.name.clone());
    result.province_code = Some(e.code.to_string());
}

fn fill_district(index: &GazetteerIndex, result: &mut ParsedAddress, id: EntityId) {
    let e = index.entity(id);
    result.district = Some(e.name.clone());
    result.district_code = Some(e.code.to_string());
}

fn fill_ward(index: &GazetteerIndex, result: &mut ParsedAddress, id: EntityId) {
    let e = index.entity(id);
    result.ward = Some(e.name.clone());
    result.ward_code = Some(e.code.to_string());
}

/// Tier 2: fill whichever of district/ward is still missing, in that order.
/// District is only attempted once province is resolved; ward is attempted
/// once district is resolved, or — when district is still missing but
/// province is known — across every ward in that province's districts. This
/// keeps the universal invariant `province = none ⇒ district = none ∧ ward =
/// none` intact while still letting a uniquely-identifiable ward (paired
/// with the wrong district name) backfill its own district from its own
/// parent pointer, a structural fact about the resolved entity rather than
/// an inferred guess.
fn run_lcs_cascade(
    index: &GazetteerIndex,
    tokens: &[&str],
    result: &mut ParsedAddress,
    sources: &mut Sources,
    config: &MatcherConfig,
    mut trace: Option<&mut ParseTrace>,
) {
    if result.province.is_none() {
        let inspected = index.candidates(Level::Province, None).len();
        let hit = match_lcs(index, tokens, Level::Province, None, config);
        log_tier2(trace.as_deref_mut(), Level::Province, inspected, hit.map(|m| m.score));
        if let Some(m) = hit {
            fill_province(index, result, m.candidate);
            sources.province = MatchMethod::Lcs;
        }
    }

    if result.district.is_none() {
        if let Some(province_code) = result.province_code.clone() {
            let inspected = index.candidates(Level::District, Some(&province_code)).len();
            let hit = match_lcs(index, tokens, Level::District, Some(&province_code), config);
            log_tier2(trace.as_deref_mut(), Level::District, inspected, hit.map(|m| m.score));
            if let Some(m) = hit {
                fill_district(index, result, m.candidate);
                sources.district = MatchMethod::Lcs;
            }
        }
    }

    if result.ward.is_none() {
        if let Some(district_code) = result.district_code.clone() {
            let inspected = index.candidates(Level::Ward, Some(&district_code)).len();
            let hit = match_lcs(index, tokens, Level::Ward, Some(&district_code), config);
            log_tier2(trace.as_deref_mut(), Level::Ward, inspected, hit.map(|m| m.score));
            if let Some(m) = hit {
                fill_ward(index, result, m.candidate);
                sources.ward = MatchMethod::Lcs;
            }
        } else if let Some(province_code) = result.province_code.clone() {
            let (hit, inspected) = best_lcs_across_districts(index, tokens, &province_code, config);
            log_tier2(trace.as_deref_mut(), Level::Ward, inspected, hit.map(|m| m.score));
            if let Some(m) = hit {
                backfill_from_ward(index, result, sources, m.candidate, MatchMethod::Lcs);
            }
        }
    }
}

fn run_edit_cascade(
    index: &GazetteerIndex,
    tokens: &[&str],
    result: &mut ParsedAddress,
    sources: &mut Sources,
    config: &MatcherConfig,
    mut trace: Option<&mut ParseTrace>,
) {
    if result.province.is_none() {
        let inspected = index.candidates(Level::Province, None).len();
        let hit = match_edit_distance(index, tokens, Level::Province, None, config);
        log_tier3(trace.as_deref_mut(), Level::Province, inspected, hit.map(|m| m.distance));
        if let Some(m) = hit {
            fill_province(index, result, m.candidate);
            sources.province = MatchMethod::EditDistance;
        }
    }

    if result.district.is_none() {
        if let Some(province_code) = result.province_code.clone() {
            let inspected = index.candidates(Level::District, Some(&province_code)).len();
            let hit = match_edit_distance(index, tokens, Level::District, Some(&province_code), config);
            log_tier3(trace.as_deref_mut(), Level::District, inspected, hit.map(|m| m.distance));
            if let Some(m) = hit {
                fill_district(index, result, m.candidate);
                sources.district = MatchMethod::EditDistance;
            }
        }
    }

    if result.ward.is_none() {
        if let Some(district_code) = result.district_code.clone() {
            let inspected = index.candidates(Level::Ward, Some(&district_code)).len();
            let hit = match_edit_distance(index, tokens, Level::Ward, Some(&district_code), config);
            log_tier3(trace.as_deref_mut(), Level::Ward, inspected, hit.map(|m| m.distance));
            if let Some(m) = hit {
                fill_ward(index, result, m.candidate);
                sources.ward = MatchMethod::EditDistance;
            }
        } else if let Some(province_code) = result.province_code.clone() {
            let (hit, inspected) = best_edit_across_districts(index, tokens, &province_code, config);
            log_tier3(trace.as_deref_mut(), Level::Ward, inspected, hit.map(|m| m.distance));
            if let Some(m) = hit {
                backfill_from_ward(index, result, sources, m.candidate, MatchMethod::EditDistance);
            }
        }
    }
}

/// Search every ward across `province_code`'s districts (not the whole
/// country) for the best LCS match, keeping the higher score; ties favor the
/// longer candidate name, mirroring `match_lcs`'s own tie-break.
fn best_lcs_across_districts(index: &GazetteerIndex, tokens: &[&str], province_code: &str, config: &MatcherConfig) -> (Option<LcsMatch>, usize) {
    let mut best: Option<LcsMatch> = None;
    let mut inspected = 0;
    for &district_id in index.district_ids_of(province_code) {
        let district_code = index.entity(district_id).code.clone();
        inspected += index.candidates(Level::Ward, Some(&district_code)).len();
        let Some(candidate) = match_lcs(index, tokens, Level::Ward, Some(&district_code), config) else {
            continue;
        };
        best = Some(match best {
            None => candidate,
            Some(current) if candidate.score > current.score => candidate,
            Some(current)
                if candidate.score == current.score
                    && name_len(index, candidate.candidate) > name_len(index, current.candidate) =>
            {
                candidate
            }
            Some(current) => current,
        });
    }
    (best, inspected)
}

/// Same as [`best_lcs_across_districts`] but for Tier 3: keeps the smaller
/// edit distance, ties favor the shorter candidate name.
fn best_edit_across_districts(index: &GazetteerIndex, tokens: &[&str], province_code: &str, config: &MatcherConfig) -> (Option<EditMatch>, usize) {
    let mut best: Option<EditMatch> = None;
    let mut inspected = 0;
    for &district_id in index.district_ids_of(province_code) {
        let district_code = index.entity(district_id).code.clone();
        inspected += index.candidates(Level::Ward, Some(&district_code)).len();
        let Some(candidate) = match_edit_distance(index, tokens, Level::Ward, Some(&district_code), config) else {
            continue;
        };
        best = Some(match best {
            None => candidate,
            Some(current) if candidate.distance < current.distance => candidate,
            Some(current)
                if candidate.distance == current.distance
                    && name_len(index, candidate.candidate) < name_len(index, current.candidate) =>
            {
                candidate
            }
            Some(current) => current,
        });
    }
    (best, inspected)
}

fn name_len(index: &GazetteerIndex, id: EntityId) -> usize {
    index.entity(id).name.chars().count()
}

/// A ward resolved without its district known yet always carries its own
/// immediate parent code as a structural fact, not a guess; fill it in. The
/// province is already confirmed, since the candidate set was scoped to its
/// own districts.
fn backfill_from_ward(index: &GazetteerIndex, result: &mut ParsedAddress, sources: &mut Sources, ward_id: EntityId, method: MatchMethod) {
    fill_ward(index, result, ward_id);
    sources.ward = method;
    if let Some(district_code) = index.entity(ward_id).parent_code.clone() {
        if let Some(district_id) = index.by_code(Level::District, &district_code) {
            fill_district(index, result, district_id);
            sources.district = method;
        }
    }
}

fn record_trie_hits(trace: &mut ParseTrace, trie_result: &TrieResult) {
    for (level, hit) in [
        (Level::Province, &trie_result.province),
        (Level::District, &trie_result.district),
        (Level::Ward, &trie_result.ward),
    ] {
        if let Some(hit) = hit {
            trace.trie_hits.push(TrieHitTrace {
                level,
                span: hit.span,
                candidate_count: hit.candidates.len(),
            });
        }
    }
}

fn log_tier2(trace: Option<&mut ParseTrace>, level: Level, inspected: usize, score: Option<f64>) {
    if let Some(t) = trace {
        t.tier2_attempts.push(TierAttemptTrace {
            level,
            method: MatchMethod::Lcs,
            candidates_inspected: inspected,
            chosen_score: score,
            chosen_distance: None,
        });
    }
}

fn log_tier3(trace: Option<&mut ParseTrace>, level: Level, inspected: usize, distance: Option<usize>) {
    if let Some(t) = trace {
        t.tier3_attempts.push(TierAttemptTrace {
            level,
            method: MatchMethod::EditDistance,
            candidates_inspected: inspected,
            chosen_score: None,
            chosen_distance: distance,
        });
    }
}

/// Assign `match_method`, `confidence`, and `valid`. A result with no
/// province is always the canonical empty address, regardless of what Tier
/// 2/3 might otherwise have guessed at lower levels.
fn finalize(result: &mut ParsedAddress, sources: Sources, had_trie_hit: [bool; 3]) {
    if result.province.is_none() {
        *result = ParsedAddress::empty();
        return;
    }

    result.match_method = sources.combined();

    let depth = if result.ward.is_some() {
        3
    } else if result.district.is_some() {
        2
    } else {
        1
    };

    let any_edit = [sources.province, sources.district, sources.ward]
        .iter()
        .any(|&s| s == MatchMethod::EditDistance);
    let any_lcs = sources.district == MatchMethod::Lcs || sources.ward == MatchMethod::Lcs;
    let province_from_trie = sources.province == MatchMethod::Trie;

    let base = if any_edit {
        0.6
    } else if !province_from_trie {
        // "LCS only (no P context)" row: province itself was not a trie hit.
        match depth {
            1 => 0.50,
            2 => 0.55,
            _ => 0.60,
        }
    } else {
        match (depth, any_lcs) {
            (1, _) => 0.9,
            (2, false) => 0.95,
            (2, true) => 0.75,
            (3, false) => 1.0,
            (3, true) => 0.80,
            _ => unreachable!(),
        }
    };

    let final_sources = [sources.province, sources.district, sources.ward];
    let downgraded_levels = final_sources
        .iter()
        .zip(had_trie_hit.iter())
        .filter(|(&s, &had)| had && s != MatchMethod::Trie)
        .count();

    let downgrade_penalty = 1.0 - 0.1 * downgraded_levels as f64;
    result.confidence = base.min(downgrade_penalty).max(0.0);
    result.valid = true;
}
