// src/analyze/modifiers.rs
//! The ordered multiplier chain applied on top of the base score.
//!
//! Every modifier is a pure function of [`ScoreContext`] returning a
//! multiplier (1.0 = no effect). [`PIPELINE`] fixes the order; the names are
//! what the explanation string prints. Most code-specific corrections target
//! SSOC 2024 leaf codes directly.

use crate::analyze::similarity::{description_similarity, title_similarity, DescriptionScore};
use crate::analyze::QueryFeatures;
use crate::config::ScoringWeights;
use crate::lexicon::{
    any_in, route_discipline, ADMIN_HINTS, CORPORATE_FUNCTION, DIGITAL_DESIGN,
    DRAFTER_DISCIPLINES, GENERAL_SAFETY_CODE, JUNIOR_TITLE_CUES, MACHINING_CUES, MARINE_CONTEXT,
    OPERATIONAL_CONTEXT, PHYSICAL_SCIENCES, ROLE_ANCHORS, ROLE_CLUSTERS, SAFETY_DISCIPLINES,
    SOFTWARE_SYSTEMS, SUPERVISE_CUES, SUPERVISORY, TECHNICAL, TEXTILE_MACHINE,
};
use crate::query::GroupHint;
use crate::taxonomy::TaxonomyEntry;

/// Everything a modifier may look at for one (query, candidate) pair.
pub struct ScoreContext<'a> {
    pub query: &'a QueryFeatures,
    pub entry: &'a TaxonomyEntry,
    pub title_score: f32,
    pub description: DescriptionScore,
    pub weights: &'a ScoringWeights,
}

impl<'a> ScoreContext<'a> {
    pub fn new(query: &'a QueryFeatures, entry: &'a TaxonomyEntry, weights: &'a ScoringWeights) -> Self {
        Self {
            query,
            entry,
            title_score: title_similarity(query, entry),
            description: description_similarity(query, entry, weights),
            weights,
        }
    }

    fn code(&self) -> &str {
        &self.entry.code
    }

    fn code_in(&self, codes: &[&str]) -> bool {
        codes.contains(&self.code())
    }
}

#[derive(Clone, Copy)]
pub struct Modifier {
    pub name: &'static str,
    pub apply: fn(&ScoreContext) -> f32,
}

pub const PIPELINE: &[Modifier] = &[
    Modifier { name: "seniority", apply: seniority },
    Modifier { name: "title_seniority", apply: title_seniority },
    Modifier { name: "domain", apply: cross_domain },
    Modifier { name: "guard", apply: sector_guard },
    Modifier { name: "coherence", apply: coherence },
    Modifier { name: "td_conflict", apply: title_duty_conflict },
    Modifier { name: "title_sector", apply: title_sector_conflict },
    Modifier { name: "role", apply: role_anchor },
    Modifier { name: "cluster", apply: cluster },
    Modifier { name: "paint", apply: paint },
    Modifier { name: "drafter", apply: drafter },
    Modifier { name: "machinist", apply: machinist },
    Modifier { name: "machine_op", apply: machine_operator },
    Modifier { name: "eng_discipline", apply: engineering_discipline },
    Modifier { name: "corporate_mgr", apply: corporate_manager },
    Modifier { name: "industry_mgr", apply: industry_manager },
    Modifier { name: "marine", apply: marine },
    Modifier { name: "subordinate", apply: subordinate },
    Modifier { name: "design", apply: design },
    Modifier { name: "safety", apply: safety },
    Modifier { name: "occupation", apply: occupation },
    Modifier { name: "group", apply: group_hint },
    Modifier { name: "industry", apply: industry },
];

/// Supervisory candidate while the query shows no supervising cues.
fn seniority(cx: &ScoreContext) -> f32 {
    if !any_in(&cx.entry.context_tokens, &SUPERVISORY) {
        return 1.0;
    }
    if any_in(&cx.query.combined.token_set, &SUPERVISE_CUES) {
        return 1.0;
    }
    if cx.query.combined.sectors.is_disjoint(&cx.entry.sectors) {
        cx.weights.seniority_other_sector
    } else {
        cx.weights.seniority_same_sector
    }
}

/// Junior-sounding title with senior-sounding duties against a supervisory
/// candidate: the stated title wins.
fn title_seniority(cx: &ScoreContext) -> f32 {
    if !any_in(&cx.entry.context_tokens, &SUPERVISORY) {
        return 1.0;
    }
    let title = &cx.query.title.token_set;
    let junior = !any_in(title, &SUPERVISORY) || any_in(title, &JUNIOR_TITLE_CUES);
    let senior_duties = any_in(&cx.query.duties.token_set, &SUPERVISE_CUES);
    if junior && senior_duties {
        cx.weights.title_seniority_conflict
    } else {
        1.0
    }
}

fn cross_domain(cx: &ScoreContext) -> f32 {
    let qt = &cx.query.combined.sectors;
    let ct = &cx.entry.blob.sectors;
    if ct.is_empty() {
        return 1.0;
    }
    let missing = ct.difference(qt).count();
    let mut mult = 1.0;
    if missing == ct.len() {
        mult *= 0.85;
    }
    if missing >= 1 && ct.len() >= 2 {
        mult *= 0.90;
    }
    if (qt.contains("retail") || qt.contains("logistics"))
        && (ct.contains("engineering") || ct.contains("ict"))
    {
        mult *= 0.60;
    }
    if ct.contains("managers")
        && !["managers", "education", "finance", "engineering"]
            .iter()
            .any(|s| qt.contains(s))
    {
        mult *= 0.92;
    }
    mult
}

const GUARDED_SECTORS: &[(&str, f32)] = &[
    ("healthcare", 0.45),
    ("education", 0.55),
    ("hospitality", 0.55),
    ("security", 0.55),
    ("arts_media", 0.60),
    ("travel", 0.50),
];

/// Candidates from sensitive sectors need the query to show the same sector.
fn sector_guard(cx: &ScoreContext) -> f32 {
    let qs = &cx.query.combined.sectors;
    let cs = &cx.entry.sectors;
    let mut mult: f32 = GUARDED_SECTORS
        .iter()
        .filter(|(s, _)| cs.contains(s) && !qs.contains(s))
        .map(|(_, m)| *m)
        .product();

    let c = &cx.entry.context_norm;
    let cues = &cx.query.cues;
    if (c.contains("casino") || c.contains("gaming")) && !cues.gaming {
        mult *= 0.05;
    }
    if (c.contains("sports") || c.contains("sport ")) && !cues.sports {
        mult *= 0.10;
    }
    if (c.contains("marketing") || c.contains("brand") || c.contains("advertis")) && !cues.marketing
    {
        mult *= 0.15;
    }
    mult
}

fn title_duty_overlap(q: &QueryFeatures) -> Option<f32> {
    let tt = &q.title.token_set;
    let dt = &q.duties.token_set;
    if tt.is_empty() || dt.is_empty() {
        return None;
    }
    Some(tt.intersection(dt).count() as f32 / tt.len().min(dt.len()) as f32)
}

/// The candidate wins mainly on title while title and duties barely agree.
fn coherence(cx: &ScoreContext) -> f32 {
    let title_led = cx.title_score > cx.description.value * 1.06;
    match title_duty_overlap(cx.query) {
        Some(inter) if title_led && inter < 0.08 => cx.weights.coherence_penalty,
        _ => 1.0,
    }
}

fn title_duty_conflict(cx: &ScoreContext) -> f32 {
    match title_duty_overlap(cx.query) {
        Some(inter) if inter < 0.06 => cx.weights.title_duty_conflict,
        _ => 1.0,
    }
}

fn title_sector_conflict(cx: &ScoreContext) -> f32 {
    let ts = &cx.query.title.sectors;
    let cs = &cx.entry.blob.sectors;
    if ts.is_empty() || cs.is_empty() || !ts.is_disjoint(cs) {
        return 1.0;
    }
    let heavy_title = ["arch_design", "ict", "engineering", "managers"]
        .iter()
        .any(|s| ts.contains(s));
    let sensitive = ["fnb", "hospitality", "arts_media"].iter().any(|s| cs.contains(s));
    if heavy_title && sensitive {
        cx.weights.title_sector_heavy
    } else {
        cx.weights.title_sector_other
    }
}

fn role_anchor(cx: &ScoreContext) -> f32 {
    let q = &cx.query.combined.token_set;
    let shared = q
        .iter()
        .filter(|t| ROLE_ANCHORS.contains(t.as_str()) && cx.entry.context_tokens.contains(*t))
        .count();
    match shared {
        0 if any_in(q, &ADMIN_HINTS) => 1.03,
        0 => 1.0,
        1 => 1.05,
        2 => 1.08,
        _ => 1.10,
    }
}

/// Query and candidate share a concept cluster (finance, logistics, ...).
fn cluster(cx: &ScoreContext) -> f32 {
    let q = &cx.query.combined;
    let shared = ROLE_CLUSTERS.iter().any(|(_, kw)| {
        kw.matches(&q.normalized, &q.token_set)
            && kw.matches(&cx.entry.context_norm, &cx.entry.context_tokens)
    });
    if shared {
        cx.weights.cluster_boost
    } else {
        1.0
    }
}

/// Vehicle spray painting versus building painting.
fn paint(cx: &ScoreContext) -> f32 {
    let cues = &cx.query.cues;
    let mut mult = 1.0;
    match cx.code() {
        "71322" => {
            if cues.vehicle {
                mult *= 1.12;
            }
            if cues.building_paint && !cues.vehicle {
                mult *= 0.25;
            }
        }
        "71311" => {
            if cues.building_paint {
                mult *= 1.15;
            }
            if cues.vehicle {
                mult *= 0.60;
            }
        }
        _ => {}
    }
    mult
}

/// Drafting queries: boost the matching drafting discipline, push the others down.
fn drafter(cx: &ScoreContext) -> f32 {
    if !cx.query.cues.drafter {
        return 1.0;
    }
    let discipline_codes: Vec<&str> = DRAFTER_DISCIPLINES.iter().map(|d| d.code).collect();
    let mut mult = if discipline_codes.contains(&cx.code()) { 1.20 } else { 1.0 };

    let q = &cx.query.combined;
    if let Some(winner) = route_discipline(&DRAFTER_DISCIPLINES, &q.normalized, &q.token_set) {
        if cx.code() == winner.code {
            mult *= 1.50;
        } else if discipline_codes.contains(&cx.code()) {
            mult *= 0.20;
        }
    }
    mult
}

/// Hands-on machining cues rule out drafting candidates.
fn machinist(cx: &ScoreContext) -> f32 {
    if cx.code().starts_with("3118") && any_in(&cx.query.combined.token_set, &MACHINING_CUES) {
        0.15
    } else {
        1.0
    }
}

/// Sewing machines versus machine tools.
fn machine_operator(cx: &ScoreContext) -> f32 {
    let q = &cx.query.combined;
    match cx.code() {
        "81531" if TECHNICAL.matches(&q.normalized, &q.token_set) => 0.05,
        "72231" if any_in(&q.token_set, &TEXTILE_MACHINE) => 0.05,
        _ => 1.0,
    }
}

/// Software/systems cues against physical-science engineers and the reverse.
fn engineering_discipline(cx: &ScoreContext) -> f32 {
    let in_block = cx
        .code()
        .parse::<u32>()
        .map(|n| (21400..=21600).contains(&n))
        .unwrap_or(false);
    if !in_block {
        return 1.0;
    }
    let q = &cx.query.combined.token_set;
    let software = any_in(q, &SOFTWARE_SYSTEMS);
    let physical = any_in(q, &PHYSICAL_SCIENCES);
    if software && !physical && cx.code_in(&["21492", "21497", "21460", "21451", "21421"]) {
        return 0.10;
    }
    if physical && !software && cx.code_in(&["21526", "21522"]) {
        return 0.10;
    }
    1.0
}

const CORPORATE_MANAGER_CODES: &[&str] = &["12111", "12121", "13301", "24111"];

/// Corporate-function managers need corporate context.
fn corporate_manager(cx: &ScoreContext) -> f32 {
    if !cx.code_in(CORPORATE_MANAGER_CODES) {
        return 1.0;
    }
    let q = &cx.query.combined;
    if any_in(&q.token_set, &OPERATIONAL_CONTEXT) {
        return 0.15;
    }
    let generic_title = matches!(cx.query.title.normalized.as_str(), "manager" | "general manager");
    if generic_title && !CORPORATE_FUNCTION.matches(&q.normalized, &q.token_set) {
        return 0.20;
    }
    1.0
}

/// Industry-specific manager codes need the matching industry in the text.
fn industry_manager(cx: &ScoreContext) -> f32 {
    let c = &cx.query.cues;
    let present = match cx.code() {
        "13210" => c.manufacturing,
        "14121" => c.food_beverage,
        "14201" => c.hospitality,
        "14310" => c.sports,
        "14323" | "14329" | "14324" => c.hospitality || c.sports || c.wellness,
        _ => return 1.0,
    };
    if present {
        1.0
    } else {
        0.10
    }
}

fn marine(cx: &ScoreContext) -> f32 {
    if any_in(&cx.query.combined.token_set, &MARINE_CONTEXT)
        && !cx.entry.sectors.contains("aviation_marine")
    {
        0.05
    } else {
        1.0
    }
}

/// "assisting the managing director" is not a director.
fn subordinate(cx: &ScoreContext) -> f32 {
    if cx.code_in(&["11201", "11203"]) && cx.query.cues.subordinate {
        0.15
    } else {
        1.0
    }
}

/// Digital or graphic design is not interior design.
fn design(cx: &ScoreContext) -> f32 {
    let q = &cx.query.combined;
    if cx.code() == "34321" && DIGITAL_DESIGN.matches(&q.normalized, &q.token_set) {
        0.10
    } else {
        1.0
    }
}

fn safety(cx: &ScoreContext) -> f32 {
    let q = &cx.query.combined;
    if !q.token_set.contains("safety") {
        return 1.0;
    }
    match route_discipline(&SAFETY_DISCIPLINES, &q.normalized, &q.token_set) {
        None if cx.code() == GENERAL_SAFETY_CODE => 1.20,
        None => 1.0,
        Some(winner) if winner.code == cx.code() => 1.50,
        Some(_) if SAFETY_DISCIPLINES.iter().any(|d| d.code == cx.code()) => 0.20,
        Some(_) => 1.0,
    }
}

fn is_five_digit_with_prefix(code: &str, prefix: &str) -> bool {
    code.len() == 5 && code.starts_with(prefix) && code.bytes().all(|b| b.is_ascii_digit())
}

/// Narrow corrections for frequently confused leaf codes.
fn occupation(cx: &ScoreContext) -> f32 {
    let q = cx.query;
    let c = &q.cues;
    let code = cx.code();
    let has = |needle: &str| q.text_contains(needle);
    let mut mult = 1.0;

    if c.client_facing {
        match code {
            "26111" => mult *= 1.30,
            "26121" => mult *= 0.20,
            _ => {}
        }
    }
    if code == "74110" && c.electrician {
        mult *= 1.25;
    }
    if code == "93100" && c.construction_labour {
        mult *= 1.25;
    }
    if code == "71331" && c.construction_labour && !has("maintenance") {
        mult *= 0.45;
    }

    let padded = format!(" {} ", q.combined.normalized);
    if has("managing director") || has("chief operating officer") || padded.contains(" coo ") {
        if cx.code_in(&["11201", "11203"]) {
            mult *= 1.18;
        }
        if is_five_digit_with_prefix(code, "265") && !c.arts_media {
            mult *= 0.20;
        }
        if code == "14321" && !c.gaming {
            mult *= 0.25;
        }
    }

    if has("operations manager") && code == "13299" && !(c.gaming || c.hospitality || c.arts_media) {
        mult *= 1.12;
    }

    if has("office manager") {
        if code == "12112" && (c.admin_manager || has("oversee") || has("manage")) {
            mult *= 1.18;
        }
        if code == "41101" {
            mult *= 0.60;
        }
    }

    if has("mechanical technician") {
        if code == "31151" {
            mult *= 1.15;
        }
        if code == "72310" && !c.vehicle {
            mult *= 0.50;
        }
    }

    if has("storekeeper") || has("store keeper") || has("storeman") {
        if cx.code_in(&["43212", "43211"]) {
            mult *= 1.25;
        }
        if code.starts_with("31") || code.starts_with("21") {
            mult *= 0.55;
        }
    }

    if has("workshop supervisor") || (has("workshop") && has("supervisor")) {
        if code == "72000" {
            mult *= 1.15;
        }
        if code.len() == 5 && code.starts_with("5150") && matches!(code.as_bytes()[4], b'1'..=b'5') {
            mult *= 0.25;
        }
    }

    if has("project officer") && !c.attractions {
        match code {
            "24213" => mult *= 1.15,
            "31603" => mult *= 0.40,
            _ => {}
        }
    }

    if has("engineer") && (c.construction_labour || c.drafter || has("civil") || has("structural")) {
        if cx.code_in(&["21421", "21422"]) {
            mult *= 1.20;
        }
        if code == "21497" {
            mult *= 0.30;
        }
    }

    if has("project manager") {
        if code == "13299" {
            mult *= 1.15;
        }
        if code == "14310" && !c.sports {
            mult *= 0.20;
        }
    }

    if has("manager") && c.construction_labour && code == "13299" {
        mult *= 1.12;
    }

    if has("site supervisor") || (has("supervisor") && c.construction_labour) {
        if code == "83000" {
            mult *= 1.20;
        }
        if code == "51702" && !(has("casino") || has("gaming")) {
            mult *= 0.10;
        }
    }

    if code == "51702" && !c.gaming {
        mult *= 0.05;
    }
    if code == "14310" && !c.sports {
        mult *= 0.10;
    }
    mult
}

fn group_hint(cx: &ScoreContext) -> f32 {
    match (cx.query.group_hint, cx.entry.major_group()) {
        (Some(GroupHint::Major(g)), Some(major)) if g == major => cx.weights.group_match,
        (Some(GroupHint::Major(_)), Some(_)) => cx.weights.group_mismatch,
        _ => 1.0,
    }
}

/// Step function of the shared-sector ratio; non-decreasing in `ratio`.
pub fn industry_multiplier_for_ratio(ratio: f32, w: &ScoringWeights) -> f32 {
    if ratio > w.industry_strong_ratio {
        w.industry_strong
    } else if ratio > w.industry_moderate_ratio {
        w.industry_moderate
    } else {
        1.0
    }
}

/// Share of the candidate's sectors that the employer's industry text also shows.
fn industry(cx: &ScoreContext) -> f32 {
    let Some(ind) = cx.query.industry.as_ref() else {
        return 1.0;
    };
    let company = &ind.sectors;
    let candidate = &cx.entry.sectors;
    if company.is_empty() || candidate.is_empty() {
        return 1.0;
    }
    let shared = candidate.intersection(company).count();
    industry_multiplier_for_ratio(shared as f32 / candidate.len() as f32, cx.weights)
}
