// src/taxonomy.rs
//! Occupation catalogue: table parsing, header resolution, per-entry text
//! precomputation, leaf detection and the title lookup map.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use tracing::{debug, info};

use crate::error::ConfigurationError;
use crate::lexicon::{SectorSet, GENERIC_TITLE_WORDS};
use crate::text::{normalize, token_set, TextFeatures};

pub const UNIDENTIFIABLE: &str = "X1000";
pub const NOT_REPORTED: &str = "X2000";
pub const NATIONAL_ARMED_FORCES: &str = "X3000";
pub const FOREIGN_ARMED_FORCES: &str = "X4000";
pub const FOREIGN_DIPLOMATIC: &str = "X5000";

const RESERVED: &[(&str, &str)] = &[
    (
        UNIDENTIFIABLE,
        "Worker reporting unidentifiable or inadequately described occupation",
    ),
    (NOT_REPORTED, "Worker not reporting any occupation"),
    (NATIONAL_ARMED_FORCES, "Singapore armed forces personnel"),
    (FOREIGN_ARMED_FORCES, "Foreign armed forces personnel"),
    (FOREIGN_DIPLOMATIC, "Foreign diplomatic personnel"),
];

/// Title of a reserved `X` code.
pub fn reserved_title(code: &str) -> Option<&'static str> {
    RESERVED
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, title)| *title)
}

const CODE_HEADERS: &[&str] = &[
    "ssoc 2024",
    "ssoc",
    "ssoc code",
    "ssoc2024",
    "ssoc_2024",
    "code",
    "occupation code",
];
const TITLE_HEADERS: &[&str] = &[
    "ssoc 2024 title",
    "title",
    "occupation title",
    "job title",
    "ssoc title",
];
const EXAMPLE_HEADERS: &[&str] = &["examples of job classified under this code", "examples"];
/// Columns folded into the description blob. The "classified elsewhere"
/// cross-reference column is left out: it names other occupations.
const DESCRIPTION_HEADERS: &[&str] = &[
    "groups classified under this code",
    "detailed definitions",
    "tasks",
    "notes",
    "examples of job classified under this code",
    "definition",
    "examples",
    "exclusions",
    "description",
    "responsibilities",
];

static SEE_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bsee\s+\d{4,5}\b").expect("see-code pattern")
});
static ALT_TITLE_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[;,\n\u{2022}\u{25AA}\u{00B7}]").expect("alt-title pattern"));

/// Raw catalogue rows as read from a spreadsheet export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogueTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CatalogueTable {
    /// `{"headers": [...], "rows": [[...], ...]}`
    pub fn from_json_str(s: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(s)?)
    }

    /// First record is the header row. Short rows are padded.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ConfigurationError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for rec in rdr.records() {
            rows.push(rec?.iter().map(str::to_string).collect());
        }
        Ok(Self { headers, rows })
    }

    pub fn from_csv_str(s: &str) -> Result<Self, ConfigurationError> {
        Self::from_csv_reader(s.as_bytes())
    }

    pub(crate) fn cell(&self, row: &[String], col: usize) -> String {
        row.get(col).map(|c| c.trim().to_string()).unwrap_or_default()
    }
}

fn header_key(h: &str) -> String {
    h.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn header_overlap(a: &str, b: &str) -> f32 {
    let ta = token_set(a);
    let tb = token_set(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    ta.intersection(&tb).count() as f32 / ta.len().max(tb.len()) as f32
}

/// Exact alias first, then the best token overlap of at least 0.6.
pub(crate) fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    let keys: Vec<String> = headers.iter().map(|h| header_key(h)).collect();
    for alias in aliases {
        if let Some(i) = keys.iter().position(|k| k == alias) {
            return Some(i);
        }
    }
    let mut best: Option<(usize, f32)> = None;
    for (i, k) in keys.iter().enumerate() {
        for alias in aliases {
            let sc = header_overlap(k, alias);
            if sc > best.map_or(0.0, |(_, s)| s) {
                best = Some((i, sc));
            }
        }
    }
    best.filter(|(_, s)| *s >= 0.6).map(|(i, _)| i)
}

/// Title variants: split on `/` then normalized, empties dropped.
fn split_title(text: &str) -> Vec<String> {
    text.split('/')
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect()
}

fn truncate_at_cross_reference(blob: &str) -> &str {
    match SEE_CODE.find(blob) {
        Some(m) => blob[..m.start()].trim_end(),
        None => blob,
    }
}

#[derive(Debug, Clone)]
pub struct TaxonomyEntry {
    pub code: String,
    pub title: String,
    pub alternative_titles: Vec<String>,
    /// Normalized primary-title parts plus alternatives, deduplicated.
    pub title_variants: Vec<String>,
    /// Tokens of each title variant with generic qualifiers removed; empty sets dropped.
    pub variant_tokens: Vec<HashSet<String>>,
    pub description: String,
    pub title_text: TextFeatures,
    pub blob: TextFeatures,
    /// Title and description tokens together.
    pub context_tokens: HashSet<String>,
    /// `title_norm + " " + blob_norm`
    pub context_norm: String,
    pub sectors: SectorSet,
    pub is_leaf: bool,
}

impl TaxonomyEntry {
    fn new(code: String, title: String, alternative_titles: Vec<String>, description: String) -> Self {
        let title_text = TextFeatures::from_text(&title);
        let blob = TextFeatures::from_text(&description);

        let mut title_variants: Vec<String> = split_title(&title);
        title_variants.extend(alternative_titles.iter().cloned());
        title_variants.sort();
        title_variants.dedup();
        let variant_tokens = title_variants
            .iter()
            .map(|v| {
                token_set(v)
                    .into_iter()
                    .filter(|t| !GENERIC_TITLE_WORDS.contains(t.as_str()))
                    .collect::<HashSet<_>>()
            })
            .filter(|set| !set.is_empty())
            .collect();

        let context_tokens = title_text
            .token_set
            .union(&blob.token_set)
            .cloned()
            .collect();
        let context_norm = format!("{} {}", title_text.normalized, blob.normalized)
            .trim()
            .to_string();
        let sectors = title_text.sectors.union(&blob.sectors).copied().collect();

        Self {
            code,
            title,
            alternative_titles,
            title_variants,
            variant_tokens,
            description,
            title_text,
            blob,
            context_tokens,
            context_norm,
            sectors,
            is_leaf: false,
        }
    }

    /// Leading digit of the code, if numeric.
    pub fn major_group(&self) -> Option<char> {
        self.code.chars().next().filter(char::is_ascii_digit)
    }
}

/// Normalized title variant → owning entry indices. Owners whose primary title
/// produced the key come first, then alternative-title owners, each in
/// catalogue order.
#[derive(Debug, Default)]
pub struct TitleLookup {
    map: HashMap<String, Vec<usize>>,
}

impl TitleLookup {
    fn build(entries: &[TaxonomyEntry]) -> Self {
        let mut primary: HashMap<String, Vec<usize>> = HashMap::new();
        let mut alternative: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, e) in entries.iter().enumerate() {
            let mut keys: Vec<String> = split_title(&e.title);
            if !e.title_text.normalized.is_empty() {
                keys.push(e.title_text.normalized.clone());
            }
            for k in keys {
                let owners = primary.entry(k).or_default();
                if !owners.contains(&i) {
                    owners.push(i);
                }
            }
            for alt in &e.alternative_titles {
                let owners = alternative.entry(alt.clone()).or_default();
                if !owners.contains(&i) {
                    owners.push(i);
                }
            }
        }
        for (k, alts) in alternative {
            let owners = primary.entry(k).or_default();
            for i in alts {
                if !owners.contains(&i) {
                    owners.push(i);
                }
            }
        }
        Self { map: primary }
    }

    pub fn owners(&self, normalized_title: &str) -> &[usize] {
        self.map
            .get(normalized_title)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[derive(Debug)]
pub struct Taxonomy {
    entries: Vec<TaxonomyEntry>,
    by_code: HashMap<String, usize>,
    titles: TitleLookup,
}

impl Taxonomy {
    pub fn from_table(table: &CatalogueTable) -> Result<Self, ConfigurationError> {
        let code_col =
            find_column(&table.headers, CODE_HEADERS).ok_or(ConfigurationError::MissingColumn("code"))?;
        let title_col = find_column(&table.headers, TITLE_HEADERS)
            .ok_or(ConfigurationError::MissingColumn("title"))?;
        let example_col = find_column(&table.headers, EXAMPLE_HEADERS);

        let keys: Vec<String> = table.headers.iter().map(|h| header_key(h)).collect();
        let description_cols: Vec<usize> = DESCRIPTION_HEADERS
            .iter()
            .filter_map(|h| keys.iter().position(|k| k == h))
            .filter(|i| *i != code_col && *i != title_col)
            .collect();

        let mut entries = Vec::with_capacity(table.rows.len());
        let mut by_code = HashMap::new();
        let mut skipped = 0usize;

        for row in &table.rows {
            let code = table.cell(row, code_col);
            let title = table.cell(row, title_col);
            if code.is_empty() || title.is_empty() {
                skipped += 1;
                continue;
            }
            if by_code.contains_key(&code) {
                return Err(ConfigurationError::DuplicateCode(code));
            }

            let alternative_titles = example_col
                .map(|c| table.cell(row, c))
                .map(|raw| {
                    ALT_TITLE_SPLIT
                        .split(&raw)
                        .flat_map(split_title)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();

            let parts: Vec<String> = description_cols
                .iter()
                .map(|c| table.cell(row, *c))
                .filter(|p| !p.is_empty())
                .collect();
            let joined = parts.join(" | ");
            let description = match truncate_at_cross_reference(&joined) {
                "" => title.clone(),
                kept => kept.to_string(),
            };

            by_code.insert(code.clone(), entries.len());
            entries.push(TaxonomyEntry::new(code, title, alternative_titles, description));
        }

        if entries.is_empty() {
            return Err(ConfigurationError::EmptyCatalogue);
        }
        if skipped > 0 {
            debug!(target: "occupation", skipped, "catalogue rows without code or title skipped");
        }

        mark_leaves(&mut entries);
        let titles = TitleLookup::build(&entries);
        let leaves = entries.iter().filter(|e| e.is_leaf).count();
        info!(
            target: "occupation",
            entries = entries.len(),
            leaves,
            title_keys = titles.len(),
            "taxonomy loaded"
        );

        Ok(Self {
            entries,
            by_code,
            titles,
        })
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigurationError> {
        Self::from_table(&CatalogueTable::from_json_str(s)?)
    }

    pub fn from_csv_str(s: &str) -> Result<Self, ConfigurationError> {
        Self::from_table(&CatalogueTable::from_csv_str(s)?)
    }

    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&TaxonomyEntry> {
        self.entries.get(index)
    }

    pub fn get(&self, code: &str) -> Option<&TaxonomyEntry> {
        self.by_code.get(code).map(|&i| &self.entries[i])
    }

    pub fn leaf_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_leaf)
            .map(|(i, _)| i)
            .collect()
    }

    /// First leaf owning this normalized title, if any.
    pub fn exact_leaf(&self, normalized_title: &str) -> Option<&TaxonomyEntry> {
        self.titles
            .owners(normalized_title)
            .iter()
            .map(|&i| &self.entries[i])
            .find(|e| e.is_leaf)
    }

    pub fn titles(&self) -> &TitleLookup {
        &self.titles
    }

    /// Longest proper prefix of `code` that is itself a catalogued entry.
    pub fn parent_of(&self, code: &str) -> Option<&TaxonomyEntry> {
        (1..code.len())
            .rev()
            .filter(|&n| code.is_char_boundary(n))
            .find_map(|n| self.get(&code[..n]))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A leaf is an all-digit code that no other code extends.
fn mark_leaves(entries: &mut [TaxonomyEntry]) {
    let mut prefixes: HashSet<String> = HashSet::new();
    for e in entries.iter() {
        for n in 1..e.code.len() {
            if e.code.is_char_boundary(n) {
                prefixes.insert(e.code[..n].to_string());
            }
        }
    }
    for e in entries.iter_mut() {
        e.is_leaf = e.code.bytes().all(|b| b.is_ascii_digit()) && !prefixes.contains(&e.code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
SSOC 2024,SSOC 2024 Title,Detailed Definitions,Examples of Job Classified Under this Code,Examples of Job Classified Elsewhere
7411,Building and related electricians,Install and repair electrical wiring in buildings.,,
74110,Electrician,Installs and repairs wiring and switchboards in buildings.,Wireman; Electrical fitter/Wiring installer,Electrical engineer (see 21511)
7131,Painters and related workers,Paint buildings. See 71311 for details,,
71311,House/Building painter,Applies paint to walls and ceilings.,,
,Orphan title,no code,,
";

    fn tax() -> Taxonomy {
        Taxonomy::from_csv_str(CSV).expect("taxonomy")
    }

    #[test]
    fn leaves_are_codes_nobody_extends() {
        let t = tax();
        assert!(t.get("74110").unwrap().is_leaf);
        assert!(!t.get("7411").unwrap().is_leaf);
        assert_eq!(t.leaf_indices().len(), 2);
    }

    #[test]
    fn rows_without_code_are_skipped() {
        assert_eq!(tax().len(), 4);
    }

    #[test]
    fn alternative_titles_split_on_semicolons_and_slashes() {
        let t = tax();
        let e = t.get("74110").unwrap();
        assert_eq!(
            e.alternative_titles,
            vec!["wireman", "electrical fitter", "wiring installer"]
        );
        assert!(e.title_variants.contains(&"electrician".to_string()));
    }

    #[test]
    fn cross_reference_column_is_not_in_blob() {
        let t = tax();
        let e = t.get("74110").unwrap();
        assert!(!e.description.contains("21511"), "{}", e.description);
        assert!(!e.blob.token_set.contains("engineer"));
    }

    #[test]
    fn blob_is_truncated_at_see_reference() {
        let t = tax();
        let e = t.get("7131").unwrap();
        assert_eq!(e.description, "Paint buildings.");
    }

    #[test]
    fn exact_leaf_lookup_covers_slash_parts_and_alternatives() {
        let t = tax();
        assert_eq!(t.exact_leaf("building painter").map(|e| e.code.as_str()), Some("71311"));
        assert_eq!(t.exact_leaf("house building painter").map(|e| e.code.as_str()), Some("71311"));
        assert_eq!(t.exact_leaf("wireman").map(|e| e.code.as_str()), Some("74110"));
        assert!(t.exact_leaf("building and related electricians").is_none());
    }

    #[test]
    fn parent_is_longest_catalogued_prefix() {
        let t = tax();
        assert_eq!(t.parent_of("74110").map(|e| e.code.as_str()), Some("7411"));
        assert!(t.parent_of("7411").is_none());
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let csv = "code,title\n1,A\n1,B\n";
        let err = Taxonomy::from_csv_str(csv).unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateCode(c) if c == "1"));
    }

    #[test]
    fn missing_title_column_is_fatal() {
        let csv = "code,definition\n1,A\n";
        let err = Taxonomy::from_csv_str(csv).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingColumn("title")));
    }

    #[test]
    fn fuzzy_header_resolution() {
        let headers: Vec<String> = ["Occupation Code (SSOC)", "Occupation Title 2024"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(find_column(&headers, CODE_HEADERS), Some(0));
        assert_eq!(find_column(&headers, TITLE_HEADERS), Some(1));
    }

    #[test]
    fn json_table_loads() {
        let json = r#"{"headers":["code","title","definition"],"rows":[["11","Chief executives","Run organisations"],["112","Managing directors",""]]}"#;
        let t = Taxonomy::from_json_str(json).unwrap();
        assert!(t.get("112").unwrap().is_leaf);
        assert!(!t.get("11").unwrap().is_leaf);
        // empty description falls back to the title
        assert_eq!(t.get("112").unwrap().description, "Managing directors");
    }

    #[test]
    fn reserved_titles() {
        assert_eq!(reserved_title("X2000"), Some("Worker not reporting any occupation"));
        assert!(reserved_title("X9000").is_none());
    }
}
