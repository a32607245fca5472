// src/query.rs
//! One survey record to classify, and parsing of the coarse occupation-group hint.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::text::normalize;

/// Inputs for one record. Deserialization never fails on odd cell values:
/// non-string text becomes `""` and an unparseable income becomes `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationQuery {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title_text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub duties_text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub qualification_text: String,
    #[serde(default, deserialize_with = "lenient_income")]
    pub income: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub industry_context_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub group_hint_text: Option<String>,
}

impl ClassificationQuery {
    pub fn new(title: impl Into<String>, duties: impl Into<String>) -> Self {
        Self {
            title_text: title.into(),
            duties_text: duties.into(),
            ..Self::default()
        }
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry_context_text = Some(industry.into());
        self
    }

    pub fn with_group_hint(mut self, hint: impl Into<String>) -> Self {
        self.group_hint_text = Some(hint.into());
        self
    }

    pub fn with_qualification(mut self, qualification: impl Into<String>) -> Self {
        self.qualification_text = qualification.into();
        self
    }

    pub fn with_income(mut self, income: f64) -> Self {
        self.income = Some(income);
        self
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_income<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite()))
}

/// Parsed major-group hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupHint {
    /// Major group `1`..=`9`.
    Major(char),
    /// Armed forces / diplomatic group; advisory only.
    Reserved,
}

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:group\s*)?(\d{1,2})\b").expect("group number pattern"));

/// Longer names first so "associate professionals" never reads as "professionals".
const GROUP_ALIASES: &[(&str, char)] = &[
    ("associate professionals", '3'),
    ("clerical support workers", '4'),
    ("service and sales", '5'),
    ("machine operators", '8'),
    ("foreign diplomatic", 'X'),
    ("senior officials", '1'),
    ("related trades", '7'),
    ("related workers", '9'),
    ("armed forces", 'X'),
    ("legislators", '1'),
    ("managers", '1'),
    ("professionals", '2'),
    ("technicians", '3'),
    ("clerical", '4'),
    ("service", '5'),
    ("sales", '5'),
    ("agricultural", '6'),
    ("agriculture", '6'),
    ("fishery", '6'),
    ("craftsmen", '7'),
    ("craft", '7'),
    ("plant", '8'),
    ("assemblers", '8'),
    ("cleaners", '9'),
    ("labourers", '9'),
    ("laborers", '9'),
    ("diplomatic", 'X'),
    ("personnel", 'X'),
];

/// Accepts `"2. Professionals"`, `"Professionals"`, `"Group 5"`, `"10"`.
pub fn parse_group_hint(raw: &str) -> Option<GroupHint> {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    // numbers outside 1..=10 are noise; the group name may still follow
    if let Some(n) = LEADING_NUMBER
        .captures(&lowered)
        .and_then(|caps| caps[1].parse::<u8>().ok())
    {
        match n {
            1..=9 => return char::from_digit(u32::from(n), 10).map(GroupHint::Major),
            10 => return Some(GroupHint::Reserved),
            _ => {}
        }
    }
    let norm = normalize(&lowered);
    GROUP_ALIASES
        .iter()
        .find(|(alias, _)| norm.contains(alias))
        .map(|(_, g)| match g {
            'X' => GroupHint::Reserved,
            d => GroupHint::Major(*d),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_hint_forms() {
        assert_eq!(parse_group_hint("2. Professionals"), Some(GroupHint::Major('2')));
        assert_eq!(parse_group_hint("Group 5"), Some(GroupHint::Major('5')));
        assert_eq!(parse_group_hint("10"), Some(GroupHint::Reserved));
        assert_eq!(
            parse_group_hint("Associate Professionals and Technicians"),
            Some(GroupHint::Major('3'))
        );
        assert_eq!(parse_group_hint("Cleaners, labourers"), Some(GroupHint::Major('9')));
        assert_eq!(parse_group_hint("Armed forces personnel"), Some(GroupHint::Reserved));
        assert_eq!(parse_group_hint("  "), None);
        assert_eq!(parse_group_hint("unknown stuff"), None);
        assert_eq!(parse_group_hint("42"), None);
        // an out-of-range number falls through to the group name
        assert_eq!(parse_group_hint("11 Managers"), Some(GroupHint::Major('1')));
        assert_eq!(parse_group_hint("0 Professionals"), Some(GroupHint::Major('2')));
        assert_eq!(parse_group_hint("Group 12 Craft"), Some(GroupHint::Major('7')));
    }

    #[test]
    fn lenient_fields() {
        let q: ClassificationQuery = serde_json::from_str(
            r#"{"title_text": 42, "duties_text": null, "income": "3,500", "group_hint_text": ""}"#,
        )
        .unwrap();
        assert_eq!(q.title_text, "");
        assert_eq!(q.duties_text, "");
        assert_eq!(q.income, Some(3500.0));
        assert_eq!(q.group_hint_text, None);

        let q: ClassificationQuery =
            serde_json::from_str(r#"{"title_text": "Cook", "income": "n/a"}"#).unwrap();
        assert_eq!(q.title_text, "Cook");
        assert_eq!(q.income, None);
        assert_eq!(q.industry_context_text, None);
    }
}
