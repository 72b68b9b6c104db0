use tracing::debug;

use crate::error::Rejection;
use crate::orthography::rules::substitute;
use crate::orthography::{OrthographicVariant, TranscriptNormalizer, TranscriptValidator};

/// Characters blanked out to a single space during normalization.
///
/// Neighbouring spaces are not collapsed, so `a"b"c` becomes `a b c` while
/// `a "b"` becomes `a  b`.
const BLANKED: &[char] = &['\'', '"', '“', '”', ':', ')', '('];

const TERMINALS: &[char] = &['?', '!', '.'];

/// Full-width and dash punctuation folded to ASCII before the charset scan.
const CLEAN_MAPPING: &[(&str, &str)] = &[
    ("﹖", "?"),
    ("！", "!"),
    ("％", "%"),
    ("（", "("),
    ("）", ")"),
    ("，", ","),
    ("：", ":"),
    ("；", ";"),
    ("？", "?"),
    ("—", "--"),
    ("─", "-"),
];

const ACCEPTABLE_CHARS: &str = concat!(
    "0123456789",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "abcdefghijklmnopqrstuvwxyz",
    "àáéìîòúāō",
    " ",
    "!\"%()+,-./:;=?_~",
    "‘’“”'",
    "…⋯",
    "、。『』",
    "－",
);

/// Rules for Tâi-lô with numeric tone marks, checked against a fixed charset.
pub struct TailoNumericRules;

impl Default for TailoNumericRules {
    fn default() -> Self {
        Self::new()
    }
}

impl TailoNumericRules {
    pub fn new() -> Self {
        Self
    }

    pub fn is_acceptable(c: char) -> bool {
        ACCEPTABLE_CHARS.contains(c)
    }
}

impl TranscriptNormalizer for TailoNumericRules {
    fn normalize(&self, raw: &str) -> Result<String, Rejection> {
        let blanked: String = raw
            .trim()
            .chars()
            .map(|c| if BLANKED.contains(&c) { ' ' } else { c })
            .collect();

        let mut text = blanked.trim().to_string();
        if text.is_empty() {
            return Err(Rejection::EmptyText);
        }

        if let Some(head) = text.strip_suffix(',') {
            text = format!("{head}.");
        }
        if !text.ends_with(TERMINALS) {
            text.push('.');
        }

        Ok(text)
    }

    fn variant(&self) -> OrthographicVariant {
        OrthographicVariant::TailoNumeric
    }

    fn name(&self) -> &'static str {
        "TailoNumericRules"
    }
}

impl TranscriptValidator for TailoNumericRules {
    fn validate(&self, normalized: &str) -> Result<String, Rejection> {
        let cleaned = substitute(normalized, CLEAN_MAPPING);

        if let Some(ch) = cleaned.chars().find(|&c| !Self::is_acceptable(c)) {
            debug!("Rejecting on {:?}: {}", ch, cleaned);
            return Err(Rejection::DisallowedChar { ch, cleaned });
        }

        Ok(cleaned)
    }
}
