use tracing::debug;

use crate::error::Rejection;
use crate::orthography::rules::substitute;
use crate::orthography::{OrthographicVariant, TranscriptNormalizer, TranscriptValidator};
use crate::tokenizer::TextTokenizer;

const TERMINALS: &[char] = &['？', '。', '！'];

/// ASCII punctuation lifted to full width before the tokenizer check.
const CLEAN_MAPPING: &[(&str, &str)] = &[
    ("﹖", "？"),
    ("?", "？"),
    ("!", "！"),
    ("(", "（"),
    (")", "）"),
    (",", "，"),
    (":", "："),
    (";", "；"),
];

/// Rules for Han-romanized Taiwanese.
///
/// Acceptance means the downstream tokenizer reproduces the cleaned text
/// exactly after an encode/decode round trip.
pub struct TaiwenRules {
    tokenizer: Box<dyn TextTokenizer>,
}

impl TaiwenRules {
    pub fn new(tokenizer: Box<dyn TextTokenizer>) -> Self {
        Self { tokenizer }
    }
}

impl TranscriptNormalizer for TaiwenRules {
    fn normalize(&self, raw: &str) -> Result<String, Rejection> {
        if raw.trim().is_empty() {
            return Err(Rejection::EmptyText);
        }

        let mut text = match raw.strip_suffix('，') {
            Some(head) => format!("{head}。"),
            None => raw.to_string(),
        };
        if !text.ends_with(TERMINALS) {
            text.push('。');
        }

        Ok(text)
    }

    fn variant(&self) -> OrthographicVariant {
        OrthographicVariant::SinicizedTaiwanese
    }

    fn name(&self) -> &'static str {
        "TaiwenRules"
    }
}

impl TranscriptValidator for TaiwenRules {
    fn validate(&self, normalized: &str) -> Result<String, Rejection> {
        let cleaned = substitute(normalized, CLEAN_MAPPING);

        let decoded = match self.tokenizer.round_trip(&cleaned) {
            Ok(decoded) => decoded,
            Err(err) => {
                return Err(Rejection::Tokenizer {
                    cleaned,
                    message: format!("{err:#}"),
                })
            }
        };

        if decoded != cleaned {
            debug!("Round trip mismatch: {:?} -> {:?}", cleaned, decoded);
            return Err(Rejection::RoundTripMismatch { cleaned, decoded });
        }

        Ok(cleaned)
    }
}
