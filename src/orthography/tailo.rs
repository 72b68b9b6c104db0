use crate::error::Rejection;
use crate::orthography::{OrthographicVariant, TranscriptNormalizer};

/// Rules for diacritic Tâi-lô.
///
/// Text is taken as already clean. There is no acceptance check for this
/// variant, so it only implements [`TranscriptNormalizer`].
pub struct TailoRules;

impl Default for TailoRules {
    fn default() -> Self {
        Self::new()
    }
}

impl TailoRules {
    pub fn new() -> Self {
        Self
    }
}

impl TranscriptNormalizer for TailoRules {
    fn normalize(&self, raw: &str) -> Result<String, Rejection> {
        Ok(raw.to_string())
    }

    fn variant(&self) -> OrthographicVariant {
        OrthographicVariant::Tailo
    }

    fn name(&self) -> &'static str {
        "TailoRules"
    }
}
