use tracing::{debug, info};

use crate::error::{PrepError, PrepResult, Rejection};
use crate::orthography::{
    OrthographicVariant, TailoNumericRules, TailoRules, TaiwenRules, TranscriptNormalizer,
    TranscriptValidator,
};
use crate::tokenizer::TextTokenizer;

/// Rule set for the orthographic variant selected for the run.
pub enum Orthography {
    Tailo(TailoRules),
    TailoNumeric(TailoNumericRules),
    Taiwen(TaiwenRules),
}

impl Orthography {
    /// Create the rule set for `variant`.
    ///
    /// The tokenizer is only used by [`OrthographicVariant::SinicizedTaiwanese`],
    /// which cannot be built without one.
    pub fn create(
        variant: OrthographicVariant,
        tokenizer: Option<Box<dyn TextTokenizer>>,
    ) -> PrepResult<Self> {
        let orthography = match variant {
            OrthographicVariant::Tailo => Orthography::Tailo(TailoRules::new()),
            OrthographicVariant::TailoNumeric => {
                Orthography::TailoNumeric(TailoNumericRules::new())
            }
            OrthographicVariant::SinicizedTaiwanese => {
                let tokenizer = tokenizer.ok_or(PrepError::TokenizerRequired(variant))?;
                Orthography::Taiwen(TaiwenRules::new(tokenizer))
            }
        };
        info!("Using {} for {}", orthography.normalizer().name(), variant);
        Ok(orthography)
    }

    pub fn variant(&self) -> OrthographicVariant {
        self.normalizer().variant()
    }

    fn normalizer(&self) -> &dyn TranscriptNormalizer {
        match self {
            Orthography::Tailo(rules) => rules,
            Orthography::TailoNumeric(rules) => rules,
            Orthography::Taiwen(rules) => rules,
        }
    }

    /// The acceptance check for this variant.
    ///
    /// Fails for variants that define none; callers must treat that as fatal.
    pub fn validator(&self) -> PrepResult<&dyn TranscriptValidator> {
        match self {
            Orthography::Tailo(_) => Err(PrepError::ValidatorUnavailable(self.variant())),
            Orthography::TailoNumeric(rules) => Ok(rules),
            Orthography::Taiwen(rules) => Ok(rules),
        }
    }

    pub fn normalize(&self, raw: &str) -> Result<String, Rejection> {
        let normalizer = self.normalizer();
        debug!("Running {}", normalizer.name());
        normalizer.normalize(raw)
    }

    /// Normalize then validate a single transcript.
    ///
    /// The outer error is fatal, the inner one rejects only this text.
    pub fn process(&self, raw: &str) -> PrepResult<Result<String, Rejection>> {
        let validator = self.validator()?;
        Ok(self
            .normalize(raw)
            .and_then(|normalized| validator.validate(&normalized)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    struct EchoTokenizer;

    impl TextTokenizer for EchoTokenizer {
        fn encode(&self, text: &str) -> Result<Vec<u32>> {
            Ok(text.chars().map(u32::from).collect())
        }

        fn decode(&self, ids: &[u32]) -> Result<String> {
            Ok(ids.iter().filter_map(|&id| char::from_u32(id)).collect())
        }
    }

    #[test]
    fn test_tailo_has_no_validator() {
        let orthography = Orthography::create(OrthographicVariant::Tailo, None).unwrap();
        assert!(matches!(
            orthography.validator(),
            Err(PrepError::ValidatorUnavailable(OrthographicVariant::Tailo))
        ));
        assert!(matches!(
            orthography.process("Lí hó."),
            Err(PrepError::ValidatorUnavailable(_))
        ));
    }

    #[test]
    fn test_taiwen_requires_tokenizer() {
        let result = Orthography::create(OrthographicVariant::SinicizedTaiwanese, None);
        assert!(matches!(
            result,
            Err(PrepError::TokenizerRequired(OrthographicVariant::SinicizedTaiwanese))
        ));
    }

    #[test]
    fn test_process_dispatches_by_variant() {
        let numeric = Orthography::create(OrthographicVariant::TailoNumeric, None).unwrap();
        assert_eq!(numeric.variant(), OrthographicVariant::TailoNumeric);
        assert_eq!(numeric.process("m7-ji5,").unwrap().unwrap(), "m7-ji5.");

        let taiwen = Orthography::create(
            OrthographicVariant::SinicizedTaiwanese,
            Some(Box::new(EchoTokenizer)),
        )
        .unwrap();
        assert_eq!(taiwen.process("你好，").unwrap().unwrap(), "你好。");
    }

    #[test]
    fn test_process_surfaces_rejection() {
        let numeric = Orthography::create(OrthographicVariant::TailoNumeric, None).unwrap();
        let outcome = numeric.process("café★").unwrap();
        assert!(matches!(outcome, Err(Rejection::DisallowedChar { ch: '★', .. })));
    }
}
