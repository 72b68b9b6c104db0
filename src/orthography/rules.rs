use crate::error::Rejection;
use crate::orthography::OrthographicVariant;

/// Punctuation and whitespace rules applied to a raw transcript.
pub trait TranscriptNormalizer: Send + Sync {
    /// Normalize a raw transcript, rejecting text with nothing left to keep.
    fn normalize(&self, raw: &str) -> Result<String, Rejection>;

    fn variant(&self) -> OrthographicVariant;

    /// Get the name of this rule set for logging
    fn name(&self) -> &'static str;
}

/// Acceptance check run on normalized text.
///
/// Returns the cleaned text that goes into the manifest.
pub trait TranscriptValidator: Send + Sync {
    fn validate(&self, normalized: &str) -> Result<String, Rejection>;
}

/// Apply a substitution table in order, each entry over the whole text.
pub(crate) fn substitute(text: &str, table: &[(&str, &str)]) -> String {
    table
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}
