//! Text tokenizer used for round-trip validation.
//!
//! Validation only needs `encode` and `decode`, so the concrete Hugging Face
//! tokenizer sits behind [`TextTokenizer`] and tests can swap in a fake.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tracing::info;

use crate::config::TokenizerConfig;

/// Spaces removed before punctuation and English contractions after decoding,
/// matching `clean_up_tokenization_spaces` in the Python tokenizers.
const CLEANUP_SPACES: &[(&str, &str)] = &[
    (" .", "."),
    (" ?", "?"),
    (" !", "!"),
    (" ,", ","),
    (" ' ", "'"),
    (" n't", "n't"),
    (" 'm", "'m"),
    (" 's", "'s"),
    (" 've", "'ve"),
    (" 're", "'re"),
];

fn clean_up_tokenization_spaces(text: String) -> String {
    CLEANUP_SPACES
        .iter()
        .fold(text, |acc, (from, to)| acc.replace(from, to))
}

pub trait TextTokenizer: Send + Sync {
    /// Encode text to token ids, special tokens included.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Decode token ids back to text, special tokens skipped.
    fn decode(&self, ids: &[u32]) -> Result<String>;

    fn round_trip(&self, text: &str) -> Result<String> {
        let ids = self.encode(text)?;
        self.decode(&ids)
    }
}

/// A `tokenizer.json` loaded with the `tokenizers` crate.
pub struct HfTokenizer {
    inner: Tokenizer,
}

impl HfTokenizer {
    pub fn from_file(path: &Path) -> Result<Self> {
        let inner = Tokenizer::from_file(path)
            .map_err(|e| anyhow!("Failed to load tokenizer {}: {}", path.display(), e))?;
        info!("Loaded tokenizer from {}", path.display());
        Ok(Self { inner })
    }

    /// Download (or reuse the cached copy of) a tokenizer file from the Hub.
    pub fn from_hub(repo_id: &str, file: &str) -> Result<Self> {
        info!("Fetching {} from {}", file, repo_id);
        let api = Api::new().context("Failed to create HuggingFace API")?;
        let repo = api.repo(Repo::new(repo_id.to_string(), RepoType::Model));
        let path = repo
            .get(file)
            .with_context(|| format!("Failed to download {file} from {repo_id}"))?;
        Self::from_file(&path)
    }

    /// Load from `config.path` when set, otherwise from the Hub.
    pub fn load(config: &TokenizerConfig) -> Result<Self> {
        match &config.path {
            Some(path) => Self::from_file(path),
            None => Self::from_hub(&config.repo, &config.file),
        }
    }
}

impl TextTokenizer for HfTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .inner
            .encode(text, true)
            .map_err(|e| anyhow!("Failed to encode text: {}", e))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        let text = self
            .inner
            .decode(ids, true)
            .map_err(|e| anyhow!("Failed to decode tokens: {}", e))?;
        Ok(clean_up_tokenization_spaces(text))
    }
}
