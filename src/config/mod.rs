use crate::global;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    pub corpus: CorpusConfig,
    pub tokenizer: TokenizerConfig,
    pub output: OutputConfig,
}

/// Layout of a TAT corpus directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Directory under the corpus root holding the JSON transcripts
    pub transcript_dir: String,
    /// Microphone channel; audio lives in `<root>/<wav_type>/wav`
    pub wav_type: String,
    pub audio_extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Local tokenizer.json; takes precedence over the Hub repo
    pub path: Option<PathBuf>,
    pub repo: String,
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub root: PathBuf,
    /// File receiving one diagnostic line per rejected transcript
    pub rejection_log: Option<PathBuf>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            transcript_dir: "json".to_string(),
            wav_type: "condenser".to_string(),
            audio_extension: "wav".to_string(),
        }
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            path: None,
            repo: "openai/whisper-medium".to_string(),
            file: "tokenizer.json".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("../TAT-data"),
            rejection_log: None,
        }
    }
}

impl PrepConfig {
    /// Load from an explicit file, or from the default location when present.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            return Self::load_from(path);
        }

        match global::config_file() {
            Ok(path) if path.exists() => Self::load_from(&path),
            Ok(path) => {
                debug!("No config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(err) => {
                debug!("Config directory unavailable ({err:#}), using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}
