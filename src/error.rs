//! Error types for manifest preparation.
//!
//! [`PrepError`] aborts a run. [`Rejection`] drops a single record and is
//! counted in the rejection log.

use std::path::PathBuf;

use thiserror::Error;

use crate::orthography::OrthographicVariant;

pub type PrepResult<T> = Result<T, PrepError>;

#[derive(Debug, Error)]
pub enum PrepError {
    #[error("i/o failure while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no audio matching `{pattern}` in `{dir}`")]
    AudioMissing { dir: PathBuf, pattern: String },

    #[error("{} audio files match `{pattern}` in `{dir}`: {}", .matches.len(), display_paths(.matches))]
    AudioAmbiguous {
        dir: PathBuf,
        pattern: String,
        matches: Vec<PathBuf>,
    },

    #[error("invalid audio name pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("unknown transcript type `{0}` (expected one of: tailo, tailonum, taiwen)")]
    UnknownVariant(String),

    #[error("no validator is defined for transcript type {0}")]
    ValidatorUnavailable(OrthographicVariant),

    #[error("transcript type {0} requires a tokenizer")]
    TokenizerRequired(OrthographicVariant),

    #[error("bad transcript `{path}`: {message}")]
    Transcript { path: PathBuf, message: String },
}

impl PrepError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn transcript(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::Transcript {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a single transcript was left out of the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("transcript is empty")]
    EmptyText,

    #[error("disallowed character `{ch}` in: {cleaned}")]
    DisallowedChar { ch: char, cleaned: String },

    #[error("tokenizer round trip changed `{cleaned}` into `{decoded}`")]
    RoundTripMismatch { cleaned: String, decoded: String },

    #[error("tokenizer failed on `{cleaned}`: {message}")]
    Tokenizer { cleaned: String, message: String },
}

impl Rejection {
    /// The content the record was rejected on, if a single piece is to blame.
    pub fn offending(&self) -> Option<String> {
        match self {
            Rejection::DisallowedChar { ch, .. } => Some(ch.to_string()),
            Rejection::EmptyText
            | Rejection::RoundTripMismatch { .. }
            | Rejection::Tokenizer { .. } => None,
        }
    }

    /// The text under test when the rejection happened.
    pub fn context(&self) -> &str {
        match self {
            Rejection::EmptyText => "",
            Rejection::DisallowedChar { cleaned, .. }
            | Rejection::RoundTripMismatch { cleaned, .. }
            | Rejection::Tokenizer { cleaned, .. } => cleaned,
        }
    }
}
