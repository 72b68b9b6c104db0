//! TAT corpus layout and transcript discovery.
//!
//! A corpus root holds one JSON record per utterance under
//! `<root>/json/<speaker>/<stem>.json` and the matching recordings under
//! `<root>/<wav_type>/wav/<speaker>/<stem>-<n>.wav`.

mod resolver;

pub use resolver::{AudioReference, PathResolver};

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::CorpusConfig;
use crate::error::{PrepError, PrepResult};
use crate::orthography::OrthographicVariant;

/// One utterance transcript as read from the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRecord {
    /// File stem of the JSON record, shared with its audio file name
    pub stem: String,
    /// Name of the directory grouping the speaker's records
    pub speaker: String,
    pub source: PathBuf,
    pub raw_text: String,
    pub variant: OrthographicVariant,
}

/// Resolved directories of a corpus root.
#[derive(Debug, Clone)]
pub struct CorpusLayout {
    pub root: PathBuf,
    pub name: String,
    pub transcript_dir: PathBuf,
    pub wav_dir: PathBuf,
}

impl CorpusLayout {
    pub fn new(root: &Path, config: &CorpusConfig) -> PrepResult<Self> {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| PrepError::transcript(root, "corpus root has no directory name"))?;

        Ok(Self {
            root: root.to_path_buf(),
            name,
            transcript_dir: root.join(&config.transcript_dir),
            wav_dir: root.join(&config.wav_type).join("wav"),
        })
    }

    /// Manifest location for this corpus under `output_root`.
    pub fn manifest_path(&self, output_root: &Path) -> PathBuf {
        output_root.join(format!("{}.csv", self.name))
    }
}

/// Collect every JSON transcript under `dir`, sorted by path.
///
/// Unreadable or malformed records abort the scan.
pub fn scan_transcripts(dir: &Path, variant: OrthographicVariant) -> PrepResult<Vec<TranscriptRecord>> {
    if !dir.is_dir() {
        return Err(PrepError::transcript(dir, "transcript directory not found"));
    }

    let mut records = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| PrepError::transcript(dir, e))?;
        // `Path::is_file` follows symlinked records; the walk itself does not.
        if !entry.path().is_file() || !has_json_extension(entry.path()) {
            continue;
        }
        records.push(read_record(entry.path(), variant)?);
    }

    info!("Found {} transcripts in {}", records.len(), dir.display());
    Ok(records)
}

fn has_json_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Read a single JSON transcript record.
pub fn read_record(path: &Path, variant: OrthographicVariant) -> PrepResult<TranscriptRecord> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PrepError::io(format!("reading {}", path.display()), e))?;
    let json: Value = serde_json::from_str(&content).map_err(|e| PrepError::transcript(path, e))?;

    let field = variant.transcript_field();
    let raw_text = json
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| PrepError::transcript(path, format!("missing string field `{field}`")))?
        .to_string();

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let speaker = path
        .parent()
        .and_then(Path::file_name)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!("Read {}/{}: {:?}", speaker, stem, raw_text);
    Ok(TranscriptRecord {
        stem,
        speaker,
        source: path.to_path_buf(),
        raw_text,
        variant,
    })
}
