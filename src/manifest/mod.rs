//! Manifest assembly: pair, normalize and validate every transcript.

mod writer;

pub use writer::{write_csv, write_rejection_log};

use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::corpus::{AudioReference, PathResolver, TranscriptRecord};
use crate::error::{PrepResult, Rejection};
use crate::orthography::Orthography;

/// An accepted transcript and its recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    pub audio: AudioReference,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionEntry {
    /// 1-based running count of rejections
    pub sequence: usize,
    pub source: PathBuf,
    pub rejection: Rejection,
}

impl RejectionEntry {
    /// Tab separated diagnostic line.
    ///
    /// `<seq>\t<char>\t: <text>` when a single character is to blame,
    /// `<seq>\t <text>` otherwise.
    pub fn diagnostic_line(&self) -> String {
        let context = match self.rejection.context() {
            "" => self.source.display().to_string(),
            text => text.to_string(),
        };
        match self.rejection.offending() {
            Some(offending) => format!("{}\t{}\t: {}", self.sequence, offending, context),
            None => format!("{}\t {}", self.sequence, context),
        }
    }
}

/// Ordered record of rejected transcripts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectionLog {
    entries: Vec<RejectionEntry>,
}

impl RejectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, source: &Path, rejection: Rejection) -> &RejectionEntry {
        let sequence = self.entries.len() + 1;
        self.entries.push(RejectionEntry {
            sequence,
            source: source.to_path_buf(),
            rejection,
        });
        &self.entries[sequence - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RejectionEntry> {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Manifest {
    pub rows: Vec<ManifestRow>,
    pub rejections: RejectionLog,
}

impl Manifest {
    pub fn rejected(&self) -> usize {
        self.rejections.len()
    }
}

pub struct ManifestBuilder<'a> {
    resolver: &'a PathResolver,
    orthography: &'a Orthography,
    progress: ProgressBar,
}

impl<'a> ManifestBuilder<'a> {
    pub fn new(resolver: &'a PathResolver, orthography: &'a Orthography) -> Self {
        Self {
            resolver,
            orthography,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Run every record through pairing, normalization and validation.
    ///
    /// Pairing failures and a variant without a validator abort the build.
    /// Text rejections are logged and counted, and the build moves on.
    pub fn build(&self, records: &[TranscriptRecord]) -> PrepResult<Manifest> {
        let validator = self.orthography.validator()?;
        let mut manifest = Manifest::default();

        self.progress.set_length(records.len() as u64);
        for record in records {
            let audio = self.resolver.resolve(record)?;

            let outcome = self
                .orthography
                .normalize(&record.raw_text)
                .and_then(|normalized| validator.validate(&normalized));

            match outcome {
                Ok(text) => manifest.rows.push(ManifestRow { audio, text }),
                Err(rejection) => {
                    let entry = manifest.rejections.record(&record.source, rejection);
                    warn!("Rejected {}: {}", record.source.display(), entry.diagnostic_line());
                }
            }
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        info!(
            "Accepted {} of {} transcripts ({} rejected)",
            manifest.rows.len(),
            records.len(),
            manifest.rejected()
        );
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrepError;
    use crate::orthography::OrthographicVariant;
    use std::fs;
    use tempfile::TempDir;

    fn record(stem: &str, text: &str) -> TranscriptRecord {
        TranscriptRecord {
            stem: stem.to_string(),
            speaker: "spk".to_string(),
            source: PathBuf::from(format!("/json/spk/{stem}.json")),
            raw_text: text.to_string(),
            variant: OrthographicVariant::TailoNumeric,
        }
    }

    fn wav_dir(stems: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("spk")).unwrap();
        for stem in stems {
            fs::write(dir.path().join("spk").join(format!("{stem}-1.wav")), b"RIFF").unwrap();
        }
        dir
    }

    #[test]
    fn test_build_keeps_order_and_counts_rejections() {
        let dir = wav_dir(&["a", "b", "c", "d"]);
        let resolver = PathResolver::new(dir.path(), "wav");
        let orthography = Orthography::create(OrthographicVariant::TailoNumeric, None).unwrap();
        let records = vec![
            record("a", "m7-ji5,"),
            record("b", "café★"),
            record("c", "li2 ho2"),
            record("d", "  "),
        ];

        let manifest = ManifestBuilder::new(&resolver, &orthography)
            .build(&records)
            .unwrap();

        let texts: Vec<_> = manifest.rows.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["m7-ji5.", "li2 ho2."]);
        assert_eq!(manifest.rows[0].audio.path(), dir.path().join("spk/a-1.wav"));
        assert_eq!(manifest.rows[1].audio.path(), dir.path().join("spk/c-1.wav"));
        assert_eq!(manifest.rejected(), 2);
        assert_eq!(manifest.rows.len() + manifest.rejected(), records.len());

        let lines: Vec<_> = manifest.rejections.iter().map(|e| e.diagnostic_line()).collect();
        assert_eq!(lines, ["1\t★\t: café★.", "2\t /json/spk/d.json"]);
    }

    #[test]
    fn test_pairing_failure_aborts() {
        let dir = wav_dir(&["a"]);
        let resolver = PathResolver::new(dir.path(), "wav");
        let orthography = Orthography::create(OrthographicVariant::TailoNumeric, None).unwrap();
        let records = vec![record("a", "ho2"), record("missing", "ho2")];

        let err = ManifestBuilder::new(&resolver, &orthography)
            .build(&records)
            .unwrap_err();
        assert!(matches!(err, PrepError::AudioMissing { .. }));
    }

    #[test]
    fn test_tailo_aborts_before_any_record() {
        let dir = wav_dir(&[]);
        let resolver = PathResolver::new(dir.path(), "wav");
        let orthography = Orthography::create(OrthographicVariant::Tailo, None).unwrap();

        let err = ManifestBuilder::new(&resolver, &orthography)
            .build(&[record("missing", "Lí hó")])
            .unwrap_err();
        assert!(matches!(err, PrepError::ValidatorUnavailable(OrthographicVariant::Tailo)));
    }

    #[test]
    fn test_rejection_log_sequence() {
        let mut log = RejectionLog::new();
        assert!(log.is_empty());
        log.record(Path::new("/a.json"), Rejection::EmptyText);
        let entry = log.record(
            Path::new("/b.json"),
            Rejection::RoundTripMismatch {
                cleaned: "你好。".to_string(),
                decoded: "你。".to_string(),
            },
        );
        assert_eq!(entry.sequence, 2);
        assert_eq!(entry.diagnostic_line(), "2\t 你好。");
        assert_eq!(log.len(), 2);
    }
}
