use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::corpus::TranscriptRecord;
use crate::error::{PrepError, PrepResult};

/// The single audio file paired with a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioReference(PathBuf);

impl AudioReference {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

impl fmt::Display for AudioReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Pairs transcripts with recordings named `<stem>-<digit>*.<ext>` in the
/// speaker's audio directory.
pub struct PathResolver {
    wav_dir: PathBuf,
    extension: String,
}

impl PathResolver {
    pub fn new(wav_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            wav_dir: wav_dir.into(),
            extension: extension.into(),
        }
    }

    /// Glob describing the accepted file names, used in error messages.
    pub fn pattern_for(&self, stem: &str) -> String {
        format!("{}-[0-9]*.{}", stem, self.extension)
    }

    fn matcher_for(&self, stem: &str) -> PrepResult<Regex> {
        // Same language as the glob: one digit, then anything, then the extension.
        let pattern = format!(
            r"^{}-[0-9].*\.{}$",
            regex::escape(stem),
            regex::escape(&self.extension)
        );
        Ok(Regex::new(&pattern)?)
    }

    /// Find the one audio file for `record`.
    ///
    /// No match or several matches are both fatal.
    pub fn resolve(&self, record: &TranscriptRecord) -> PrepResult<AudioReference> {
        let dir = self.wav_dir.join(&record.speaker);
        let pattern = self.pattern_for(&record.stem);
        let matcher = self.matcher_for(&record.stem)?;

        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(PrepError::AudioMissing { dir, pattern });
            }
            Err(err) => return Err(PrepError::io(format!("listing {}", dir.display()), err)),
        };

        let mut matches = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PrepError::io(format!("listing {}", dir.display()), e))?;
            let path = entry.path();
            let is_match = entry
                .file_name()
                .to_str()
                .is_some_and(|name| matcher.is_match(name));
            if is_match && path.is_file() {
                matches.push(path);
            }
        }
        matches.sort();

        match matches.len() {
            0 => Err(PrepError::AudioMissing { dir, pattern }),
            1 => {
                let path = matches.remove(0);
                debug!("Paired {} with {}", record.source.display(), path.display());
                Ok(AudioReference::new(path))
            }
            _ => Err(PrepError::AudioAmbiguous {
                dir,
                pattern,
                matches,
            }),
        }
    }
}
