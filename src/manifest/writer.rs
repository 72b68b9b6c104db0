use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{PrepError, PrepResult};
use crate::manifest::{ManifestRow, RejectionLog};

const HEADER: [&str; 2] = ["path", "text"];

/// Write the manifest as a `path,text` CSV.
///
/// The file is written next to `path` first and renamed into place, so an
/// aborted write never leaves a truncated manifest behind.
pub fn write_csv(path: &Path, rows: &[ManifestRow]) -> PrepResult<()> {
    write_atomically(path, |out| {
        writeln!(out, "{}", HEADER.join(","))?;
        for row in rows {
            let audio = row.audio.to_string();
            writeln!(out, "{},{}", quote_field(&audio), quote_field(&row.text))?;
        }
        Ok(())
    })?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Write one diagnostic line per rejected transcript.
pub fn write_rejection_log(path: &Path, log: &RejectionLog) -> PrepResult<()> {
    write_atomically(path, |out| {
        for entry in log.iter() {
            writeln!(out, "{}", entry.diagnostic_line())?;
        }
        Ok(())
    })
}

fn write_atomically(
    path: &Path,
    body: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
) -> PrepResult<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));
    let context = || format!("writing {}", path.display());

    let file = File::create(&tmp_path).map_err(|e| PrepError::io(context(), e))?;
    let mut out = BufWriter::new(file);
    let written = body(&mut out).and_then(|_| out.flush());
    drop(out);

    if let Err(err) = written.and_then(|_| std::fs::rename(&tmp_path, path)) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(PrepError::io(context(), err));
    }
    Ok(())
}

/// Quote a field only when it holds a delimiter, quote or line break.
fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::AudioReference;
    use crate::error::Rejection;
    use crate::manifest::RejectionLog;

    fn rows(dir: &Path) -> Vec<ManifestRow> {
        vec![
            ManifestRow {
                audio: AudioReference::new(dir.join("a-1.wav")),
                text: "m7-ji5.".to_string(),
            },
            ManifestRow {
                audio: AudioReference::new(dir.join("b-1.wav")),
                text: "tsit8, \"nng7\".".to_string(),
            },
        ]
    }

    #[test]
    fn test_quote_field() {
        assert_eq!(quote_field("plain text."), "plain text.");
        assert_eq!(quote_field("a,b"), "\"a,b\"");
        assert_eq!(quote_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(quote_field("你好，"), "你好，");
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let rows = rows(dir.path());
        let out = dir.path().join("corpus.csv");

        write_csv(&out, &rows).unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        let expected = format!(
            "path,text\n{}/a-1.wav,m7-ji5.\n{}/b-1.wav,\"tsit8, \"\"nng7\"\".\"\n",
            dir.path().display(),
            dir.path().display()
        );
        assert_eq!(content, expected);
        assert!(!dir.path().join("corpus.csv.tmp").exists());
    }

    #[test]
    fn test_write_csv_header_only_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.csv");
        write_csv(&out, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "path,text\n");
    }

    #[test]
    fn test_write_csv_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("out.csv");
        assert!(matches!(write_csv(&out, &[]), Err(PrepError::Io { .. })));
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("corpus.csv");

        let result = write_atomically(&out, |w| {
            writeln!(w, "path,text")?;
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        });

        assert!(matches!(result, Err(PrepError::Io { .. })));
        assert!(!out.exists());
        assert!(!dir.path().join("corpus.csv.tmp").exists());
    }

    #[test]
    fn test_write_rejection_log() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("rejected.tsv");
        let mut log = RejectionLog::new();
        log.record(
            Path::new("/json/spk/a.json"),
            Rejection::DisallowedChar {
                ch: '★',
                cleaned: "café★.".to_string(),
            },
        );

        write_rejection_log(&out, &log).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "1\t★\t: café★.\n");
    }
}
