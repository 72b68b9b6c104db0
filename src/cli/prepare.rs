//! CLI handler for building a corpus manifest.
//!
//! Scans the transcripts, pairs each with its recording, runs the variant's
//! normalization and validation, then writes `<output_root>/<corpus>.csv`.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::cli::args::PrepareCliArgs;
use crate::cli::build_orthography;
use crate::config::PrepConfig;
use crate::corpus::{scan_transcripts, CorpusLayout, PathResolver};
use crate::manifest::{write_csv, write_rejection_log, ManifestBuilder};

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareReport {
    pub output_path: PathBuf,
    pub records: usize,
    pub accepted: usize,
    pub rejected: usize,
}

/// Handle the prepare CLI command.
pub fn handle_prepare_command(args: PrepareCliArgs) -> Result<()> {
    let show_progress = !args.no_progress;
    let report = run_prepare(args, show_progress)?;

    println!(
        "Rejected {} of {} transcripts",
        report.rejected, report.records
    );
    println!("Output at {}", report.output_path.display());
    Ok(())
}

/// Run the whole pipeline and return what was written.
pub fn run_prepare(args: PrepareCliArgs, show_progress: bool) -> Result<PrepareReport> {
    let config = merged_config(&args)?;
    let variant = args.variant;
    println!("Transcript Type: {}", variant.transcript_field());

    let corpus_root = std::fs::canonicalize(&args.corpus_root)
        .with_context(|| format!("Corpus root not found: {}", args.corpus_root.display()))?;
    let layout = CorpusLayout::new(&corpus_root, &config.corpus)?;

    let output_root = prepare_output_root(&config.output.root)?;
    let output_path = layout.manifest_path(&output_root);

    let orthography = build_orthography(variant, &config)?;
    let records = scan_transcripts(&layout.transcript_dir, variant)?;
    let resolver = PathResolver::new(&layout.wav_dir, config.corpus.audio_extension.as_str());

    let mut builder = ManifestBuilder::new(&resolver, &orthography);
    if show_progress {
        builder = builder.with_progress(create_progress_bar(records.len() as u64)?);
    }
    let manifest = builder
        .build(&records)
        .with_context(|| format!("Failed to build manifest for {}", layout.name))?;

    write_csv(&output_path, &manifest.rows)?;
    if let Some(log_path) = &config.output.rejection_log {
        write_rejection_log(log_path, &manifest.rejections)?;
        info!("Rejection log at {}", log_path.display());
    }

    Ok(PrepareReport {
        output_path,
        records: records.len(),
        accepted: manifest.rows.len(),
        rejected: manifest.rejected(),
    })
}

/// Config file values with command-line overrides applied.
fn merged_config(args: &PrepareCliArgs) -> Result<PrepConfig> {
    let mut config = PrepConfig::load(args.config.as_deref())?;
    if let Some(root) = &args.output_root {
        config.output.root = root.clone();
    }
    if let Some(wav_type) = &args.wav_type {
        config.corpus.wav_type = wav_type.clone();
    }
    if let Some(tokenizer) = &args.tokenizer {
        config.tokenizer.path = Some(tokenizer.clone());
    }
    if let Some(log) = &args.rejection_log {
        config.output.rejection_log = Some(log.clone());
    }
    Ok(config)
}

fn prepare_output_root(root: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(root)
        .with_context(|| format!("Failed to create output directory {}", root.display()))?;
    std::fs::canonicalize(root)
        .with_context(|| format!("Failed to resolve output directory {}", root.display()))
}

/// Create a styled progress bar.
fn create_progress_bar(len: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("━╸━"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orthography::OrthographicVariant;
    use std::fs;

    fn args(corpus_root: &Path, output_root: &Path) -> PrepareCliArgs {
        PrepareCliArgs {
            corpus_root: corpus_root.to_path_buf(),
            output_root: Some(output_root.to_path_buf()),
            variant: OrthographicVariant::TailoNumeric,
            wav_type: None,
            tokenizer: None,
            rejection_log: None,
            config: Some(corpus_root.join("missing-config-is-an-error.toml")),
            no_progress: true,
        }
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_prepare(args(dir.path(), &dir.path().join("out")), false);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[corpus]\nwav_type = \"lavalier\"\n").unwrap();

        let mut cli_args = args(dir.path(), &dir.path().join("out"));
        cli_args.config = Some(config_path);
        let config = merged_config(&cli_args).unwrap();
        assert_eq!(config.corpus.wav_type, "lavalier");
        assert_eq!(config.output.root, dir.path().join("out"));

        cli_args.wav_type = Some("XYH-6-X".to_string());
        cli_args.rejection_log = Some(dir.path().join("rejected.tsv"));
        let config = merged_config(&cli_args).unwrap();
        assert_eq!(config.corpus.wav_type, "XYH-6-X");
        assert_eq!(config.output.rejection_log, Some(dir.path().join("rejected.tsv")));
    }

    #[test]
    fn test_prepare_output_root_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("a").join("b");
        let resolved = prepare_output_root(&root).unwrap();
        assert!(resolved.is_dir());
        assert!(resolved.is_absolute());
    }
}
