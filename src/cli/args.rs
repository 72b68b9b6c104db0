use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::orthography::OrthographicVariant;

#[derive(Parser, Debug)]
#[command(name = "tat-prep")]
#[command(about = "Build path/text training manifests from a TAT corpus", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Pair transcripts with audio and write the manifest CSV
    Prepare(PrepareCliArgs),
    /// Normalize and validate a single transcript
    Check(CheckCliArgs),
    /// Write a config file populated with the defaults
    InitConfig(InitConfigCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct PrepareCliArgs {
    /// Corpus root containing json/ and <wav-type>/wav/
    #[arg(long, default_value = "/storage/speech_dataset/TAT/TAT-Vol1-train")]
    pub corpus_root: PathBuf,
    /// Directory receiving <corpus name>.csv [default: ../TAT-data]
    #[arg(long)]
    pub output_root: Option<PathBuf>,
    /// Transcript type: tailo, tailonum or taiwen
    #[arg(short = 't', long, default_value = "tailonum")]
    pub variant: OrthographicVariant,
    /// Microphone channel directory holding the audio [default: condenser]
    #[arg(long)]
    pub wav_type: Option<String>,
    /// Local tokenizer.json used for taiwen validation
    #[arg(long)]
    pub tokenizer: Option<PathBuf>,
    /// Write one line per rejected transcript to this file
    #[arg(long)]
    pub rejection_log: Option<PathBuf>,
    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(ClapArgs, Debug)]
pub struct CheckCliArgs {
    /// Transcript type: tailo, tailonum or taiwen
    #[arg(short = 't', long, default_value = "tailonum")]
    pub variant: OrthographicVariant,
    /// Local tokenizer.json used for taiwen validation
    #[arg(long)]
    pub tokenizer: Option<PathBuf>,
    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Raw transcript text
    pub text: String,
}

#[derive(ClapArgs, Debug)]
pub struct InitConfigCliArgs {
    /// Where to write the file (defaults to the user config directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
