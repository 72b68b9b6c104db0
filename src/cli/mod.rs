use crate::config::PrepConfig;
use crate::global;
use crate::orthography::{OrthographicVariant, Orthography};
use crate::tokenizer::{HfTokenizer, TextTokenizer};
use anyhow::{bail, Context, Result};
use tracing::info;

pub mod args;
pub mod check;
pub mod prepare;

pub use args::{CheckCliArgs, Cli, CliCommand, InitConfigCliArgs, PrepareCliArgs};
pub use check::handle_check_command;
pub use prepare::handle_prepare_command;

/// Build the rule set for `variant`, loading a tokenizer only when it needs one.
pub(crate) fn build_orthography(
    variant: OrthographicVariant,
    config: &PrepConfig,
) -> Result<Orthography> {
    let tokenizer: Option<Box<dyn TextTokenizer>> = if variant.requires_tokenizer() {
        Some(Box::new(
            HfTokenizer::load(&config.tokenizer).context("Failed to load tokenizer")?,
        ))
    } else {
        None
    };

    Ok(Orthography::create(variant, tokenizer)?)
}

pub fn handle_init_config_command(args: InitConfigCliArgs) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => global::config_file()?,
    };

    if path.exists() && !args.force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    PrepConfig::default().save(&path)?;
    info!("Wrote default config to {}", path.display());
    println!("Config written to {}", path.display());
    Ok(())
}
