use anyhow::Result;

use crate::cli::args::CheckCliArgs;
use crate::cli::build_orthography;
use crate::config::PrepConfig;

/// Handle the check CLI command.
///
/// Prints the manifest text for an accepted transcript, or the rejection.
pub fn handle_check_command(args: CheckCliArgs) -> Result<()> {
    let mut config = PrepConfig::load(args.config.as_deref())?;
    if let Some(tokenizer) = args.tokenizer {
        config.tokenizer.path = Some(tokenizer);
    }

    let orthography = build_orthography(args.variant, &config)?;
    let validator = orthography.validator()?;

    let normalized = match orthography.normalize(&args.text) {
        Ok(normalized) => normalized,
        Err(rejection) => {
            println!("Rejected: {}", rejection);
            return Ok(());
        }
    };
    println!("Normalized: {}", normalized);

    match validator.validate(&normalized) {
        Ok(cleaned) => println!("Accepted: {}", cleaned),
        Err(rejection) => println!("Rejected: {}", rejection),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orthography::OrthographicVariant;

    fn check(variant: OrthographicVariant, text: &str) -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "").unwrap();

        handle_check_command(CheckCliArgs {
            variant,
            tokenizer: None,
            config: Some(config),
            text: text.to_string(),
        })
    }

    #[test]
    fn test_check_numeric_succeeds() {
        assert!(check(OrthographicVariant::TailoNumeric, "m7-ji5,").is_ok());
        assert!(check(OrthographicVariant::TailoNumeric, "café★").is_ok());
    }

    #[test]
    fn test_check_tailo_is_fatal() {
        let err = check(OrthographicVariant::Tailo, "Lí hó").unwrap_err();
        assert!(err.to_string().contains("no validator"));
    }

    #[test]
    fn test_check_ignores_user_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "[tokenizer]\npath = \"/nonexistent/tokenizer.json\"\n").unwrap();

        // The explicit file wins over anything under the user's config dir.
        let err = handle_check_command(CheckCliArgs {
            variant: OrthographicVariant::SinicizedTaiwanese,
            tokenizer: None,
            config: Some(config),
            text: "你好".to_string(),
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/tokenizer.json"));
    }
}
