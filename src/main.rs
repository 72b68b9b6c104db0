use anyhow::Result;
use clap::Parser;
use tat_prep::cli::{
    handle_check_command, handle_init_config_command, handle_prepare_command, Cli, CliCommand,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        CliCommand::Version => {
            println!("tat-prep {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliCommand::Prepare(args) => handle_prepare_command(args),
        CliCommand::Check(args) => handle_check_command(args),
        CliCommand::InitConfig(args) => handle_init_config_command(args),
    }
}
