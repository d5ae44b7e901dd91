//! CLI definitions for the `chatrelay` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Relay Discord and web chat to an LLM provider with per-user memory.
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = "chatrelay.toml", env = "CHATRELAY_CONFIG")]
    pub config: PathBuf,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv and more for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Discord bot and the HTTP API in one process (shared memory).
    Run {
        /// Address for the HTTP API (overrides config).
        #[arg(long)]
        bind: Option<String>,
    },

    /// Run only the Discord bot.
    Bot,

    /// Run only the HTTP API (Discord status reads offline).
    Serve {
        /// Address to listen on (overrides config).
        #[arg(long)]
        bind: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_with_bind() {
        let cli = Cli::try_parse_from(["chatrelay", "-vv", "serve", "--bind", "127.0.0.1:9000"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Serve { bind: Some(ref b) } if b == "127.0.0.1:9000"
        ));
    }

    #[test]
    fn test_parse_run_with_config() {
        let cli = Cli::try_parse_from(["chatrelay", "run", "--config", "other.toml", "--otel"])
            .unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(cli.otel);
        assert!(matches!(cli.command, Commands::Run { bind: None }));
    }

    #[test]
    fn test_config_path_from_environment() {
        // SAFETY: no other test here depends on CHATRELAY_CONFIG being unset.
        unsafe { std::env::set_var("CHATRELAY_CONFIG", "from-env.toml") };
        let cli = Cli::try_parse_from(["chatrelay", "serve"]).unwrap();
        unsafe { std::env::remove_var("CHATRELAY_CONFIG") };
        assert_eq!(cli.config, PathBuf::from("from-env.toml"));
    }
}
