//! Command-line interface definitions.
//!
//! Defines the `bizfun` CLI using `clap`: offline proposal validation, a live
//! allowance check, and the full market creation run.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Create prediction markets on-chain from JSON proposals
#[derive(Parser, Debug)]
#[command(name = "bizfun")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the bizfun CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse and validate a proposal without touching the chain
    Validate(ProposalArg),

    /// Read the collateral allowance and show the starting step
    Allowance(ProposalArg),

    /// Approve collateral if needed, create the market, and index it
    Create(CreateArgs),
}

/// Shared argument struct for commands that take only a proposal file.
#[derive(Parser, Debug)]
pub struct ProposalArg {
    /// Path to the proposal JSON file.
    pub proposal: PathBuf,
}

/// Arguments for the `create` subcommand.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Path to the proposal JSON file.
    pub proposal: PathBuf,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_accepts_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bizfun",
            "create",
            "proposal.json",
            "--yes",
            "--json",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        match cli.command {
            Commands::Create(args) => {
                assert!(args.yes);
                assert_eq!(args.proposal, PathBuf::from("proposal.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_defaults_to_local_file() {
        let cli = Cli::try_parse_from(["bizfun", "validate", "p.json"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        assert!(!cli.quiet);
    }

    #[test]
    fn proposal_path_is_required() {
        assert!(Cli::try_parse_from(["bizfun", "allowance"]).is_err());
    }
}
