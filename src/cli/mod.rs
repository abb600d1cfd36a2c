//! CLI module - Command-line interface for the blog list service
//!
//! Argument parsing uses clap; `serve` is the default when no subcommand is given.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;

/// Bloglist - REST service for blogs and their users
#[derive(Parser)]
#[command(name = "bloglist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "s")]
    Serve,

    /// Create a default config.toml in the working directory
    Init,

    /// Load and validate configuration, then print the effective values
    CheckConfig,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}

pub fn cmd_init() -> Result<()> {
    if Config::create_default_if_missing()? {
        println!("✓ Config file created. Edit config.toml and run again.");
    } else {
        println!("config.toml already exists, leaving it untouched.");
    }
    Ok(())
}

pub fn cmd_check_config(config: &Config) -> Result<()> {
    config.validate()?;
    println!("✓ Configuration is valid");
    println!();
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["bloglist"]).unwrap();
        assert_eq!(cli.command(), &Commands::Serve);
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["bloglist", "check-config"]).unwrap();
        assert_eq!(cli.command(), &Commands::CheckConfig);

        let cli = Cli::try_parse_from(["bloglist", "init"]).unwrap();
        assert_eq!(cli.command(), &Commands::Init);
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["bloglist", "frobnicate"]).is_err());
    }
}
