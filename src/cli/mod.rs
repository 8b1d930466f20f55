//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for piiguard using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// piiguard - PII detection and anonymization
#[derive(Parser, Debug)]
#[command(name = "piiguard")]
#[command(version, about, long_about = None)]
#[command(author = "piiguard Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults apply when it does not exist)
    #[arg(short, long, default_value = "piiguard.toml", env = "PIIGUARD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PIIGUARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect PII and print a report
    Scan(commands::scan::ScanArgs),

    /// Anonymize PII in a file or stdin
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Anonymize many files in parallel
    Batch(commands::batch::BatchArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::scan::ReportFormat;

    #[test]
    fn test_cli_parse_scan() {
        let cli = Cli::parse_from(["piiguard", "scan"]);
        assert_eq!(cli.config, "piiguard.toml");
        match cli.command {
            Commands::Scan(args) => {
                assert!(args.input.is_none());
                assert_eq!(args.format, ReportFormat::Console);
                assert!(args.types.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_scan_options() {
        let cli = Cli::parse_from([
            "piiguard", "scan", "--input", "notes.txt", "--format", "csv", "--types", "email,phone",
        ]);
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.input.as_deref(), Some("notes.txt"));
                assert_eq!(args.format, ReportFormat::Csv);
                assert_eq!(args.types, vec!["email", "phone"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["piiguard", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["piiguard", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_anonymize() {
        let cli = Cli::parse_from(["piiguard", "anonymize", "--strategy", "hash", "--verify"]);
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.strategy.as_deref(), Some("hash"));
                assert!(args.verify);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_batch_requires_files() {
        assert!(Cli::try_parse_from(["piiguard", "batch"]).is_err());

        let cli = Cli::parse_from(["piiguard", "batch", "a.txt", "b.txt", "-j", "2"]);
        match cli.command {
            Commands::Batch(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.parallel, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
