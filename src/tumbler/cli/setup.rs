use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Largest lock the CLI will enumerate.
pub const MAX_LOCK_SIZE: u8 = 20;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("TUMBLER_GIT_HASH");
    const GIT_DATE: &str = env!("TUMBLER_GIT_DATE");
    const IS_RELEASE: &str = env!("TUMBLER_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_DATE)
        }
    })
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "tumbler", bin_name = "tumbler", version = get_version())]
#[command(about = "Enumerate every pin-tumbler lock you can build from your parts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enumerate every lock configuration
    Run {
        /// Inventory document (YAML with key-pins, driver-pins and springs)
        inventory: PathBuf,

        /// Number of chambers in the lock
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=MAX_LOCK_SIZE as i64))]
        size: u8,

        /// Write locks to rotating files instead of the terminal
        #[arg(short, long)]
        quiet: bool,

        /// Maximum locks per output file (quiet mode)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        records_per_file: Option<u64>,

        /// Directory for output files (quiet mode)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Show how many locks a run would produce
    Count {
        /// Inventory document
        inventory: PathBuf,

        /// Number of chambers in the lock
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=MAX_LOCK_SIZE as i64))]
        size: u8,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Validate an inventory document
    Check {
        /// Inventory document
        inventory: PathBuf,

        /// Also check there are enough parts for this many chambers
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=MAX_LOCK_SIZE as i64))]
        size: Option<u8>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["tumbler", "run", "pins.yml", "-s", "5", "-q"]).unwrap();
        match cli.command {
            Commands::Run {
                inventory,
                size,
                quiet,
                records_per_file,
                output_dir,
            } => {
                assert_eq!(inventory, PathBuf::from("pins.yml"));
                assert_eq!(size, 5);
                assert!(quiet);
                assert_eq!(records_per_file, None);
                assert_eq!(output_dir, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_lock_size_is_bounded() {
        assert!(Cli::try_parse_from(["tumbler", "run", "pins.yml", "-s", "0"]).is_err());
        assert!(Cli::try_parse_from(["tumbler", "run", "pins.yml", "-s", "21"]).is_err());
        assert!(Cli::try_parse_from(["tumbler", "run", "pins.yml", "-s", "20"]).is_ok());
        assert!(Cli::try_parse_from(["tumbler", "run", "pins.yml"]).is_err());
    }

    #[test]
    fn test_records_per_file_must_be_positive() {
        let args = ["tumbler", "run", "p.yml", "-s", "3", "--records-per-file", "0"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_count_json() {
        let cli = Cli::try_parse_from(["tumbler", "count", "p.yml", "-s", "3", "--output", "json"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Count {
                output: OutputFormat::Json,
                size: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["tumbler", "check", "p.yml", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
