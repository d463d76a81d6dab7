use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "hostping", version, about = "Ping a set of hosts and keep a JSON log of each run")]
pub struct Cli {
    /// Comma-separated hosts to probe (e.g. "google.com, 10.0.0.1")
    #[arg(long = "hosts", conflicts_with = "predefined")]
    pub hosts: Option<String>,

    /// Probe the predefined host set
    #[arg(short = 'p', long = "predefined", action = ArgAction::SetTrue)]
    pub predefined: bool,

    /// Per-host timeout in seconds for the whole ping invocation
    #[arg(short = 't', long = "timeout", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Run log location (default: ping_log.txt)
    #[arg(short = 'l', long = "log-path")]
    pub log_path: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Probe and report without appending to the run log
    #[arg(long = "no-save", action = ArgAction::SetTrue)]
    pub no_save: bool,

    /// Show the last N runs stored in the log and exit
    #[arg(
        long = "history",
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "5",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub history: Option<u32>,

    /// Hide raw ping output; verdicts and the summary are still printed
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,

    /// Verbose diagnostics
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Debug logs (implies verbose)
    #[arg(short = 'd', long = "debug", action = ArgAction::SetTrue)]
    pub debug: bool,
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
    fn test_parse_hosts_and_timeout() {
        let cli = Cli::try_parse_from(["hostping", "--hosts", "a.com, b.com", "--timeout", "7"]).unwrap();
        assert_eq!(cli.hosts.as_deref(), Some("a.com, b.com"));
        assert_eq!(cli.timeout, Some(7));
        assert!(!cli.predefined);
        assert_eq!(cli.history, None);
    }

    #[test]
    fn test_hosts_conflicts_with_predefined() {
        assert!(Cli::try_parse_from(["hostping", "--hosts", "a", "--predefined"]).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Cli::try_parse_from(["hostping", "--timeout", "0"]).is_err());
    }

    #[test]
    fn test_history_default_count() {
        let cli = Cli::try_parse_from(["hostping", "--history"]).unwrap();
        assert_eq!(cli.history, Some(5));
        let cli = Cli::try_parse_from(["hostping", "--history", "2"]).unwrap();
        assert_eq!(cli.history, Some(2));
    }

    #[test]
    fn test_zero_history_rejected() {
        assert!(Cli::try_parse_from(["hostping", "--history", "0"]).is_err());
    }
}
