use crate::constants::{verbosity, STDIN_INDICATOR};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Renders manifests for one composition function request.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON request file, or `-` to read it from stdin.
    #[arg(short, long, value_name = "PATH", default_value = STDIN_INDICATOR)]
    pub request: String,

    /// Function configuration file (JSON or YAML).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments; clap reports malformed input and exits.
pub fn get_args() -> Args {
    Args::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_verbose_flags_to_log_filters() {
        assert_eq!(get_log_level_from_verbose(verbosity::OFF), LevelFilter::Error);
        assert_eq!(get_log_level_from_verbose(verbosity::INFO), LevelFilter::Info);
        assert_eq!(get_log_level_from_verbose(verbosity::DEBUG), LevelFilter::Debug);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE), LevelFilter::Trace);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE + 1), LevelFilter::Trace);
    }

    #[test]
    fn reads_request_from_stdin_by_default() {
        let args = Args::parse_from(["manifest-templating"]);
        assert_eq!(args.request, "-");
        assert!(args.config.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn parses_full_feature_flags() {
        let args = Args::parse_from([
            "manifest-templating",
            "--request",
            "request.json",
            "--config",
            "function.yaml",
            "-vv",
        ]);
        assert_eq!(args.request, "request.json");
        assert_eq!(args.config, Some(PathBuf::from("function.yaml")));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn rejects_unknown_flags() {
        let err = Args::try_parse_from(["manifest-templating", "--template", "x"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
