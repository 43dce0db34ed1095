use crate::decoder::{DecodeError, YamlErrorContext};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// The function input could not be read from the request.
    #[error("cannot get Function input: {0}")]
    InputError(String),

    /// The template source could not be resolved or is invalid.
    #[error("invalid function input: {0}")]
    SourceError(String),

    #[error("invalid function input: cannot parse the provided templates: {0}")]
    TemplateParseError(minijinja::Error),

    /// Includes panics captured while the options were applied.
    #[error("cannot apply template options: {0}")]
    TemplateOptionError(String),

    #[error("cannot convert request to map: {0}")]
    ContextConversionError(String),

    #[error("cannot execute template: {0}")]
    TemplateExecutionError(minijinja::Error),

    #[error("cannot decode manifest: {source}{}", .diagnostic.suffix())]
    DecodeError { source: DecodeError, diagnostic: YamlErrorContext },

    #[error("Failed to load configuration: {0}.")]
    ConfigError(String),
}

/// Convenience type alias for Results with Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: anyhow::Error) {
    eprintln!("{err:#}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
