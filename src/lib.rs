/// Handles argument parsing and the local request driver.
pub mod cli;

/// Configuration shared by every request.
pub mod config;

/// Constants used throughout the function.
pub mod constants;

/// Builds the template execution context from a request.
pub mod context;

/// Decodes rendered output into desired resources.
pub mod decoder;

/// Defines custom error types.
pub mod error;

/// The request pipeline.
pub mod function;

/// Function input read from the request.
pub mod input;

/// A set of helpers for reading input.
pub mod ioutils;

/// An abstraction that allows implementing a source for templates.
pub mod loader;

/// Request and response messages.
pub mod protocol;

/// Template compilation and execution.
pub mod renderer;

pub use function::Function;
