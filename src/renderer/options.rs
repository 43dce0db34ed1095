//! Named execution options and the fault boundary they are applied behind.

use crate::error::{Error, Result};
use minijinja::{Environment, UndefinedBehavior};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::str::FromStr;

/// How a lookup of a missing value behaves during execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingKey {
    /// Missing values render empty.
    Default,
    /// Same as `Default`.
    Invalid,
    /// Missing values, and attribute access on them, render empty.
    Zero,
    /// Missing values abort execution.
    Error,
}

impl MissingKey {
    fn undefined_behavior(self) -> UndefinedBehavior {
        match self {
            MissingKey::Default | MissingKey::Invalid => UndefinedBehavior::Lenient,
            MissingKey::Zero => UndefinedBehavior::Chainable,
            MissingKey::Error => UndefinedBehavior::Strict,
        }
    }
}

/// A single `key=value` execution option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOption {
    MissingKey(MissingKey),
}

impl FromStr for TemplateOption {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let Some((key, value)) = s.split_once('=') else {
            return Err(format!("unrecognized option: {s}"));
        };
        match key {
            "missingkey" => {
                let mode = match value {
                    "default" => MissingKey::Default,
                    "invalid" => MissingKey::Invalid,
                    "zero" => MissingKey::Zero,
                    "error" => MissingKey::Error,
                    _ => return Err(format!("unrecognized missingkey option: {value}")),
                };
                Ok(TemplateOption::MissingKey(mode))
            }
            _ => Err(format!("unrecognized option: {s}")),
        }
    }
}

impl TemplateOption {
    fn apply(self, env: &mut Environment<'static>) {
        match self {
            TemplateOption::MissingKey(mode) => env.set_undefined_behavior(mode.undefined_behavior()),
        }
    }
}

/// Runs `task`, turning a panic into an error carrying the panic payload.
pub fn catch_panic<T, F>(task: F) -> std::result::Result<T, String>
where
    F: FnOnce() -> T,
{
    catch_unwind(AssertUnwindSafe(task)).map_err(|panic| {
        if let Some(s) = panic.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        }
    })
}

/// Applies the named options to the environment.
///
/// Unknown names and any fault raised while configuring the engine are
/// returned as [`Error::TemplateOptionError`]; nothing unwinds past this call.
pub fn safe_apply_template_options(
    env: &mut Environment<'static>,
    options: &[String],
) -> Result<()> {
    let outcome = catch_panic(|| -> std::result::Result<(), String> {
        for option in options {
            let option: TemplateOption = option.parse()?;
            log::debug!("Applying template option {option:?}");
            option.apply(env);
        }
        Ok(())
    });

    match outcome {
        Ok(applied) => applied.map_err(Error::TemplateOptionError),
        Err(payload) => Err(Error::TemplateOptionError(format!(
            "panic occurred while applying template options: {payload}"
        ))),
    }
}
