use thiserror::Error;

use crate::model::ArgumentMode;

/// Failures raised while scanning the command line tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatchError {
    /// An `ArgumentRequired` option had no value available.
    #[error("Option '{flag}' requires an argument.")]
    MissingArgument {
        /// The option's flag, including its dash prefix.
        flag: String,
    },

    /// A `--long` name that matches no registered option.
    #[error("Option '--{0}' does not exist.")]
    UnknownOption(String),

    /// A `-s` character that matches no registered option.
    #[error("Short option '-{0}' does not exist.")]
    UnknownShortOption(char),

    /// A `--long` abbreviation shared by multiple options.
    #[error("Option '--{name}' is ambiguous (candidates: {}).", .candidates.join(", "))]
    AmbiguousOption {
        /// The name as given on the command line.
        name: String,
        /// The long flags that start with the name, including their dash prefix.
        candidates: Vec<String>,
    },
}

/// What the matcher needs to know about a registered option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionConfig {
    flags: Vec<String>,
    mode: ArgumentMode,
}

impl OptionConfig {
    pub(crate) fn new(flags: Vec<String>, mode: ArgumentMode) -> Self {
        Self { flags, mode }
    }

    pub(crate) fn flags(&self) -> &[String] {
        &self.flags
    }

    pub(crate) fn mode(&self) -> ArgumentMode {
        self.mode
    }
}

/// The outcome of scanning a single unit of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    /// The option at index `option` matched at token index `token`, carrying `value`.
    Matched {
        option: usize,
        token: usize,
        value: String,
    },
    /// A token that is not part of any option.
    Positional(String),
}

impl Event {
    #[cfg(test)]
    pub(crate) fn matched(option: usize, token: usize, value: impl Into<String>) -> Self {
        Event::Matched {
            option,
            token,
            value: value.into(),
        }
    }

    #[cfg(test)]
    pub(crate) fn positional(value: impl Into<String>) -> Self {
        Event::Positional(value.into())
    }
}

// The index of the offending token alongside the failure.
pub(crate) type LocatedError = (usize, MatchError);
