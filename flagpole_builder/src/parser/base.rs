use thiserror::Error;

use crate::matcher::{LocatedError, MatchError};

/// A command line error: the user's input could not be parsed against the registered options.
///
/// This is distinct from programming errors; callers typically report it and exit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Parse error: {reason}")]
pub struct CommandLineError {
    token: usize,
    reason: MatchError,
}

impl CommandLineError {
    pub(crate) fn new(token: usize, reason: MatchError) -> Self {
        Self { token, reason }
    }

    /// The index of the offending token.
    pub fn token(&self) -> usize {
        self.token
    }

    /// What went wrong.
    pub fn reason(&self) -> &MatchError {
        &self.reason
    }
}

impl From<LocatedError> for CommandLineError {
    fn from((token, reason): LocatedError) -> Self {
        CommandLineError::new(token, reason)
    }
}

/// How a successful parse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// Every token was processed.
    Complete,
    /// An option's callback asked to stop; the tokens after `token` were not processed.
    Stopped {
        /// Index of the option (in registration order) whose callback returned `false`.
        option: usize,
        /// Index of the token that matched it.
        token: usize,
    },
}
