pub(crate) const HELP_SHORT: &str = "h";
pub(crate) const HELP_LONG: &str = "help";
pub(crate) const HELP_ALTERNATE: &str = "?";
pub(crate) const HELP_MESSAGE: &str = "Display this help message.";

pub(crate) const TRUE_VALUE: &str = "true";
pub(crate) const FALSE_VALUE: &str = "false";

// Ends option recognition; the remaining tokens are positional.
pub(crate) const TERMINATOR: &str = "--";
pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const SHORT_PREFIX: &str = "-";
pub(crate) const VALUE_DELIMITER: char = '=';

pub(crate) const EXIT_SUCCESS: i32 = 0;
pub(crate) const EXIT_FAILURE: i32 = 1;
