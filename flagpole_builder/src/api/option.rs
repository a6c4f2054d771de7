use std::str::FromStr;

use super::capture::{convert, InvalidConversion};
use crate::constant::*;
use crate::model::ArgumentMode;

/// Behaviour of an entry registered with the [`CommandLineParser`](crate::CommandLineParser).
///
/// The parser only sees its options through this trait, so any type may be registered.
/// [`CliOption`] is the provided implementation.
pub trait RegistryEntry {
    /// The flags which identify this entry.
    /// Single character flags are spelled `-f`, longer flags are spelled `--flag`.
    fn flags(&self) -> &[String];

    /// Whether this entry takes a value.
    fn mode(&self) -> ArgumentMode;

    /// The help message displayed in the usage.
    fn help(&self) -> &str;

    /// Declare that the entry has been matched with `value`.
    /// Returns whether parsing should continue.
    fn callback(&mut self, value: &str) -> bool;
}

type Callback<'a> = Box<dyn FnMut(&str) -> bool + 'a>;

/// A command line option: its flags, argument mode, help message, current value and optional callback.
///
/// The value is kept as a string and read back through the typed accessors after parsing.
///
/// ### Example
/// ```
/// # use flagpole_builder as flagpole;
/// use flagpole::CliOption;
///
/// let verbose = CliOption::switch(["v", "verbose"], false, "Print more.");
/// let output = CliOption::value(["o", "output"], "out.txt", "Where to write.");
///
/// assert!(!verbose.as_bool());
/// assert_eq!(output.as_string(), "out.txt");
/// ```
pub struct CliOption<'a> {
    flags: Vec<String>,
    value: String,
    help: String,
    mode: ArgumentMode,
    callback: Option<Callback<'a>>,
}

impl<'a> std::fmt::Debug for CliOption<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliOption")
            .field("flags", &self.flags)
            .field("value", &self.value)
            .field("mode", &self.mode)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

fn collect_flags(flags: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    flags.into_iter().map(Into::into).collect()
}

impl<'a> CliOption<'a> {
    /// Create an option, invoking `callback` each time it is matched.
    ///
    /// The callback returns whether parsing should continue.
    ///
    /// ### Example
    /// ```
    /// # use flagpole_builder as flagpole;
    /// use flagpole::{ArgumentMode, CliOption, CommandLineParser, Scan};
    ///
    /// let mut seen: Vec<String> = Vec::default();
    /// let mut include = CliOption::new(
    ///     ["I", "include"],
    ///     "",
    ///     "Add an include directory.",
    ///     ArgumentMode::ArgumentRequired,
    ///     |value| {
    ///         seen.push(value.to_string());
    ///         true
    ///     },
    /// );
    /// let mut parser = CommandLineParser::new("program").add_option(&mut include);
    ///
    /// assert_eq!(parser.parse(&["-Ia", "--include", "b"]).unwrap(), Scan::Complete);
    /// drop(parser);
    /// drop(include);
    ///
    /// assert_eq!(seen, vec!["a", "b"]);
    /// ```
    pub fn new(
        flags: impl IntoIterator<Item = impl Into<String>>,
        default: impl Into<String>,
        help: impl Into<String>,
        mode: ArgumentMode,
        callback: impl FnMut(&str) -> bool + 'a,
    ) -> Self {
        Self {
            flags: collect_flags(flags),
            value: default.into(),
            help: help.into(),
            mode,
            callback: Some(Box::new(callback)),
        }
    }

    /// Create an option without a callback.
    pub fn with_mode(
        flags: impl IntoIterator<Item = impl Into<String>>,
        default: impl Into<String>,
        help: impl Into<String>,
        mode: ArgumentMode,
    ) -> Self {
        Self {
            flags: collect_flags(flags),
            value: default.into(),
            help: help.into(),
            mode,
            callback: None,
        }
    }

    /// Create a boolean option (`ArgumentMode::NoArgument`).
    pub fn switch(
        flags: impl IntoIterator<Item = impl Into<String>>,
        default: bool,
        help: impl Into<String>,
    ) -> Self {
        let default = if default { TRUE_VALUE } else { FALSE_VALUE };
        Self::with_mode(flags, default, help, ArgumentMode::NoArgument)
    }

    /// Create an option which takes a value (`ArgumentMode::ArgumentRequired`).
    pub fn value(
        flags: impl IntoIterator<Item = impl Into<String>>,
        default: impl Into<String>,
        help: impl Into<String>,
    ) -> Self {
        Self::with_mode(flags, default, help, ArgumentMode::ArgumentRequired)
    }

    /// Create the standard help option: `-h`, `--help` and `-?`.
    ///
    /// Matching it stops the parse.
    /// Through [`CommandLineParser::parse_or_exit`](crate::CommandLineParser::parse_or_exit) the usage is then displayed and the program exits with code `0`.
    pub fn help_option() -> Self {
        Self::new(
            [HELP_SHORT, HELP_LONG, HELP_ALTERNATE],
            "",
            HELP_MESSAGE,
            ArgumentMode::NoArgument,
            |_| false,
        )
    }

    /// The value as a boolean: exactly `"true"` is true, anything else is false.
    pub fn as_bool(&self) -> bool {
        self.value == TRUE_VALUE
    }

    /// The value as an integer.
    pub fn as_int(&self) -> Result<i32, InvalidConversion> {
        self.as_value()
    }

    /// The value as a float.
    pub fn as_float(&self) -> Result<f32, InvalidConversion> {
        self.as_value()
    }

    /// The value as is.
    pub fn as_string(&self) -> &str {
        &self.value
    }

    /// The value converted to any `T: FromStr`.
    ///
    /// ### Example
    /// ```
    /// # use flagpole_builder as flagpole;
    /// use flagpole::CliOption;
    ///
    /// let jobs = CliOption::value(["j", "jobs"], "8", "Number of jobs.");
    ///
    /// assert_eq!(jobs.as_value::<u64>().unwrap(), 8);
    /// assert!(jobs.as_value::<bool>().is_err());
    /// ```
    pub fn as_value<T: FromStr>(&self) -> Result<T, InvalidConversion> {
        convert(&self.value)
    }
}

impl<'a> RegistryEntry for CliOption<'a> {
    fn flags(&self) -> &[String] {
        &self.flags
    }

    fn mode(&self) -> ArgumentMode {
        self.mode
    }

    fn help(&self) -> &str {
        &self.help
    }

    fn callback(&mut self, value: &str) -> bool {
        self.value = value.to_string();

        match self.callback.as_mut() {
            Some(callback) => callback(value),
            None => true,
        }
    }
}
