/// Whether an option takes a value on the command line.
///
/// Inspired by getopt_long: <https://man7.org/linux/man-pages/man3/getopt.3.html>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentMode {
    /// `--option`: the flag alone, storing `"true"` when matched.
    NoArgument,
    /// `--option VALUE`, `--option=VALUE`, `-oVALUE` or `-o VALUE`.
    ArgumentRequired,
    /// `--option` or `--option=VALUE` (also `-o` or `-oVALUE`).
    ///
    /// A separate token is only taken as the value when it is non-empty and does not start with `-`.
    ArgumentOptional,
}

impl std::fmt::Display for ArgumentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// How the name of a `--long` token is compared against the registered long flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LongMatch {
    /// Only a flag exactly equal to the name matches.
    Exact,
    /// An exact flag, otherwise the single option with a flag starting with the name.
    /// Abbreviations shared by several options are rejected.
    #[default]
    Unambiguous,
    /// An exact flag, otherwise the first registered flag which the name starts with.
    ///
    /// `--verbosely` matches `verbose`, while the abbreviation `--verb` matches nothing.
    Permissive,
}

/// What to do with a flag that matches no registered option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unrecognized {
    /// Ignore the flag and keep scanning.
    #[default]
    Skip,
    /// Fail the parse with a command line error.
    Reject,
}

/// The configurable parts of the scanning algorithm.
///
/// ### Example
/// ```
/// # use flagpole_builder as flagpole;
/// use flagpole::{LongMatch, ScanPolicy, Unrecognized};
///
/// let policy = ScanPolicy::default()
///     .long_match(LongMatch::Exact)
///     .unrecognized(Unrecognized::Reject);
///
/// assert_eq!(policy.long_matching(), LongMatch::Exact);
/// assert_eq!(policy.unrecognized_handling(), Unrecognized::Reject);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanPolicy {
    long_match: LongMatch,
    unrecognized: Unrecognized,
}

impl ScanPolicy {
    /// Set how long option names are matched.
    pub fn long_match(mut self, long_match: LongMatch) -> Self {
        self.long_match = long_match;
        self
    }

    /// Set how unknown flags are handled.
    pub fn unrecognized(mut self, unrecognized: Unrecognized) -> Self {
        self.unrecognized = unrecognized;
        self
    }

    /// The configured long option matching.
    pub fn long_matching(&self) -> LongMatch {
        self.long_match
    }

    /// The configured handling of unknown flags.
    pub fn unrecognized_handling(&self) -> Unrecognized {
        self.unrecognized
    }
}
