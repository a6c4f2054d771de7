use std::env;
use std::io;

use crate::api::RegistryEntry;
use crate::constant::*;
use crate::matcher::{Event, OptionConfig, TokenMatcher};
use crate::model::ScanPolicy;
#[cfg(feature = "unit_test")]
use crate::parser::Captured;
use crate::parser::{
    CommandLineError, ConsoleInterface, ErrorContext, OptionParameter, Printer, Scan,
    UserInterface,
};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The command line parser.
///
/// Options are owned by the caller and borrowed by the parser, so they may only be read back once the parser is no longer used.
///
/// ### Example
/// ```
/// # use flagpole_builder as flagpole;
/// use flagpole::{CliOption, CommandLineParser, Scan};
///
/// let mut boolean = CliOption::switch(["b", "boolean"], false, "Set a boolean flag.");
/// let mut string = CliOption::value(["s", "string"], "", "Set a flag to value.");
/// let mut parser = CommandLineParser::new("program")
///     .add_option(&mut boolean)
///     .add_option(&mut string);
///
/// let scan = parser.parse(&["-b", "-s", "hello", "world"]).unwrap();
/// let arguments = parser.into_arguments();
///
/// assert_eq!(scan, Scan::Complete);
/// assert!(boolean.as_bool());
/// assert_eq!(string.as_string(), "hello");
/// assert_eq!(arguments, vec!["world"]);
/// ```
pub struct CommandLineParser<'ap> {
    program: String,
    // Any entry type may be registered, so the parser works across them via (dyn ..).
    options: Vec<&'ap mut (dyn RegistryEntry + 'ap)>,
    arguments: Vec<String>,
    policy: ScanPolicy,
}

impl<'ap> std::fmt::Debug for CommandLineParser<'ap> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLineParser")
            .field("program", &self.program)
            .field("options", &self.options.len())
            .field("arguments", &self.arguments)
            .field("policy", &self.policy)
            .finish()
    }
}

impl<'ap> CommandLineParser<'ap> {
    /// Create a command line parser for the program `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            options: Vec::default(),
            arguments: Vec::default(),
            policy: ScanPolicy::default(),
        }
    }

    /// Configure the scanning policy.
    /// If repeated, only the final policy will apply.
    ///
    /// ### Example
    /// ```
    /// # use flagpole_builder as flagpole;
    /// use flagpole::{CliOption, CommandLineParser, MatchError, ScanPolicy, Unrecognized};
    ///
    /// let mut boolean = CliOption::switch(["b"], false, "");
    /// let mut parser = CommandLineParser::new("program")
    ///     .policy(ScanPolicy::default().unrecognized(Unrecognized::Reject))
    ///     .add_option(&mut boolean);
    ///
    /// let error = parser.parse(&["-bx"]).unwrap_err();
    ///
    /// assert_eq!(error.reason(), &MatchError::UnknownShortOption('x'));
    /// ```
    pub fn policy(mut self, policy: ScanPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register an option.
    ///
    /// Registration order decides which option wins when flags are shared: the first registered.
    pub fn add_option(mut self, option: &'ap mut (dyn RegistryEntry + 'ap)) -> Self {
        self.options.push(option);
        self
    }

    /// Register many options, in iteration order.
    pub fn add_options(
        mut self,
        options: impl IntoIterator<Item = &'ap mut (dyn RegistryEntry + 'ap)>,
    ) -> Self {
        self.options.extend(options);
        self
    }

    /// Set the program name, as displayed in the usage.
    pub fn set_name(&mut self, program: impl Into<String>) -> &mut Self {
        self.program = program.into();
        self
    }

    /// The program name.
    pub fn name(&self) -> &str {
        &self.program
    }

    /// The registered options, in registration order.
    pub fn options(&self) -> impl Iterator<Item = &(dyn RegistryEntry + 'ap)> + '_ {
        self.options.iter().map(|option| &**option)
    }

    /// The positional arguments remaining from the most recent parse.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Release the options, keeping the positional arguments from the most recent parse.
    pub fn into_arguments(self) -> Vec<String> {
        self.arguments
    }

    /// Parse the tokens, which must not include the program name.
    ///
    /// Each matched option's callback is invoked in command line order.
    /// Tokens which are not part of an option are collected as [`CommandLineParser::arguments`].
    /// Option recognition ends at the first positional token, at `--`, or at an empty token.
    ///
    /// Returns [`Scan::Stopped`] if a callback asked to stop; the remaining tokens are not processed.
    /// A [`CommandLineError`] aborts the parse.
    pub fn parse(&mut self, tokens: &[&str]) -> Result<Scan, CommandLineError> {
        self.arguments.clear();
        let option_configs = self
            .options
            .iter()
            .map(|option| OptionConfig::new(option.flags().to_vec(), option.mode()))
            .collect();
        let token_matcher = TokenMatcher::new(option_configs, self.policy);

        for event in token_matcher.scan(tokens) {
            match event? {
                Event::Matched {
                    option,
                    token,
                    value,
                } => {
                    if !self.options[option].callback(&value) {
                        #[cfg(feature = "tracing_debug")]
                        {
                            debug!("Option #{option} at token {token} stopped the parse.");
                        }

                        return Ok(Scan::Stopped { option, token });
                    }
                }
                Event::Positional(argument) => self.arguments.push(argument),
            }
        }

        Ok(Scan::Complete)
    }

    /// Parse the tokens after setting the program name.
    pub fn parse_named(
        &mut self,
        program: impl Into<String>,
        tokens: &[&str],
    ) -> Result<Scan, CommandLineError> {
        self.set_name(program);
        self.parse(tokens)
    }

    /// Parse a `main` style argument vector, where the first element is the program name.
    ///
    /// An empty vector is a no-op.
    pub fn parse_argv(&mut self, argv: &[&str]) -> Result<Scan, CommandLineError> {
        match argv.split_first() {
            Some((program, tokens)) => self.parse_named(*program, tokens),
            None => Ok(Scan::Complete),
        }
    }

    /// Parse the Cli [`env::args`].
    pub fn parse_env(&mut self) -> Result<Scan, CommandLineError> {
        let argv: Vec<String> = env::args().collect();
        self.parse_argv(
            argv.iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )
    }

    /// Write the usage to `out`.
    ///
    /// ### Example
    /// ```
    /// # use flagpole_builder as flagpole;
    /// use flagpole::{CliOption, CommandLineParser};
    ///
    /// let mut boolean = CliOption::switch(["b", "boolean"], false, "Set a boolean flag.");
    /// let parser = CommandLineParser::new("program").add_option(&mut boolean);
    /// let mut out: Vec<u8> = Vec::default();
    ///
    /// parser.usage(&mut out).unwrap();
    ///
    /// assert_eq!(
    ///     String::from_utf8(out).unwrap(),
    ///     "usage: program [options]\n-b, --boolean\tSet a boolean flag.\n"
    /// );
    /// ```
    pub fn usage(&self, out: &mut impl io::Write) -> io::Result<()> {
        self.printer().write_usage(out)
    }

    /// Create the standard help option: `-h`, `--help` and `-?`.
    /// See [`CliOption::help_option`](crate::CliOption::help_option).
    pub fn help_option() -> crate::CliOption<'static> {
        crate::CliOption::help_option()
    }

    fn printer(&self) -> Printer {
        Printer::new(
            self.program.clone(),
            self.options().map(OptionParameter::from).collect(),
        )
    }

    fn is_help(&self, option: usize) -> bool {
        self.options[option]
            .flags()
            .iter()
            .any(|flag| flag == HELP_LONG)
    }

    pub(crate) fn parse_tokens_with(
        &mut self,
        tokens: &[&str],
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<Scan, i32> {
        match self.parse(tokens) {
            Ok(Scan::Stopped { option, .. }) if self.is_help(option) => {
                self.printer().print_usage(user_interface);
                Err(EXIT_SUCCESS)
            }
            Ok(scan) => Ok(scan),
            Err(error) => {
                let token = error.token();
                user_interface.print_error(error);
                user_interface.print_error_context(ErrorContext::new(token, tokens));
                Err(EXIT_FAILURE)
            }
        }
    }

    /// Parse the tokens, handling the outcome as a Cli program would.
    ///
    /// If the help option (any option with the flag `help`) stops the parse, the usage is displayed and the program exits with code `0`.
    /// If a [`CommandLineError`] is encountered, it is displayed and the program exits with code `1` (via [`std::process::exit`]).
    /// Otherwise, the [`Scan`] is returned.
    pub fn parse_or_exit(&mut self, tokens: &[&str]) -> Scan {
        match self.parse_tokens_with(tokens, &ConsoleInterface::default()) {
            Ok(scan) => scan,
            Err(exit_code) => std::process::exit(exit_code),
        }
    }

    /// Run [`CommandLineParser::parse_or_exit`] against the Cli [`env::args`].
    /// The first argument sets the program name.
    pub fn run_env(&mut self) -> Scan {
        let mut argv = env::args();

        if let Some(program) = argv.next() {
            self.set_name(program);
        }

        let command_input: Vec<String> = argv.collect();
        self.parse_or_exit(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Run the [`CommandLineParser::parse_or_exit`] flow without exiting, capturing what would have been displayed.
    ///
    /// ### Example
    /// ```
    /// # use flagpole_builder as flagpole;
    /// use flagpole::{CliOption, CommandLineParser};
    ///
    /// let mut help = CliOption::help_option();
    /// let mut parser = CommandLineParser::new("program").add_option(&mut help);
    ///
    /// let (result, captured) = parser.parse_captured(&["--help"]);
    ///
    /// assert_eq!(result, Err(0));
    /// assert_eq!(
    ///     captured.message.unwrap(),
    ///     "usage: program [options]\n-h, --help, -?\tDisplay this help message."
    /// );
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn parse_captured(&mut self, tokens: &[&str]) -> (Result<Scan, i32>, Captured) {
        let interface = crate::parser::util::InMemoryInterface::default();
        let result = self.parse_tokens_with(tokens, &interface);
        (result, interface.consume())
    }
}
