//! `flagpole` is a POSIX/GNU style command line option scanner for Rust.
//!
//! Unlike full argument parsers, `flagpole` keeps a flat model: a list of options, each with flags, an argument mode, a help message and a current value.
//! Everything which is not an option is handed back as a positional argument.
//! Specifically, `flagpole` supports:
//! * *Short options*: `-v`, `-o FILE` or `-oFILE`.
//! Short options may be clustered, `-abc` being equivalent to `-a -b -c`.
//! * *Long options*: `--verbose`, `--output FILE` or `--output=FILE`.
//! Long options may be abbreviated, subject to the [`LongMatch`] policy.
//! * *Strict POSIX ordering*: option recognition ends at the first positional token, at `--`, or at an empty token.
//! * *Callbacks*: each option may carry a callback which is invoked per occurrence, in command line order.
//! A callback may stop the parse (this is how `--help` works).
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/values.rs")]
//! ```
//!
//! ```console
//! $ values -h
//! usage: values [options]
//! -b, --boolean	Set a boolean flag.
//! -s, --string	Set a flag to value.
//! -h, --help, -?	Display this help message.
//!
//! $ values -bs hello world
//! boolean: true
//! string: hello
//! arguments: ["world"]
//!
//! $ values --string
//! Parse error: Option '--string' requires an argument.
//! --string
//! ^
//! ```
//!
//! # Options
//! Configure `flagpole` by starting with a [`CommandLineParser`] and adding [`CliOption`]s.
//! The parser borrows each option, so the values are read back once the parser has been dropped (or consumed via [`CommandLineParser::into_arguments`]).
//!
//! Each option takes an [`ArgumentMode`]:
//! * [`ArgumentMode::NoArgument`]: a flag, storing `"true"` when matched ([`CliOption::switch`]).
//! * [`ArgumentMode::ArgumentRequired`]: a value must follow ([`CliOption::value`]).
//! * [`ArgumentMode::ArgumentOptional`]: a value may follow, either attached or as a separate token which does not start with `-`.
//!
//! Values are stored as strings, and may be read back via [`CliOption::as_bool`], [`CliOption::as_int`], [`CliOption::as_float`], [`CliOption::as_string`], or any [`std::str::FromStr`] type via [`CliOption::as_value`].
//!
//! ```no_run
#![doc = include_str!("../demos/counter.rs")]
//! ```
//!
//! # Outcomes
//! [`CommandLineParser::parse`] reports one of:
//! * `Ok(`[`Scan::Complete`]`)`: every token was processed.
//! * `Ok(`[`Scan::Stopped`]`)`: a callback asked to stop.
//! * `Err(`[`CommandLineError`]`)`: the tokens do not fit the registered options (ex: [`MatchError::MissingArgument`]).
//!
//! [`CommandLineParser::parse_or_exit`] and [`CommandLineParser::run_env`] handle these the way a Cli program typically would: displaying the usage for `--help`, or the error, before exiting.
//!
//! # Features
//! * `unit_test`: exposes [`CommandLineParser::parse_captured`](./struct.CommandLineParser.html#method.parse_captured), to test the `parse_or_exit` flow without exiting.
//! * `tracing_debug`: emits `tracing` debug events while scanning.
pub use flagpole_builder::*;
