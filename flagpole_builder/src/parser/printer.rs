use std::io;

use crate::api::RegistryEntry;
use crate::constant::*;
use crate::parser::interface::UserInterface;

pub(crate) struct OptionParameter {
    flags: Vec<String>,
    help: String,
}

impl OptionParameter {
    pub(crate) fn new(flags: Vec<String>, help: impl Into<String>) -> Self {
        Self {
            flags,
            help: help.into(),
        }
    }
}

impl<'e, 'a> From<&'e (dyn RegistryEntry + 'a)> for OptionParameter {
    fn from(entry: &'e (dyn RegistryEntry + 'a)) -> Self {
        OptionParameter::new(entry.flags().to_vec(), entry.help())
    }
}

pub(crate) struct Printer {
    program: String,
    options: Vec<OptionParameter>,
}

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new("program", Vec::default())
    }

    pub(crate) fn new(program: impl Into<String>, options: Vec<OptionParameter>) -> Self {
        // Unlike a help page, usage keeps the registration order.
        Self {
            program: program.into(),
            options,
        }
    }

    fn lines(&self) -> Vec<String> {
        let mut summary = format!("usage: {}", self.program);

        if !self.options.is_empty() {
            summary.push_str(" [options]");
        }

        let mut lines = vec![summary];

        for OptionParameter { flags, help } in &self.options {
            lines.push(format!("{}\t{help}", flag_list(flags)));
        }

        lines
    }

    pub(crate) fn print_usage(&self, user_interface: &(impl UserInterface + ?Sized)) {
        for line in self.lines() {
            user_interface.print(line);
        }
    }

    pub(crate) fn write_usage(&self, out: &mut (impl io::Write + ?Sized)) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{line}")?;
        }

        out.flush()
    }
}

// Ex: "-b, --boolean"
fn flag_list(flags: &[String]) -> String {
    flags
        .iter()
        .map(|flag| {
            if flag.chars().count() == 1 {
                format!("{SHORT_PREFIX}{flag}")
            } else {
                format!("{LONG_PREFIX}{flag}")
            }
        })
        .collect::<Vec<String>>()
        .join(", ")
}

/// Points at the offending token of a command line error.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    token: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(token: usize, tokens: &[&str]) -> Self {
        Self {
            token,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let projection = self.tokens.join(" ");
        // Each preceding token is followed by a single space.
        let width: usize = self
            .tokens
            .iter()
            .take(self.token)
            .map(|token| token.chars().count() + 1)
            .sum();

        write!(
            f,
            "{projection}\n{:width$}^",
            "",
            width = std::cmp::min(width, projection.chars().count())
        )
    }
}
