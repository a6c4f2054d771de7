use crate::parser::base::CommandLineError;
use crate::parser::ErrorContext;

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: CommandLineError);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: CommandLineError) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}

/// *Available using 'unit_test' crate feature only.*</br></br>
/// What the parser would have displayed, captured instead of printed.
#[cfg(any(test, feature = "unit_test"))]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Captured {
    /// Regular output (ex: the usage), one entry per line.
    pub message: Option<String>,
    /// The error message.
    pub error: Option<String>,
    /// The rendered error context.
    pub error_context: Option<String>,
}

#[cfg(any(test, feature = "unit_test"))]
pub(crate) mod util {
    use crate::parser::{Captured, CommandLineError, ErrorContext, UserInterface};
    use std::cell::RefCell;

    #[derive(Default)]
    pub(crate) struct InMemoryInterface {
        message: RefCell<Option<Vec<String>>>,
        error: RefCell<Option<String>>,
        error_context: RefCell<Option<ErrorContext>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            // Allows for print() to be called many times, concatenating the messages.
            self.message
                .borrow_mut()
                .get_or_insert_with(Vec::default)
                .push(message);
        }

        fn print_error(&self, error: CommandLineError) {
            // Assumes print_error() is only ever called once.
            self.error.borrow_mut().replace(error.to_string());
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            // Assumes print_error_context() is only ever called once.
            self.error_context.borrow_mut().replace(error_context);
        }
    }

    impl InMemoryInterface {
        pub(crate) fn consume(self) -> Captured {
            let InMemoryInterface {
                message,
                error,
                error_context,
            } = self;

            Captured {
                message: message.take().map(|messages| messages.join("\n")),
                error: error.take(),
                error_context: error_context.take().map(|context| context.to_string()),
            }
        }

        #[cfg(test)]
        pub(crate) fn consume_message(self) -> String {
            let captured = self.consume();
            assert_eq!(captured.error, None);
            assert_eq!(captured.error_context, None);
            captured.message.unwrap()
        }
    }
}
