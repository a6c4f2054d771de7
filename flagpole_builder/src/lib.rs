//! Builder module for `flagpole`.
//! See [documentation root](https://docs.rs/flagpole/latest/flagpole/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
pub mod prelude;

pub use api::*;
pub use matcher::MatchError;
pub use model::*;
#[cfg(feature = "unit_test")]
pub use parser::Captured;
pub use parser::{CommandLineError, Scan};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
