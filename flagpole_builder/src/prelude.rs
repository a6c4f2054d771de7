//! Traits which, typically, may be imported without concern: `use flagpole::prelude::*`.

// Needs to be imported in order to read an option's flags, mode or help, or to register a custom entry.
pub use crate::api::RegistryEntry;
