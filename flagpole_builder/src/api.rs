mod capture;
mod core;
mod option;

pub use self::capture::InvalidConversion;
pub use self::core::*;
pub use self::option::*;
