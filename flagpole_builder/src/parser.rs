mod base;
mod interface;
mod printer;

pub use self::base::*;
#[cfg(any(test, feature = "unit_test"))]
pub use self::interface::Captured;
pub(crate) use self::interface::*;
pub(crate) use self::printer::*;
