mod core;
mod model;

pub(crate) use self::core::*;
pub(crate) use self::model::*;
pub use self::model::MatchError;
