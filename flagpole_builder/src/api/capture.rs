use std::str::FromStr;
use thiserror::Error;

/// The stored value of an option could not be read as the requested type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot convert '{value}' to {type_name}.")]
pub struct InvalidConversion {
    value: String,
    type_name: &'static str,
}

impl InvalidConversion {
    /// The value which failed to convert.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The name of the target type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

pub(crate) fn convert<T: FromStr>(value: &str) -> Result<T, InvalidConversion> {
    T::from_str(value).map_err(|_| InvalidConversion {
        value: value.to_string(),
        type_name: std::any::type_name::<T>(),
    })
}
