// Error type for building and resizing a particle field

use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Count, dimensions or palette rejected at construction or resize.
    InvalidConfiguration(String),
}

impl FieldError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        FieldError::InvalidConfiguration(reason.into())
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidConfiguration(reason) => {
                write!(f, "Invalid particle field configuration: {}", reason)
            }
        }
    }
}

impl std::error::Error for FieldError {}

impl From<FieldError> for JsValue {
    fn from(e: FieldError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
