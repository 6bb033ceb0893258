//! Error type for the chart boundary.
//!
//! Almost nothing inside the engine can fail: missing values, zero totals and
//! degenerate wedges all degrade to a renderable result. The variants here
//! cover input that cannot be turned into a tree or a configuration at all.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while loading data or configuration into a chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SunburstError {
    /// The input could not be deserialized into a stats tree.
    #[error("invalid stats tree: {0}")]
    InvalidTree(String),

    /// Two nodes in the input share the same id.
    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    /// The variant name is neither `doughnut` nor `pie`.
    #[error("unknown chart variant: {0}")]
    UnknownVariant(String),

    /// The configuration object was malformed or out of range.
    #[error("invalid chart config: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SunburstError>;

impl From<SunburstError> for JsValue {
    fn from(err: SunburstError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
