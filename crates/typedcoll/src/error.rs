use std::result;

use thiserror::Error;

use crate::{ElementType, Value};

pub type Result<T, E = Error> = result::Result<T, E>;

/// Error types for typedcoll operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    SerdeJSON(#[from] serde_json::Error),

    #[error("Invalid element {value:?}: expected {expected}, found {}", .value.runtime_type())]
    InvalidElement { value: Value, expected: ElementType },
    #[error("Unknown type: {name}")]
    UnknownType { name: String },
    #[error("Cannot {operation} an empty collection: no element to infer the type from")]
    EmptySource { operation: &'static str },
    #[error("Index out of range: index: {index}, len: {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Type {type_name} has no property named {property:?}")]
    MissingProperty {
        property: String,
        type_name: &'static str,
    },
    #[error("Requested {requested} from a collection of {declared}")]
    TypeMismatch {
        requested: ElementType,
        declared: ElementType,
    },
}
