use thiserror::Error;

use crate::registry::ObjectId;

/// Failures of a scene membership change.
///
/// Either error leaves the scene exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("too many objects in scene (capacity is {capacity})")]
    CapacityExceeded { capacity: usize },
    #[error("object {0} is not in the scene")]
    NotFound(ObjectId),
}

/// Failures reported by a [`UniformSink`](crate::uniforms::UniformSink).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UniformError {
    #[error("no uniform named `{0}`")]
    UnknownUniform(String),
    #[error("uniform `{name}` is not a {expected}")]
    TypeMismatch { name: String, expected: &'static str },
    #[error("uniform array `{name}` holds {capacity} elements, got {len}")]
    ArrayTooLong {
        name: String,
        len: usize,
        capacity: usize,
    },
}

/// Failures while converting exchange records back into a scene.
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("malformed scene document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed scene table: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown object kind `{0}`")]
    UnknownKind(String),
    #[error("{kind} record is missing TypeProp{index}")]
    MissingProperty { kind: &'static str, index: usize },
    #[error(transparent)]
    Scene(#[from] SceneError),
}
