use paths::BuildError;
use thiserror::Error;

/// Result type of link field operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Placeholder referenced an attribute, the source object doesn't have.
    #[error("{name:?} is not a valid attribute of {object}")]
    Attribute { name: String, object: String },

    /// Error of the URL builder, returned as-is.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Null was deserialized by a field, that doesn't allow it.
    #[error("field may not be null")]
    Null,

    #[error("could not read attribute {name:?}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize object: {0}")]
    Json(#[from] serde_json::Error),

    #[error("object doesn't serialize to a map, link fields can't be embedded into it")]
    NotAnObject,
}
