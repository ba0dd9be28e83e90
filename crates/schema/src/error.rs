//! Schema error types.

use thiserror::Error;

/// Result alias for schema operations.
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

/// Ways schema metadata can be rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The schema names no endpoint.
    #[error("entity '{entity}' has no endpoint")]
    EmptyEndpoint {
        /// Entity name
        entity: String,
    },

    /// Two fields share a name.
    #[error("entity '{entity}' declares field '{field}' twice")]
    DuplicateField {
        /// Entity name
        entity: String,
        /// Repeated field
        field: String,
    },

    /// Two sections share a key.
    #[error("entity '{entity}' declares section '{section}' twice")]
    DuplicateSection {
        /// Entity name
        entity: String,
        /// Repeated section key
        section: String,
    },

    /// A form field names a section the schema does not declare.
    #[error("field '{field}' of '{entity}' is in undeclared section '{section}'")]
    UnknownSection {
        /// Entity name
        entity: String,
        /// Field name
        field: String,
        /// Section named by the field
        section: String,
    },

    /// An async select has nowhere to fetch options from.
    #[error("field '{field}' of '{entity}' is an async select without an option source")]
    MissingOptionSource {
        /// Entity name
        entity: String,
        /// Field name
        field: String,
    },

    /// The schema forbids deletes.
    #[error("entity '{entity}' does not permit delete")]
    DeleteNotPermitted {
        /// Entity name
        entity: String,
    },

    /// The API base URL is not an absolute URL that can carry a path.
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// URL as configured
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A row id could not be placed in a URL.
    #[error("entity '{entity}' has an id of type {found}, expected string or number")]
    UnsupportedId {
        /// Entity name
        entity: String,
        /// JSON type of the id
        found: &'static str,
    },
}

impl From<SchemaError> for nestwrite_core::Error {
    fn from(err: SchemaError) -> Self {
        nestwrite_core::Error::schema(err.to_string())
    }
}
