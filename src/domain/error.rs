//! Error types for schema registration and form rendering

use thiserror::Error;

/// Errors that can occur while building, registering or rendering form schemas
#[derive(Debug, Error)]
pub enum FormError {
    /// A metadata annotation could not be coerced to the attribute type
    #[error("Invalid metadata on field '{field}', key '{key}': {reason}")]
    MetadataParse {
        field: String,
        key: String,
        reason: String,
    },

    /// A field name collides with the array marker of form keys
    #[error("Field name '{field}' must not contain '[]'")]
    InvalidFieldName { field: String },

    /// A type contains itself, directly or through its fields
    #[error("Recursive type '{type_name}' cannot be inlined")]
    RecursiveType { type_name: String },

    /// Traversal or interception failed for a registration
    #[error("Reflecting {name} schema: {source}")]
    SchemaBuild {
        name: String,
        #[source]
        source: Box<FormError>,
    },

    /// A schema is already registered under this name
    #[error("Schema '{name}' is already added")]
    DuplicateName { name: String },

    /// No schema registered for the name, and auto-registration is not allowed
    #[error("Schema not found: '{name}'")]
    NotFound { name: String },

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FormError {
    pub(crate) fn metadata(field: &str, key: &str, reason: impl ToString) -> Self {
        Self::MetadataParse {
            field: field.to_string(),
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error means "no such schema", for status mapping in web layers
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the error is a name clash on registration
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateName { .. })
    }
}

/// Result type for form operations
pub type FormResult<T> = Result<T, FormError>;
