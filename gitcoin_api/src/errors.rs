//! Error types for the API client.

/// Errors that can occur while building or sending a query.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A filter referenced a field the active schema does not define.
    #[error("Tried to filter by unknown param \"{name}\"")]
    UnknownField { name: String },
    /// A value was rejected by the field's normalizer.
    #[error("Unknown value \"{value}\" for field \"{field}\"")]
    Validation { field: String, value: String },
    /// No resource is registered under the requested id.
    #[error("Unknown resource \"{id}\"")]
    UnknownResource { id: String },
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// An HTTP request failed (network error, timeout, or unexpected response).
    #[error("Request failed")]
    RequestFailed,
}

impl Error {
    pub(crate) fn validation(field: &str, value: impl ToString) -> Self {
        Error::Validation {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// The HTTP status code, when the error came from a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
