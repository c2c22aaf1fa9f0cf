use thiserror::Error;

/// Rejection of the signup email field. Always recovered in place: the dialog
/// stays on the form and shows its error markers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email is required")]
    Empty,
    #[error("'{0}' is not a valid email address")]
    Malformed(String),
}

/// Failure of the page-view read. Every variant renders the same fallback
/// glyph; none of them is retried or surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("page-view request failed: {0}")]
    Network(String),
    #[error("page-view response is not JSON: {0}")]
    Decode(String),
    #[error("page-view response has no usable count")]
    MissingCount,
}
