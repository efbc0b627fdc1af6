//! Error taxonomy for the widget pipeline.
//!
//! Three kinds of failure, with three propagation policies: acquisition
//! failures are fatal for the render, path failures are isolated to one
//! mapped field, and template failures are fatal for the render but carry
//! their own user-facing message. All of them end as an error fragment at
//! the pipeline boundary; none of them ever escapes it.

use thiserror::Error;

/// Failure to acquire raw data from a remote source. Fatal for the render;
/// a failed request is never retried.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// Could not reach the host at all. The only variant that triggers the
    /// direct-fetch fallback during RSS acquisition.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// The body could not be decoded as JSON.
    #[error("invalid JSON response: {0}")]
    Json(String),

    /// Any other transport-level failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// The feed payload was structurally wrong (bad XML, no channel,
    /// missing `feed` key in a preview response).
    #[error("{0}")]
    Feed(String),

    /// The configuration is unusable for this source kind.
    #[error("{0}")]
    InvalidConfig(String),
}

impl AcquisitionError {
    /// Classify a transport error at the call site.
    ///
    /// Connect-phase failures (including connect timeouts) map to
    /// [`AcquisitionError::Connection`]; response timeouts stay fatal.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_connect() {
            AcquisitionError::Connection(err.to_string())
        } else if err.is_timeout() {
            AcquisitionError::Timeout(err.to_string())
        } else {
            AcquisitionError::Transport(err.to_string())
        }
    }
}

/// A path expression that parsed but could not be traversed. Absorbed
/// per-field by the mapping applier, where it degrades to null.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid array index: {0}")]
    InvalidIndex(String),

    #[error("index {index} out of bounds (length {len})")]
    OutOfBounds { index: i64, len: usize },

    #[error("missing key '{0}'")]
    MissingKey(String),

    #[error("cannot access '{0}' on non-object value")]
    NotAnObject(String),

    #[error("cannot index '{0}' into non-array value")]
    NotAnArray(String),
}

/// A template-level failure: unknown identifier, or data whose shape does
/// not fit the chosen template. The message is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unknown template type: {0}")]
    Unknown(String),

    #[error("{0} must be an array")]
    ExpectedArray(&'static str),

    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Top-level pipeline error, converted into an error fragment exactly once
/// at the outermost boundary.
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Convenience result type for pipeline stages.
pub type WidgetResult<T> = Result<T, WidgetError>;
