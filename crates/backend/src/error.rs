use std::error::Error;

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The content is moderated.
    Moderated,
    /// The backend is rate limited.
    RateLimitExceeded,
    /// The request did not complete before its deadline.
    DeadlineExceeded,
    /// Any other errors.
    Other,
}

/// The error type for a generative backend.
pub trait BackendError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}
