use crate::response::Status;

/// The error type routes, middleware and error observers may fail with.
///
/// Handlers are free to use any error type; it is boxed into `RouteError`
/// and carried to the dispatch boundary, where the original error is still
/// accessible by downcasting (see [`DomainError`]).
pub type RouteError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A fault raised deliberately by application code, carrying an explicit
/// status code and a message that is safe to expose to the caller.
///
/// Any other error reaching the dispatch boundary is reported with a
/// generic server-error response instead, so internal detail never leaks.
///
/// # Examples
///
/// ```
/// use routelet::{DomainError, Status};
///
/// let err = DomainError::with_status(Status::Unauthorized, "token expired");
/// assert_eq!(err.status, Status::Unauthorized);
///
/// // The bare constructor reports a bad request.
/// assert_eq!(DomainError::new("missing field").status, Status::BadRequest);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DomainError {
    pub status: Status,
    pub message: String,
}

impl DomainError {
    /// Creates a domain error with the default `BadRequest` status.
    pub fn new<M: Into<String>>(message: M) -> DomainError {
        DomainError::with_status(Status::BadRequest, message)
    }

    /// Creates a domain error with an explicit status code.
    pub fn with_status<M: Into<String>>(status: Status, message: M) -> DomainError {
        DomainError {
            status,
            message: message.into(),
        }
    }
}

/// A generic error type used to report registration and composition
/// failures raised by the crate itself.
#[derive(Debug, thiserror::Error)]
#[error("routelet: {0}")]
pub struct Error(String);

impl Error {
    pub(crate) fn new<M: Into<String>>(msg: M) -> Error {
        Error(msg.into())
    }
}
