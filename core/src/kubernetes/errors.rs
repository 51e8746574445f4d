use kube::error::ErrorResponse;
use thiserror::Error;

/// Failures reported by the cluster API, tagged by kind.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Invalid: {0}")]
    Invalid(String),
    #[error("API error {code} ({reason}): {message}")]
    Api {
        code: u16,
        reason: String,
        message: String,
    },
    #[error("Kubernetes client error: {0}")]
    Client(#[source] kube::Error),
}

impl From<ErrorResponse> for ClusterError {
    fn from(response: ErrorResponse) -> Self {
        let ErrorResponse {
            message,
            reason,
            code,
            ..
        } = response;

        match (code, reason.as_str()) {
            (404, _) | (_, "NotFound") => ClusterError::NotFound(message),
            (_, "AlreadyExists") => ClusterError::AlreadyExists(message),
            (409, _) | (_, "Conflict") => ClusterError::Conflict(message),
            (403, _) | (_, "Forbidden") => ClusterError::Forbidden(message),
            (401, _) | (_, "Unauthorized") => ClusterError::Unauthorized(message),
            (422, _) | (_, "Invalid") => ClusterError::Invalid(message),
            _ => ClusterError::Api {
                code,
                reason,
                message,
            },
        }
    }
}

impl From<kube::Error> for ClusterError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(response) => response.into(),
            err => ClusterError::Client(err),
        }
    }
}

/// Lets callers branch on the kind of cluster failure without matching on concrete types.
pub trait ClusterErrorExt {
    fn cluster_error(&self) -> Option<&ClusterError>;

    fn is_not_found(&self) -> bool {
        matches!(self.cluster_error(), Some(ClusterError::NotFound(_)))
    }

    fn is_already_exists(&self) -> bool {
        matches!(self.cluster_error(), Some(ClusterError::AlreadyExists(_)))
    }
}

impl ClusterErrorExt for ClusterError {
    fn cluster_error(&self) -> Option<&ClusterError> {
        Some(self)
    }
}
