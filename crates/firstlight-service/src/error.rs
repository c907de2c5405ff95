use thiserror::Error;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Feed request returned HTTP {status}")]
    FetchStatus { status: u16 },

    #[error("Feed request failed: {0}")]
    Transport(String),

    #[error("Feed request timed out")]
    Timeout,

    #[error(transparent)]
    CoreError(#[from] firstlight_core::error::CoreError),
}

impl ServiceError {
    /// HTTP status of a failed fetch, if the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::FetchStatus { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::FetchStatus {
                status: status.as_u16(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
