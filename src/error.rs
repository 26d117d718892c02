// Service error taxonomy
use serde_json::{json, Value};
use thiserror::Error;

/// Business error codes carried in the response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Unknown = -1,
    Auth = 1,
    Application = 2,
    Persistence = 3,
    Transport = 4,
    Contract = 5,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Every failure a settings call can end with.
///
/// Auth, Transport (from the gate) and Application errors are raised before
/// any store call. Persistence and Contract errors only follow a completed
/// store round trip.
#[derive(Debug, Error)]
pub enum ServiceError {
    // Token missing or rejected by the authority
    #[error("{0}")]
    Auth(String),

    // Authority or store unreachable, timed out, or answered garbage
    #[error("{0}")]
    Transport(String),

    // Malformed or missing request parameters
    #[error("{0}")]
    Application(String),

    // Store ran but the result breaks the operation's success contract
    #[error("{0}")]
    Persistence(String),

    // Store response does not have its documented shape
    #[error("Incorrect store output format: {0}")]
    Contract(String),

    #[error("{0}")]
    Unknown(String),
}

impl ServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Auth(_) => ErrorCode::Auth,
            ServiceError::Transport(_) => ErrorCode::Transport,
            ServiceError::Application(_) => ErrorCode::Application,
            ServiceError::Persistence(_) => ErrorCode::Persistence,
            ServiceError::Contract(_) => ErrorCode::Contract,
            ServiceError::Unknown(_) => ErrorCode::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ServiceError::Unknown(_))
    }

    /// Error object as it appears inside the envelope
    pub fn to_json(&self) -> Value {
        json!({
            "code": self.code().as_i32(),
            "message": self.to_string(),
        })
    }
}

impl ServiceError {
    pub fn auth(message: impl Into<String>) -> Self {
        ServiceError::Auth(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ServiceError::Transport(message.into())
    }

    pub fn application(message: impl Into<String>) -> Self {
        ServiceError::Application(message.into())
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        ServiceError::Persistence(message.into())
    }

    pub fn contract(message: impl Into<String>) -> Self {
        ServiceError::Contract(message.into())
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        ServiceError::Unknown(message.into())
    }

    /// Generic parameter failure used by the facade
    pub fn param_value() -> Self {
        ServiceError::Application("param value error".to_string())
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Protocol(_) => {
                tracing::error!("Store unreachable: {}", err);
                ServiceError::transport("Database temporarily unavailable")
            }
            sqlx::Error::ColumnNotFound(column) => {
                ServiceError::contract(format!("missing column '{}'", column))
            }
            sqlx::Error::ColumnIndexOutOfBounds { index, len } => {
                ServiceError::contract(format!("column {} out of bounds for {} columns", index, len))
            }
            sqlx::Error::ColumnDecode { index, source } => {
                ServiceError::contract(format!("column {} could not be decoded: {}", index, source))
            }
            sqlx::Error::Decode(source) => {
                ServiceError::contract(format!("row could not be decoded: {}", source))
            }
            sqlx::Error::Database(db_err) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Store rejected the call: {}", db_err);
                ServiceError::persistence("Database operation failed")
            }
            other => {
                tracing::error!("SQLx error: {}", other);
                ServiceError::unknown("Unexpected database error")
            }
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::transport("Auth service timed out")
        } else if err.is_decode() {
            ServiceError::transport(format!("Malformed auth service response: {}", err))
        } else {
            ServiceError::transport(format!("Auth service unreachable: {}", err))
        }
    }
}

impl From<crate::database::manager::DatabaseError> for ServiceError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        match err {
            crate::database::manager::DatabaseError::Sqlx(sqlx_err) => sqlx_err.into(),
            other => {
                tracing::error!("Database configuration error: {}", other);
                ServiceError::transport("Database temporarily unavailable")
            }
        }
    }
}

impl From<crate::filter::FilterError> for ServiceError {
    fn from(err: crate::filter::FilterError) -> Self {
        ServiceError::Application(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
