use crate::lifecycle::RelationCategory;
use crate::store::StoreError;
use thiserror::Error;

/// Failure classes a caller can branch on without reading message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authorization,
    NotFound,
    DomainRuleViolation,
    ConstraintConflict,
    Unclassified,
    Cancelled,
    Dispatch,
    Registration,
}

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    DomainRule(String),

    /// Storage refused a physical delete because another row still points at it.
    /// `referencing_table` is diagnostic only and never part of the message.
    #[error("{message}")]
    ConstraintConflict {
        entity: &'static str,
        relation: RelationCategory,
        referencing_table: Option<String>,
        message: String,
    },

    #[error("{message}")]
    Unclassified {
        message: String,
        #[source]
        source: StoreError,
    },

    #[error("Operation cancelled before commit")]
    Cancelled,

    #[error("No handler registered for command '{0}'")]
    HandlerNotRegistered(&'static str),

    #[error("Registration error: {0}")]
    Registration(String),
}

pub type Result<T> = std::result::Result<T, LifecycleError>;

impl LifecycleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Authorization,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DomainRule(_) => ErrorKind::DomainRuleViolation,
            Self::ConstraintConflict { .. } => ErrorKind::ConstraintConflict,
            Self::Unclassified { .. } => ErrorKind::Unclassified,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::HandlerNotRegistered(_) => ErrorKind::Dispatch,
            Self::Registration(_) => ErrorKind::Registration,
        }
    }

    /// Wraps a store failure. Cancellation keeps its own kind so callers can
    /// tell an aborted operation apart from a broken backend.
    pub fn from_store(err: StoreError, message: impl Into<String>) -> Self {
        match err {
            StoreError::Cancelled => Self::Cancelled,
            other => Self::Unclassified {
                message: message.into(),
                source: other,
            },
        }
    }
}
