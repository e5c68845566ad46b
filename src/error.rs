use std::io;

use thiserror::Error;
use uuid::Uuid;

use crate::workout::Kind;

/// Rejected numeric input or an unrevivable stored record. Validation runs
/// before any state is touched, so a failure leaves the collection as it was.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} must be a positive, finite number (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("unknown workout kind {kind:?}")]
    UnknownKind { kind: String },

    #[error("{field} does not apply to a {kind} workout")]
    FieldMismatch { field: &'static str, kind: Kind },

    #[error("malformed workout record: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("no workout with id {0}")]
    NotFound(Uuid),

    #[error("writing workout log: {0}")]
    Persist(#[from] io::Error),
}
