use alloc::string::String;

use thiserror::Error;

use crate::key::IdentityKey;

// -----------------------------------------------------------------------------
// Error

/// An attempt to bind a key that already holds a different object.
///
/// `existing` and `incoming` are bounded descriptions of the two objects,
/// including their type path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "Object Id conflict: Id {key} already bound to an Object {existing}: \
     attempt to re-bind to a different Object {incoming}"
)]
pub struct ConflictError {
    pub key: IdentityKey,
    pub existing: String,
    pub incoming: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BindError {
    #[error(transparent)]
    Conflict(ConflictError),
}

impl From<ConflictError> for BindError {
    #[inline]
    fn from(value: ConflictError) -> Self {
        BindError::Conflict(value)
    }
}

impl BindError {
    /// The key the failed binding targeted.
    #[inline]
    pub fn key(&self) -> &IdentityKey {
        match self {
            BindError::Conflict(e) => &e.key,
        }
    }
}
