//! Decode-side identity bindings.
//!
//! While decoding, the host engine registers every materialized object under
//! its key with [`IdResolver::bind_item`] and looks back-references up with
//! [`IdResolver::resolve_id`]. A miss is a plain `None`: whether a forward
//! reference is deferred or rejected is up to the caller.
//!
//! ## Lifecycle
//!
//! A resolver is created fresh for each decode session through
//! [`IdResolver::new_for_deserialization`], only grows during that session,
//! and is dropped with it. Bindings never carry over to another session.
//!
//! ## Strategies
//!
//! - [`SimpleIdResolver`]: single-writer store, the default.
//! - [`SyncIdResolver`]: lock-guarded store for decoders that share one
//!   session across threads (`std` only).

// -----------------------------------------------------------------------------
// Modules

mod simple;
mod table;

#[cfg(feature = "std")]
mod sync;

// -----------------------------------------------------------------------------
// Exports

pub use simple::SimpleIdResolver;

#[cfg(feature = "std")]
pub use sync::SyncIdResolver;

use alloc::boxed::Box;
use core::any::Any;

use crate::key::IdentityKey;
use crate::{BindError, Bound, SessionId};

// -----------------------------------------------------------------------------
// IdResolver

/// Per-session store of key to object bindings.
///
/// # Contract
///
/// - At most one object is ever bound to a key.
/// - Binding the *same* object (by reference) again is a no-op.
/// - Binding a *different* object, even an equal one, is a conflict and is
///   always reported.
pub trait IdResolver: Any + Send {
    /// Registers `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Conflict`] if `key` already holds a different
    /// object; the existing binding is kept.
    fn bind_item(&mut self, key: IdentityKey, value: Bound) -> Result<(), BindError>;

    /// Returns the binding for `key`, or `None` if it was never bound.
    fn resolve_id(&self, key: &IdentityKey) -> Option<Bound>;

    /// Whether `other` is the same concrete strategy as `self`.
    fn can_use_for(&self, other: &dyn IdResolver) -> bool;

    /// Returns an empty resolver of the same strategy for a new decode session.
    ///
    /// Bindings of `self` are never copied.
    fn new_for_deserialization(&self, session: SessionId) -> Box<dyn IdResolver>;

    /// The session this resolver was created for.
    fn session(&self) -> SessionId;

    /// Number of bound keys.
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns `true` if `other` is an `R`.
#[inline]
pub fn is_strategy<R: IdResolver>(other: &dyn IdResolver) -> bool {
    let other: &dyn Any = other;
    other.is::<R>()
}
