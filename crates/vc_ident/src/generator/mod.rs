//! Encode-side identity generation.
//!
//! An [`IdGenerator`] decides whether a value takes part in identity
//! tracking and, if so, which [`IdentityKey`] it gets.
//!
//! ## Sharing
//!
//! A generator declared for a property is a *template*: it is shared by
//! every encode operation and is never advanced. Each encode session calls
//! [`IdGenerator::new_for_serialization`] to get its own instance, which is
//! where counters and other per-session state live.
//!
//! ## Strategies
//!
//! - [`PropertyIdGenerator`]: the key is read from a designated property.
//! - [`SequenceIdGenerator`]: the key is the next integer of a per-session sequence.
//! - [`ReferenceIdGenerator`]: the key is the object's own address.
//!
//! [`IdTracker`] builds on any of them to tell first appearances from
//! back-references.

// -----------------------------------------------------------------------------
// Modules

mod property;
mod reference;
mod sequence;
mod tracker;

// -----------------------------------------------------------------------------
// Exports

pub use property::PropertyIdGenerator;
pub use reference::ReferenceIdGenerator;
pub use sequence::SequenceIdGenerator;
pub use tracker::{IdTracker, Tracked};

use crate::SessionId;
use crate::key::{IdentityKey, RawKey, ScopeType};

// -----------------------------------------------------------------------------
// IdGenerator

/// A strategy producing identity keys for values of type `T`.
pub trait IdGenerator<T: ?Sized>: Send + Sync {
    /// The declared type the generated keys belong to.
    fn scope_type(&self) -> ScopeType;

    /// The scope discriminator, if any.
    fn scope(&self) -> Option<ScopeType>;

    /// Returns a generator of the same strategy bound to `scope`.
    fn for_scope(&self, scope: Option<ScopeType>) -> Self
    where
        Self: Sized;

    /// Returns a fresh per-session instance of this generator.
    fn new_for_serialization(&self, session: SessionId) -> Self
    where
        Self: Sized;

    /// Produces the key for `value`, or `None` if it is not tracked.
    fn generate_id(&mut self, value: &T) -> Option<IdentityKey>;

    /// Builds a key for `raw` in this generator's scope.
    ///
    /// Used while decoding, when the raw id comes from the input.
    #[inline]
    fn key(&self, raw: RawKey) -> IdentityKey {
        IdentityKey::new(self.scope_type(), self.scope(), raw)
    }

    /// Whether `other` produces keys from the same domain as `self`.
    #[inline]
    fn can_use_for(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.scope_type() == other.scope_type() && self.scope() == other.scope()
    }
}
