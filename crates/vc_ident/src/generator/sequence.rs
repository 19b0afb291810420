use core::fmt;
use core::marker::PhantomData;

use crate::SessionId;
use crate::generator::IdGenerator;
use crate::key::{IdentityKey, RawKey, ScopeType};

/// First id handed out by every session.
const INITIAL_VALUE: i64 = 1;

// -----------------------------------------------------------------------------
// SequenceIdGenerator

/// Keys values of type `T` with a per-session integer sequence starting at `1`.
///
/// # Examples
///
/// ```
/// use core::num::NonZeroU64;
/// use vc_ident::SessionId;
/// use vc_ident::generator::{IdGenerator, SequenceIdGenerator};
///
/// let template = SequenceIdGenerator::<str>::new();
///
/// let mut session = template.new_for_serialization(SessionId::new(NonZeroU64::MIN));
/// let first = session.generate_id("a").unwrap();
/// let second = session.generate_id("b").unwrap();
/// assert_eq!(first.raw().as_int(), Some(1));
/// assert_eq!(second.raw().as_int(), Some(2));
///
/// // The shared template never moves.
/// assert_eq!(template.peek(), 1);
/// ```
pub struct SequenceIdGenerator<T: ?Sized> {
    scope_type: ScopeType,
    scope: Option<ScopeType>,
    next: i64,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized + 'static> SequenceIdGenerator<T> {
    /// Creates a template keyed under the type `T`.
    #[inline]
    pub fn new() -> Self {
        Self::with_scope_type(ScopeType::of::<T>())
    }
}

impl<T: ?Sized + 'static> Default for SequenceIdGenerator<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> SequenceIdGenerator<T> {
    /// Creates a template keyed under an explicit scope type.
    #[inline]
    pub const fn with_scope_type(scope_type: ScopeType) -> Self {
        Self {
            scope_type,
            scope: None,
            next: INITIAL_VALUE,
            _marker: PhantomData,
        }
    }

    /// The value the next generated key will carry.
    #[inline]
    pub const fn peek(&self) -> i64 {
        self.next
    }
}

impl<T: ?Sized> Clone for SequenceIdGenerator<T> {
    fn clone(&self) -> Self {
        Self {
            scope_type: self.scope_type,
            scope: self.scope,
            next: self.next,
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for SequenceIdGenerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceIdGenerator")
            .field("scope_type", &self.scope_type)
            .field("scope", &self.scope)
            .field("next", &self.next)
            .finish()
    }
}

impl<T: ?Sized> IdGenerator<T> for SequenceIdGenerator<T> {
    #[inline]
    fn scope_type(&self) -> ScopeType {
        self.scope_type
    }

    #[inline]
    fn scope(&self) -> Option<ScopeType> {
        self.scope
    }

    fn for_scope(&self, scope: Option<ScopeType>) -> Self {
        Self {
            scope,
            ..self.clone()
        }
    }

    fn new_for_serialization(&self, session: SessionId) -> Self {
        log::debug!(
            "new id sequence for `{}` in session {session}",
            self.scope_type
        );
        Self {
            next: INITIAL_VALUE,
            ..self.clone()
        }
    }

    fn generate_id(&mut self, _value: &T) -> Option<IdentityKey> {
        let id = self.next;
        self.next = id.checked_add(1)?;
        Some(IdentityKey::new(self.scope_type, self.scope, RawKey::Int(id)))
    }
}

// -----------------------------------------------------------------------------
// Tests
