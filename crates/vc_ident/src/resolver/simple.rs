use alloc::boxed::Box;
use core::fmt;

use super::table::BindingTable;
use super::{IdResolver, is_strategy};
use crate::key::IdentityKey;
use crate::{BindError, Bound, SessionId};

// -----------------------------------------------------------------------------
// SimpleIdResolver

/// Single-writer [`IdResolver`] backed by a hash map.
///
/// # Examples
///
/// ```
/// use core::num::NonZeroU64;
/// use vc_ident::{Bound, SessionId};
/// use vc_ident::key::{IdentityKey, ScopeType};
/// use vc_ident::resolver::{IdResolver, SimpleIdResolver};
///
/// let mut resolver = SimpleIdResolver::new(SessionId::new(NonZeroU64::MIN));
/// let key = IdentityKey::new(ScopeType::of::<String>(), None, "key1");
///
/// let value = Bound::object(String::from("value1"));
/// resolver.bind_item(key.clone(), value.clone()).unwrap();
/// // Re-binding the same object is fine.
/// resolver.bind_item(key.clone(), value).unwrap();
///
/// let found = resolver.resolve_id(&key).unwrap();
/// assert_eq!(found.downcast_ref::<String>().unwrap(), "value1");
/// assert_eq!(resolver.len(), 1);
///
/// // An equal but distinct object is rejected.
/// let err = resolver
///     .bind_item(key, Bound::object(String::from("value1")))
///     .unwrap_err();
/// assert!(err.to_string().starts_with("Object Id conflict"));
/// ```
pub struct SimpleIdResolver {
    session: SessionId,
    table: BindingTable,
}

impl SimpleIdResolver {
    /// Creates an empty resolver for `session`.
    #[inline]
    pub const fn new(session: SessionId) -> Self {
        Self {
            session,
            table: BindingTable::new(),
        }
    }
}

impl IdResolver for SimpleIdResolver {
    #[inline]
    fn bind_item(&mut self, key: IdentityKey, value: Bound) -> Result<(), BindError> {
        self.table.bind(key, value).map_err(BindError::Conflict)
    }

    #[inline]
    fn resolve_id(&self, key: &IdentityKey) -> Option<Bound> {
        self.table.get(key)
    }

    #[inline]
    fn can_use_for(&self, other: &dyn IdResolver) -> bool {
        is_strategy::<Self>(other)
    }

    fn new_for_deserialization(&self, session: SessionId) -> Box<dyn IdResolver> {
        log::debug!("new object id resolver for session {session}");
        Box::new(Self::new(session))
    }

    #[inline]
    fn session(&self) -> SessionId {
        self.session
    }

    #[inline]
    fn len(&self) -> usize {
        self.table.len()
    }
}

impl fmt::Debug for SimpleIdResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleIdResolver")
            .field("session", &self.session)
            .field("len", &self.table.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
