use alloc::boxed::Box;
use core::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::table::BindingTable;
use super::{IdResolver, is_strategy};
use crate::key::IdentityKey;
use crate::{BindError, Bound, SessionId};

// -----------------------------------------------------------------------------
// SyncIdResolver

/// An [`IdResolver`] that can be shared by parallel sub-graph decoders.
///
/// Every bind is a single critical section, so two threads can never both
/// observe a key as unbound and then bind different objects to it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use core::num::NonZeroU64;
/// use vc_ident::{Bound, SessionId};
/// use vc_ident::key::{IdentityKey, ScopeType};
/// use vc_ident::resolver::SyncIdResolver;
///
/// let resolver = Arc::new(SyncIdResolver::new(SessionId::new(NonZeroU64::MIN)));
/// let key = IdentityKey::new(ScopeType::of::<u32>(), None, 1);
///
/// let handles: Vec<_> = (0..4_u32)
///     .map(|i| {
///         let resolver = resolver.clone();
///         let key = key.clone();
///         std::thread::spawn(move || resolver.bind(key, Bound::object(i)).is_ok())
///     })
///     .collect();
///
/// let winners = handles
///     .into_iter()
///     .map(|h| h.join().unwrap())
///     .filter(|ok| *ok)
///     .count();
///
/// assert_eq!(winners, 1);
/// assert_eq!(resolver.len(), 1);
/// ```
pub struct SyncIdResolver {
    session: SessionId,
    table: Mutex<BindingTable>,
}

impl SyncIdResolver {
    /// Creates an empty resolver for `session`.
    #[inline]
    pub const fn new(session: SessionId) -> Self {
        Self {
            session,
            table: Mutex::new(BindingTable::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BindingTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Shared-access version of [`IdResolver::bind_item`].
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Conflict`] if `key` already holds a different object.
    pub fn bind(&self, key: IdentityKey, value: Bound) -> Result<(), BindError> {
        self.lock().bind(key, value).map_err(BindError::Conflict)
    }

    /// Shared-access version of [`IdResolver::resolve_id`].
    pub fn resolve(&self, key: &IdentityKey) -> Option<Bound> {
        self.lock().get(key)
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IdResolver for SyncIdResolver {
    fn bind_item(&mut self, key: IdentityKey, value: Bound) -> Result<(), BindError> {
        self.table
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .bind(key, value)
            .map_err(BindError::Conflict)
    }

    #[inline]
    fn resolve_id(&self, key: &IdentityKey) -> Option<Bound> {
        self.resolve(key)
    }

    #[inline]
    fn can_use_for(&self, other: &dyn IdResolver) -> bool {
        is_strategy::<Self>(other)
    }

    fn new_for_deserialization(&self, session: SessionId) -> Box<dyn IdResolver> {
        log::debug!("new shared object id resolver for session {session}");
        Box::new(Self::new(session))
    }

    #[inline]
    fn session(&self) -> SessionId {
        self.session
    }

    #[inline]
    fn len(&self) -> usize {
        SyncIdResolver::len(self)
    }
}

impl fmt::Debug for SyncIdResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncIdResolver")
            .field("session", &self.session)
            .field("len", &self.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::num::NonZeroU64;
    use alloc::sync::Arc;
    use std::thread;

    use super::SyncIdResolver;
    use crate::key::{IdentityKey, ScopeType};
    use crate::resolver::{IdResolver, SimpleIdResolver};
    use crate::{Bound, SessionId};

    fn session() -> SessionId {
        SessionId::new(NonZeroU64::MIN)
    }

    #[test]
    fn one_winner_per_key() {
        let resolver = Arc::new(SyncIdResolver::new(session()));
        let key = IdentityKey::new(ScopeType::of::<String>(), None, "shared");

        let handles: Vec<_> = (0..8_u32)
            .map(|i| {
                let resolver = resolver.clone();
                let key = key.clone();
                thread::spawn(move || resolver.bind(key, Bound::object(i)).is_ok())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn same_object_from_many_threads() {
        let resolver = Arc::new(SyncIdResolver::new(session()));
        let key = IdentityKey::new(ScopeType::of::<String>(), None, 7);
        let value = Bound::object(String::from("node"));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let resolver = resolver.clone();
                let key = key.clone();
                let value = value.clone();
                thread::spawn(move || resolver.bind(key, value).is_ok())
            })
            .collect();

        assert!(handles.into_iter().all(|h| h.join().unwrap()));
        assert!(resolver.resolve(&key).unwrap().same_as(&value));
    }

    #[test]
    fn strategies_differ() {
        let shared = SyncIdResolver::new(session());
        let simple = SimpleIdResolver::new(session());
        assert!(!shared.can_use_for(&simple));
        assert!(!simple.can_use_for(&shared));

        let fresh = shared.new_for_deserialization(session());
        assert!(shared.can_use_for(&*fresh));
        assert!(fresh.is_empty());
    }

    #[test]
    fn exclusive_bind_item() {
        let mut resolver = SyncIdResolver::new(session());
        let key = IdentityKey::new(ScopeType::of::<String>(), None, "a");
        resolver.bind_item(key.clone(), Bound::object(1_i32)).unwrap();
        assert!(resolver.bind_item(key.clone(), Bound::object(2_i32)).is_err());
        assert_eq!(resolver.resolve_id(&key).unwrap().downcast_ref::<i32>(), Some(&1));
    }
}
