use core::fmt;
use core::marker::PhantomData;

use crate::SessionId;
use crate::generator::IdGenerator;
use crate::key::{IdentityKey, RawKey, RefId, ScopeType};

// -----------------------------------------------------------------------------
// ReferenceIdGenerator

/// Keys values of type `T` by their own identity.
///
/// The key is the address of the value, so it stays unique only while the
/// value is alive. [`IdTracker`] keeps every tracked allocation alive for
/// the whole session, which is the intended way to drive this strategy.
///
/// [`IdTracker`]: crate::generator::IdTracker
pub struct ReferenceIdGenerator<T: ?Sized> {
    scope_type: ScopeType,
    scope: Option<ScopeType>,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized + 'static> ReferenceIdGenerator<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            scope_type: ScopeType::of::<T>(),
            scope: None,
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized + 'static> Default for ReferenceIdGenerator<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for ReferenceIdGenerator<T> {
    fn clone(&self) -> Self {
        Self {
            scope_type: self.scope_type,
            scope: self.scope,
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for ReferenceIdGenerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceIdGenerator")
            .field("scope_type", &self.scope_type)
            .field("scope", &self.scope)
            .finish()
    }
}

impl<T: ?Sized> IdGenerator<T> for ReferenceIdGenerator<T> {
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

    #[inline]
    fn new_for_serialization(&self, _session: SessionId) -> Self {
        self.clone()
    }

    #[inline]
    fn generate_id(&mut self, value: &T) -> Option<IdentityKey> {
        let raw = RawKey::Ref(RefId::of(value));
        Some(IdentityKey::new(self.scope_type, self.scope, raw))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;

    use super::ReferenceIdGenerator;
    use crate::generator::IdGenerator;

    #[test]
    fn same_object_same_key() {
        let mut generator = ReferenceIdGenerator::<String>::new();
        let a = Arc::new(String::from("node"));
        let b = Arc::new(String::from("node"));

        let ka = generator.generate_id(&a).unwrap();
        assert_eq!(ka, generator.generate_id(&a.clone()).unwrap());
        assert_ne!(ka, generator.generate_id(&b).unwrap());
    }

    #[test]
    fn zero_sized_in_arc() {
        let mut generator = ReferenceIdGenerator::<()>::new();
        let a = Arc::new(());
        let b = Arc::new(());
        assert_ne!(generator.generate_id(&a), generator.generate_id(&b));
    }
}
