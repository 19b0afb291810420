use core::fmt;

use crate::SessionId;
use crate::generator::IdGenerator;
use crate::key::{IdentityKey, RawKey, ScopeType};

// -----------------------------------------------------------------------------
// PropertyIdGenerator

/// Keys values of type `T` by one of their own properties.
///
/// The accessor returns `None` for values that should not be tracked.
///
/// # Examples
///
/// ```
/// use core::num::NonZeroU64;
/// use vc_ident::SessionId;
/// use vc_ident::generator::{IdGenerator, PropertyIdGenerator};
/// use vc_ident::key::RawKey;
///
/// struct Node {
///     name: &'static str,
/// }
///
/// let template = PropertyIdGenerator::new("name", |node: &Node| Some(RawKey::from(node.name)));
/// let mut session = template.new_for_serialization(SessionId::new(NonZeroU64::MIN));
///
/// let key = session.generate_id(&Node { name: "root" }).unwrap();
/// assert_eq!(key.raw().as_str(), Some("root"));
/// ```
pub struct PropertyIdGenerator<T: ?Sized> {
    scope_type: ScopeType,
    scope: Option<ScopeType>,
    property: &'static str,
    accessor: fn(&T) -> Option<RawKey>,
}

impl<T: ?Sized + 'static> PropertyIdGenerator<T> {
    /// Creates a template reading `property` through `accessor`.
    #[inline]
    pub fn new(property: &'static str, accessor: fn(&T) -> Option<RawKey>) -> Self {
        Self {
            scope_type: ScopeType::of::<T>(),
            scope: None,
            property,
            accessor,
        }
    }
}

impl<T: ?Sized> PropertyIdGenerator<T> {
    /// Name of the property the key is read from.
    #[inline]
    pub const fn property(&self) -> &'static str {
        self.property
    }
}

impl<T: ?Sized> Clone for PropertyIdGenerator<T> {
    fn clone(&self) -> Self {
        Self {
            scope_type: self.scope_type,
            scope: self.scope,
            property: self.property,
            accessor: self.accessor,
        }
    }
}

impl<T: ?Sized> fmt::Debug for PropertyIdGenerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyIdGenerator")
            .field("scope_type", &self.scope_type)
            .field("scope", &self.scope)
            .field("property", &self.property)
            .finish()
    }
}

impl<T: ?Sized> IdGenerator<T> for PropertyIdGenerator<T> {
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

    fn generate_id(&mut self, value: &T) -> Option<IdentityKey> {
        let raw = (self.accessor)(value)?;
        Some(IdentityKey::new(self.scope_type, self.scope, raw))
    }

    fn can_use_for(&self, other: &Self) -> bool {
        self.property == other.property
            && self.scope_type == other.scope_type
            && self.scope == other.scope
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::num::NonZeroU64;

    use super::PropertyIdGenerator;
    use crate::SessionId;
    use crate::generator::IdGenerator;
    use crate::key::{IdentityKey, RawKey, ScopeType};

    struct Account {
        id: Option<i64>,
        owner: &'static str,
    }

    fn by_id() -> PropertyIdGenerator<Account> {
        PropertyIdGenerator::new("id", |a: &Account| a.id.map(RawKey::Int))
    }

    #[test]
    fn reads_property() {
        let mut generator = by_id().new_for_serialization(SessionId::new(NonZeroU64::MIN));

        let key = generator
            .generate_id(&Account { id: Some(9), owner: "a" })
            .unwrap();
        assert_eq!(key, IdentityKey::new(ScopeType::of::<Account>(), None, 9_i64));

        // Same property value, same key: identity follows the property.
        let again = generator
            .generate_id(&Account { id: Some(9), owner: "b" })
            .unwrap();
        assert_eq!(key, again);

        assert!(
            generator
                .generate_id(&Account { id: None, owner: "c" })
                .is_none()
        );
    }

    #[test]
    fn decode_key_matches() {
        let generator = by_id();
        let encoded = generator
            .clone()
            .generate_id(&Account { id: Some(3), owner: "x" })
            .unwrap();
        assert_eq!(generator.key(RawKey::Int(3)), encoded);
    }

    #[test]
    fn can_use_for_checks_property() {
        let owner = PropertyIdGenerator::new("owner", |a: &Account| Some(RawKey::from(a.owner)));
        assert!(by_id().can_use_for(&by_id()));
        assert!(!by_id().can_use_for(&owner));
        assert!(!by_id().can_use_for(&by_id().for_scope(Some(ScopeType::of::<u8>()))));
    }
}
