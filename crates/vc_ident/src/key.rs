//! Identity keys.
//!
//! An [`IdentityKey`] names one logical object inside one identity scope.
//! It is a plain value: equality and hashing are structural over the
//! `(scope type, scope, raw key)` triple, and keys may be compared across
//! resolvers.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt::{self, Debug, Display};
use core::hash::{Hash, Hasher};

use serde_core::de::{Error, Visitor};
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

// -----------------------------------------------------------------------------
// ScopeType

/// A type used to separate identity domains.
///
/// Only the [`TypeId`] takes part in comparison, the path is kept for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct ScopeType {
    id: TypeId,
    path: &'static str,
}

impl ScopeType {
    /// Returns the scope type of `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.path
    }
}

impl PartialEq for ScopeType {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ScopeType {}

impl Hash for ScopeType {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for ScopeType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl Display for ScopeType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

// -----------------------------------------------------------------------------
// RefId

/// A process-local surrogate for the identity of a shared allocation.
///
/// Only meaningful while the allocation is alive; see
/// [`ReferenceIdGenerator`](crate::generator::ReferenceIdGenerator).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefId(usize);

impl RefId {
    /// Returns the surrogate for the object behind `value`.
    ///
    /// Distinct live objects get distinct ids, except zero-sized values
    /// that are not behind their own allocation; put those in an `Arc`.
    #[inline]
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self((value as *const T).cast::<()>() as usize)
    }

    /// Returns the surrogate for the allocation behind `value`.
    #[inline]
    pub fn of_arc<T: ?Sized>(value: &Arc<T>) -> Self {
        Self(Arc::as_ptr(value).cast::<()>() as usize)
    }

    #[inline]
    pub const fn addr(self) -> usize {
        self.0
    }
}

impl Debug for RefId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{:x}", self.0)
    }
}

impl Display for RefId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{:x}", self.0)
    }
}

// -----------------------------------------------------------------------------
// RawKey

/// The raw value of an identity key.
///
/// Serializes as a bare integer or string, which is how back-references
/// usually appear in encoded data.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum RawKey {
    Int(i64),
    Str(Box<str>),
    Ref(RefId),
}

impl RawKey {
    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl Debug for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => Debug::fmt(v, f),
            Self::Str(v) => Debug::fmt(v, f),
            Self::Ref(v) => Debug::fmt(v, f),
        }
    }
}

impl Display for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => Display::fmt(v, f),
            Self::Str(v) => f.write_str(v),
            Self::Ref(v) => Display::fmt(v, f),
        }
    }
}

impl From<i64> for RawKey {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RawKey {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<&str> for RawKey {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for RawKey {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value.into_boxed_str())
    }
}

impl From<RefId> for RawKey {
    #[inline]
    fn from(value: RefId) -> Self {
        Self::Ref(value)
    }
}

impl Serialize for RawKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Str(v) => serializer.serialize_str(v),
            Self::Ref(v) => serializer.serialize_u64(v.0 as u64),
        }
    }
}

struct RawKeyVisitor;

impl<'de> Visitor<'de> for RawKeyVisitor {
    type Value = RawKey;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or string object id")
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(RawKey::Int(v))
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        match i64::try_from(v) {
            Ok(v) => Ok(RawKey::Int(v)),
            Err(_) => Err(E::custom(format_args!("object id `{v}` out of range"))),
        }
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(RawKey::from(v))
    }

    fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(RawKey::from(v))
    }
}

impl<'de> Deserialize<'de> for RawKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawKeyVisitor)
    }
}

// -----------------------------------------------------------------------------
// IdentityKey

/// Names one logical object within one identity scope.
///
/// Two keys are equal only if scope type, scope and raw key all match.
/// An absent scope is a value of its own, it does not match any scope.
///
/// # Examples
///
/// ```
/// use vc_ident::key::{IdentityKey, ScopeType};
///
/// let key = IdentityKey::new(ScopeType::of::<String>(), None, "key1");
/// assert_eq!(
///     key.to_string(),
///     "[ObjectId: key=key1, type=alloc::string::String, scope=NONE]",
/// );
///
/// let scoped = IdentityKey::new(ScopeType::of::<String>(), Some(ScopeType::of::<u8>()), "key1");
/// assert_ne!(key, scoped);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    scope_type: ScopeType,
    scope: Option<ScopeType>,
    raw: RawKey,
}

impl IdentityKey {
    #[inline]
    pub fn new(scope_type: ScopeType, scope: Option<ScopeType>, raw: impl Into<RawKey>) -> Self {
        Self {
            scope_type,
            scope,
            raw: raw.into(),
        }
    }

    /// The declared type the key belongs to.
    #[inline]
    pub const fn scope_type(&self) -> ScopeType {
        self.scope_type
    }

    #[inline]
    pub const fn scope(&self) -> Option<ScopeType> {
        self.scope
    }

    #[inline]
    pub const fn raw(&self) -> &RawKey {
        &self.raw
    }
}

impl Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityKey")
            .field("scope_type", &self.scope_type)
            .field("scope", &self.scope)
            .field("raw", &self.raw)
            .finish()
    }
}

impl Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ObjectId: key={}, type={}, scope=", self.raw, self.scope_type)?;
        match &self.scope {
            Some(scope) => write!(f, "{scope}]"),
            None => f.write_str("NONE]"),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use core::hash::BuildHasher;

    use super::{IdentityKey, RawKey, ScopeType};
    use crate::FixedHashState;

    #[test]
    fn structural_eq() {
        let a = IdentityKey::new(ScopeType::of::<String>(), None, "key1");
        let b = IdentityKey::new(ScopeType::of::<String>(), None, String::from("key1"));
        assert_eq!(a, b);
        assert_eq!(FixedHashState.hash_one(&a), FixedHashState.hash_one(&b));

        let other_type = IdentityKey::new(ScopeType::of::<u32>(), None, "key1");
        assert_ne!(a, other_type);

        let other_raw = IdentityKey::new(ScopeType::of::<String>(), None, "key2");
        assert_ne!(a, other_raw);
    }

    #[test]
    fn scope_is_distinct() {
        let none = IdentityKey::new(ScopeType::of::<String>(), None, 1);
        let a = IdentityKey::new(ScopeType::of::<String>(), Some(ScopeType::of::<u8>()), 1);
        let b = IdentityKey::new(ScopeType::of::<String>(), Some(ScopeType::of::<u16>()), 1);
        assert_ne!(none, a);
        assert_ne!(a, b);
        assert_eq!(
            a.to_string(),
            "[ObjectId: key=1, type=alloc::string::String, scope=u8]"
        );
    }

    #[test]
    fn int_and_str_differ() {
        assert_ne!(RawKey::from(1), RawKey::from("1"));
    }

    #[test]
    fn raw_key_serde() {
        let int: RawKey = serde_json::from_str("42").unwrap();
        assert_eq!(int, RawKey::Int(42));
        let s: RawKey = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(s.as_str(), Some("abc"));
        assert!(serde_json::from_str::<RawKey>("true").is_err());
        assert!(serde_json::from_str::<RawKey>("18446744073709551615").is_err());

        assert_eq!(serde_json::to_string(&RawKey::from("abc")).unwrap(), "\"abc\"");
        assert_eq!(ron::to_string(&RawKey::Int(-3)).unwrap(), "-3");
    }
}
