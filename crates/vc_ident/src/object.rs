use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt::{self, Debug};

// -----------------------------------------------------------------------------
// IdObject

/// An object that can be bound to an identity key.
///
/// Implemented for every `'static` type that is `Debug + Send + Sync`,
/// the debug output is used to describe the object in conflict reports.
pub trait IdObject: Any + Send + Sync {
    /// The full type path of the concrete object.
    fn type_path(&self) -> &'static str;

    /// Writes a human-readable rendering of the object.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T: Any + Debug + Send + Sync> IdObject for T {
    #[inline]
    fn type_path(&self) -> &'static str {
        core::any::type_name::<T>()
    }

    #[inline]
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

/// A shared reference to a materialized object.
///
/// Two `ObjectRef`s are the *same object* only if they point to the same
/// allocation; value equality is never consulted.
pub type ObjectRef = Arc<dyn IdObject>;

struct Describe<'a>(&'a dyn IdObject);

impl Debug for Describe<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        IdObject::describe(self.0, f)
    }
}

/// Longest value rendering kept in a description, counted in chars.
const MAX_DESC_LEN: usize = 100;

fn truncate(mut desc: String) -> String {
    if let Some((index, _)) = desc.char_indices().nth(MAX_DESC_LEN) {
        desc.truncate(index);
        desc.push_str("[... truncated]");
    }
    desc
}

// -----------------------------------------------------------------------------
// Bound

/// The value stored for one identity key.
///
/// `Absent` is an explicit "resolved to nothing" entry, it is not the same
/// as a key that was never bound.
#[derive(Clone)]
pub enum Bound {
    Absent,
    Object(ObjectRef),
}

impl Bound {
    /// Wraps `value` into a fresh allocation.
    ///
    /// Every call produces a distinct object, even for equal values.
    #[inline]
    pub fn object<T: IdObject>(value: T) -> Self {
        Self::Object(Arc::new(value))
    }

    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the bound object, if any.
    #[inline]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(obj) => Some(obj),
            Self::Absent => None,
        }
    }

    /// Returns the bound object as `T`, if it is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_ident::Bound;
    ///
    /// let bound = Bound::object(7_u32);
    /// assert_eq!(bound.downcast_ref::<u32>(), Some(&7));
    /// assert_eq!(bound.downcast_ref::<i32>(), None);
    /// ```
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let obj = self.as_object()?;
        let any: &dyn Any = &**obj;
        any.downcast_ref::<T>()
    }

    /// Reference identity: both absent, or both pointing at one allocation.
    pub fn same_as(&self, other: &Bound) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) => true,
            (Self::Object(a), Self::Object(b)) => {
                core::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }

    /// Bounded description used in conflict messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Absent => String::from("(null)"),
            Self::Object(obj) => {
                let obj: &dyn IdObject = &**obj;
                let value = truncate(format!("{:?}", Describe(obj)));
                format!("(type: `{}`, value: {value})", IdObject::type_path(obj))
            }
        }
    }
}

impl From<ObjectRef> for Bound {
    #[inline]
    fn from(value: ObjectRef) -> Self {
        Self::Object(value)
    }
}

impl From<Option<ObjectRef>> for Bound {
    #[inline]
    fn from(value: Option<ObjectRef>) -> Self {
        match value {
            Some(obj) => Self::Object(obj),
            None => Self::Absent,
        }
    }
}

impl Debug for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Object(obj) => f.debug_tuple("Object").field(&Describe(&**obj)).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use super::{Bound, ObjectRef};

    #[test]
    fn identity_not_equality() {
        let a = Bound::object(String::from("value1"));
        let b = Bound::object(String::from("value1"));
        assert!(!a.same_as(&b));
        assert!(a.same_as(&a.clone()));
        assert!(Bound::Absent.same_as(&Bound::Absent));
        assert!(!Bound::Absent.same_as(&a));
    }

    #[test]
    fn describe_string() {
        let bound = Bound::object(String::from("value1"));
        assert_eq!(
            bound.describe(),
            "(type: `alloc::string::String`, value: \"value1\")"
        );
        assert_eq!(Bound::Absent.describe(), "(null)");
    }

    #[test]
    fn describe_truncated() {
        let long: Vec<u8> = (0..200).map(|i| (i % 10) as u8).collect();
        let bound = Bound::object(long);
        let desc = bound.describe();
        assert!(desc.ends_with("[... truncated])"));
        assert!(desc.len() < 200);
    }

    #[test]
    fn from_option() {
        let obj: ObjectRef = Arc::new(3_i64);
        assert!(Bound::from(None::<ObjectRef>).is_absent());
        assert_eq!(Bound::from(Some(obj)).downcast_ref::<i64>(), Some(&3));
    }
}
