use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt::{self, Debug, Display};
use core::hash::{Hash, Hasher};

use crate::{OptBool, OverrideConfig};

// -----------------------------------------------------------------------------
// OverrideValue

struct Inner {
    id: Option<Box<str>>,
    use_input: OptBool,
    tolerate_missing: OptBool,
}

/// Override settings attached to one property.
///
/// - `id`: which injectable value to use; unset means derive it from the
///   property.
/// - `use_input`: whether a value present in the input wins over the
///   injected one.
/// - `tolerate_missing`: whether an unresolvable value is acceptable.
///
/// The value with every setting unset is the single [`EMPTY`] instance:
/// constructors and "with" methods return it whenever their result would be
/// empty, and "with" methods return `self` when nothing changes. Use
/// [`ptr_eq`] to test for that identity.
///
/// # Examples
///
/// ```
/// use vc_inject::{OptBool, OverrideValue};
///
/// let empty = OverrideValue::empty();
/// assert!(OverrideValue::construct(Some(""), OptBool::Unset, OptBool::Unset).ptr_eq(&empty));
///
/// let v = empty.with_id(Some("name"));
/// assert!(v.with_id(Some("name")).ptr_eq(&v));
/// assert_eq!(v.to_string(), "OverrideValue(id=name,useInput=null,tolerateMissing=null)");
/// ```
///
/// [`EMPTY`]: OverrideValue::EMPTY
/// [`ptr_eq`]: OverrideValue::ptr_eq
#[derive(Clone)]
pub struct OverrideValue(Option<Arc<Inner>>);

impl OverrideValue {
    /// The canonical empty value.
    pub const EMPTY: Self = Self(None);

    /// Returns the canonical empty value.
    #[inline]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Creates a value, returning [`EMPTY`](Self::EMPTY) if nothing is set.
    ///
    /// An empty `id` is treated as unset.
    pub fn construct(id: Option<&str>, use_input: OptBool, tolerate_missing: OptBool) -> Self {
        let id = id.filter(|id| !id.is_empty());
        if id.is_none() && !use_input.is_set() && !tolerate_missing.is_set() {
            return Self::EMPTY;
        }
        Self(Some(Arc::new(Inner {
            id: id.map(Box::from),
            use_input,
            tolerate_missing,
        })))
    }

    /// Creates a value from declared settings; `None` gives [`EMPTY`](Self::EMPTY).
    #[inline]
    pub fn from_config(config: Option<&OverrideConfig>) -> Self {
        match config {
            Some(config) => Self::construct(
                Some(config.id),
                config.use_input,
                config.tolerate_missing,
            ),
            None => Self::EMPTY,
        }
    }

    /// Same as `construct(Some(id), Unset, Unset)`.
    #[inline]
    pub fn for_id(id: &str) -> Self {
        Self::construct(Some(id), OptBool::Unset, OptBool::Unset)
    }

    // -------------------------------------------------------------------------
    // Mutant factories

    /// Returns a value differing from `self` only in `id`.
    ///
    /// Returns `self` if `id` is already the current one.
    pub fn with_id(&self, id: Option<&str>) -> Self {
        let id = id.filter(|id| !id.is_empty());
        if id == self.id() {
            return self.clone();
        }
        Self::construct(id, self.use_input(), self.tolerate_missing())
    }

    /// Returns a value differing from `self` only in `use_input`.
    ///
    /// Returns `self` if the setting is unchanged.
    pub fn with_use_input(&self, use_input: impl Into<OptBool>) -> Self {
        let use_input = use_input.into();
        if use_input == self.use_input() {
            return self.clone();
        }
        Self::construct(self.id(), use_input, self.tolerate_missing())
    }

    /// Returns a value differing from `self` only in `tolerate_missing`.
    ///
    /// Returns `self` if the setting is unchanged.
    pub fn with_tolerate_missing(&self, tolerate_missing: impl Into<OptBool>) -> Self {
        let tolerate_missing = tolerate_missing.into();
        if tolerate_missing == self.tolerate_missing() {
            return self.clone();
        }
        Self::construct(self.id(), self.use_input(), tolerate_missing)
    }

    /// Layers `overrides` on top of `self`: every setting set in
    /// `overrides` wins.
    ///
    /// Returns `self` if `overrides` changes nothing.
    ///
    /// ```
    /// use vc_inject::{OptBool, OverrideValue};
    ///
    /// let base = OverrideValue::for_id("db").with_use_input(true);
    /// let merged = base.with_overrides(&OverrideValue::empty().with_use_input(false));
    /// assert_eq!(merged.id(), Some("db"));
    /// assert_eq!(merged.use_input(), OptBool::False);
    /// assert!(base.with_overrides(&OverrideValue::empty()).ptr_eq(&base));
    /// ```
    pub fn with_overrides(&self, overrides: &OverrideValue) -> Self {
        let Some(other) = &overrides.0 else {
            return self.clone();
        };
        let id = other.id.as_deref().or(self.id());
        let use_input = pick(other.use_input, self.use_input());
        let tolerate_missing = pick(other.tolerate_missing, self.tolerate_missing());

        if id == self.id()
            && use_input == self.use_input()
            && tolerate_missing == self.tolerate_missing()
        {
            return self.clone();
        }
        Self::construct(id, use_input, tolerate_missing)
    }

    // -------------------------------------------------------------------------
    // Accessors

    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.0.as_ref().and_then(|inner| inner.id.as_deref())
    }

    #[inline]
    pub fn use_input(&self) -> OptBool {
        self.0.as_ref().map_or(OptBool::Unset, |inner| inner.use_input)
    }

    #[inline]
    pub fn tolerate_missing(&self) -> OptBool {
        self.0
            .as_ref()
            .map_or(OptBool::Unset, |inner| inner.tolerate_missing)
    }

    #[inline]
    pub fn has_id(&self) -> bool {
        self.id().is_some()
    }

    /// Whether this is the canonical empty value.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Whether input data wins, using `default` when unset.
    #[inline]
    pub fn will_use_input(&self, default: bool) -> bool {
        self.use_input().as_bool_or(default)
    }

    /// Whether a missing value is acceptable, using `default` when unset.
    #[inline]
    pub fn will_tolerate_missing(&self, default: bool) -> bool {
        self.tolerate_missing().as_bool_or(default)
    }

    /// Identity comparison: `true` only for the very same instance.
    #[inline]
    pub fn ptr_eq(&self, other: &OverrideValue) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[inline]
fn pick(preferred: OptBool, fallback: OptBool) -> OptBool {
    if preferred.is_set() {
        preferred
    } else {
        fallback
    }
}

impl Default for OverrideValue {
    #[inline]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<&OverrideConfig> for OverrideValue {
    #[inline]
    fn from(value: &OverrideConfig) -> Self {
        Self::from_config(Some(value))
    }
}

impl PartialEq for OverrideValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.id() == other.id()
                && self.use_input() == other.use_input()
                && self.tolerate_missing() == other.tolerate_missing())
    }
}

impl Eq for OverrideValue {}

impl Hash for OverrideValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
        self.use_input().hash(state);
        self.tolerate_missing().hash(state);
    }
}

impl Display for OverrideValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OverrideValue(id={},useInput={},tolerateMissing={})",
            self.id().unwrap_or("null"),
            self.use_input(),
            self.tolerate_missing(),
        )
    }
}

impl Debug for OverrideValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideValue")
            .field("id", &self.id())
            .field("use_input", &self.use_input())
            .field("tolerate_missing", &self.tolerate_missing())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::hash::{Hash, Hasher};
    use std::hash::DefaultHasher;

    use super::OverrideValue;
    use crate::{OptBool, OverrideConfig};

    const EMPTY: OverrideValue = OverrideValue::EMPTY;

    fn hash_of(value: &OverrideValue) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn empty() {
        let empty = OverrideValue::empty();
        assert_eq!(empty.id(), None);
        assert_eq!(empty.use_input(), OptBool::Unset);
        assert!(empty.will_use_input(true));
        assert!(!empty.will_use_input(false));

        let constructed = OverrideValue::construct(None, OptBool::Unset, OptBool::Unset);
        assert!(constructed.ptr_eq(&empty));
        // "" is coerced to unset.
        let blank = OverrideValue::construct(Some(""), OptBool::Unset, OptBool::Unset);
        assert!(blank.ptr_eq(&empty));
        assert!(OverrideValue::for_id("").is_empty());
    }

    #[test]
    fn from_config() {
        assert!(OverrideValue::from_config(None).ptr_eq(&EMPTY));

        let config = OverrideConfig::new("inject")
            .with_use_input(OptBool::False)
            .with_tolerate_missing(OptBool::False);
        let v = OverrideValue::from(&config);
        assert_eq!(v.id(), Some("inject"));
        assert_eq!(v.use_input(), OptBool::False);
        assert_eq!(
            v.to_string(),
            "OverrideValue(id=inject,useInput=false,tolerateMissing=false)"
        );
        assert_ne!(v, EMPTY);
        assert_ne!(EMPTY, v);

        let vanilla = OverrideValue::from(&OverrideConfig::DEFAULT);
        assert!(vanilla.ptr_eq(&EMPTY));

        let tolerant = OverrideConfig::DEFAULT.with_tolerate_missing(OptBool::True);
        assert_eq!(
            OverrideValue::from(&tolerant),
            OverrideValue::construct(None, OptBool::Unset, OptBool::True)
        );
    }

    #[test]
    fn std_methods() {
        assert_eq!(
            EMPTY.to_string(),
            "OverrideValue(id=null,useInput=null,tolerateMissing=null)"
        );
        assert_ne!(hash_of(&EMPTY), 0);
        assert_eq!(EMPTY, EMPTY);

        let t = OptBool::True;
        let f = OptBool::False;
        let u = OptBool::Unset;

        let equals1 = OverrideValue::construct(Some("value"), t, t);
        let equals2 = OverrideValue::construct(Some("value"), t, t);
        assert!(!equals1.ptr_eq(&equals2));
        assert_eq!(equals1, equals2);
        assert_eq!(hash_of(&equals1), hash_of(&equals2));

        assert_ne!(equals1, OverrideValue::construct(None, t, t));
        assert_ne!(equals1, OverrideValue::construct(Some("value"), u, t));
        assert_ne!(equals1, OverrideValue::construct(Some("value"), t, u));
        assert_ne!(equals1, OverrideValue::construct(Some("not equal"), t, t));
        assert_ne!(equals1, OverrideValue::construct(Some("value"), f, t));
        assert_ne!(equals1, OverrideValue::construct(Some("value"), t, f));

        // Presence matters: unset and `false` hash apart.
        let unset = OverrideValue::construct(Some("value"), u, t);
        let off = OverrideValue::construct(Some("value"), f, t);
        assert_ne!(hash_of(&unset), hash_of(&off));
    }

    #[test]
    fn factories() {
        let v = EMPTY.with_id(Some("name"));
        assert!(!v.ptr_eq(&EMPTY));
        assert_eq!(v.id(), Some("name"));
        assert!(v.with_id(Some("name")).ptr_eq(&v));
        assert!(v.with_id(v.id()).ptr_eq(&v));
        assert!(EMPTY.with_id(None).ptr_eq(&EMPTY));

        let v2 = v.with_use_input(true);
        assert!(!v2.ptr_eq(&v));
        assert_ne!(v, v2);
        assert_ne!(v2, v);
        assert!(v2.with_use_input(true).ptr_eq(&v2));

        let v3 = v.with_tolerate_missing(OptBool::True);
        assert!(!v3.ptr_eq(&v));
        assert_ne!(v, v3);
        assert_ne!(v3, v);
        assert!(v3.with_tolerate_missing(true).ptr_eq(&v3));
        assert!(v3.will_tolerate_missing(false));

        assert_ne!(hash_of(&v2), 0);
    }

    #[test]
    fn back_to_empty() {
        let v = OverrideValue::for_id("x");
        assert!(v.with_id(None).ptr_eq(&EMPTY));
        assert!(v.with_id(Some("")).ptr_eq(&EMPTY));

        let flag = EMPTY.with_use_input(false);
        assert!(flag.with_use_input(OptBool::Unset).ptr_eq(&EMPTY));
    }

    #[test]
    fn overrides() {
        let base = OverrideValue::construct(Some("db"), OptBool::True, OptBool::Unset);
        assert!(base.with_overrides(&EMPTY).ptr_eq(&base));
        assert!(base.with_overrides(&OverrideValue::for_id("db")).ptr_eq(&base));

        let merged = base.with_overrides(
            &OverrideValue::construct(None, OptBool::False, OptBool::True),
        );
        assert_eq!(merged.id(), Some("db"));
        assert_eq!(merged.use_input(), OptBool::False);
        assert_eq!(merged.tolerate_missing(), OptBool::True);

        assert!(EMPTY.with_overrides(&EMPTY).ptr_eq(&EMPTY));
        assert_eq!(EMPTY.with_overrides(&base), base);
    }
}
