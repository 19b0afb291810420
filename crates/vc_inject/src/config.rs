use crate::OptBool;

// -----------------------------------------------------------------------------
// OverrideConfig

/// Statically declared override settings for one property.
///
/// This is what a property registration carries; turn it into an
/// [`OverrideValue`] with [`OverrideValue::from_config`]. An empty `id`
/// means "no id".
///
/// # Examples
///
/// ```
/// use vc_inject::{OptBool, OverrideConfig, OverrideValue};
///
/// const CONFIG: OverrideConfig = OverrideConfig::new("inject")
///     .with_use_input(OptBool::False)
///     .with_tolerate_missing(OptBool::False);
///
/// let value = OverrideValue::from(&CONFIG);
/// assert_eq!(value.id(), Some("inject"));
/// ```
///
/// [`OverrideValue`]: crate::OverrideValue
/// [`OverrideValue::from_config`]: crate::OverrideValue::from_config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverrideConfig {
    pub id: &'static str,
    pub use_input: OptBool,
    pub tolerate_missing: OptBool,
}

impl OverrideConfig {
    /// No id, every flag unset.
    pub const DEFAULT: Self = Self::new("");

    #[inline]
    pub const fn new(id: &'static str) -> Self {
        Self {
            id,
            use_input: OptBool::Unset,
            tolerate_missing: OptBool::Unset,
        }
    }

    #[inline]
    pub const fn with_use_input(mut self, use_input: OptBool) -> Self {
        self.use_input = use_input;
        self
    }

    #[inline]
    pub const fn with_tolerate_missing(mut self, tolerate_missing: OptBool) -> Self {
        self.tolerate_missing = tolerate_missing;
        self
    }
}

impl Default for OverrideConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
