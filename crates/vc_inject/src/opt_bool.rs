use core::fmt::{self, Display};

// -----------------------------------------------------------------------------
// OptBool

/// A boolean setting that may be left unset.
///
/// Unset means "use whatever default applies where the setting is read".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OptBool {
    #[default]
    Unset,
    True,
    False,
}

impl OptBool {
    #[inline]
    pub const fn is_set(self) -> bool {
        !matches!(self, OptBool::Unset)
    }

    #[inline]
    pub const fn as_option(self) -> Option<bool> {
        match self {
            OptBool::Unset => None,
            OptBool::True => Some(true),
            OptBool::False => Some(false),
        }
    }

    /// Resolves the setting, using `default` when unset.
    ///
    /// ```
    /// use vc_inject::OptBool;
    ///
    /// assert!(OptBool::Unset.as_bool_or(true));
    /// assert!(!OptBool::False.as_bool_or(true));
    /// ```
    #[inline]
    pub const fn as_bool_or(self, default: bool) -> bool {
        match self {
            OptBool::Unset => default,
            OptBool::True => true,
            OptBool::False => false,
        }
    }
}

impl From<bool> for OptBool {
    #[inline]
    fn from(value: bool) -> Self {
        if value { OptBool::True } else { OptBool::False }
    }
}

impl From<Option<bool>> for OptBool {
    #[inline]
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(v) => v.into(),
            None => OptBool::Unset,
        }
    }
}

impl From<OptBool> for Option<bool> {
    #[inline]
    fn from(value: OptBool) -> Self {
        value.as_option()
    }
}

impl Display for OptBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OptBool::Unset => "null",
            OptBool::True => "true",
            OptBool::False => "false",
        })
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::OptBool;

    #[test]
    fn conversions() {
        assert_eq!(OptBool::from(true), OptBool::True);
        assert_eq!(OptBool::from(Some(false)), OptBool::False);
        assert_eq!(OptBool::from(None), OptBool::Unset);
        assert_eq!(Option::<bool>::from(OptBool::True), Some(true));
        assert!(!OptBool::Unset.is_set());
    }

    #[test]
    fn display() {
        assert_eq!(OptBool::Unset.to_string(), "null");
        assert_eq!(OptBool::True.to_string(), "true");
        assert_eq!(OptBool::False.to_string(), "false");
    }
}
