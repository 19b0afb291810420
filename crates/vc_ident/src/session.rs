use core::fmt::{Debug, Display};
use core::hash::Hash;
use core::num::NonZeroU64;
use core::sync::atomic::{AtomicU64, Ordering};

// -----------------------------------------------------------------------------
// SessionId

/// Identifies one encode or decode session.
///
/// Resolvers and generators created for a session keep the id that
/// created them, which makes stale state easy to spot in diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionId(NonZeroU64);

impl SessionId {
    /// Creates a new `SessionId` with the given raw value.
    #[inline]
    pub const fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// Returns the raw value of this id.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl Hash for SessionId {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.get());
    }
}

impl Debug for SessionId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for SessionId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<SessionId> for u64 {
    #[inline]
    fn from(value: SessionId) -> Self {
        value.0.get()
    }
}

// -----------------------------------------------------------------------------
// SessionIdAllocator

/// A thread-safe allocator for [`SessionId`]s.
///
/// # Examples
///
/// ```
/// use vc_ident::SessionIdAllocator;
/// use vc_ident::resolver::{IdResolver, SimpleIdResolver};
///
/// static SESSIONS: SessionIdAllocator = SessionIdAllocator::new();
///
/// let template = SimpleIdResolver::new(SESSIONS.alloc());
/// let resolver = template.new_for_deserialization(SESSIONS.alloc());
/// assert!(resolver.is_empty());
/// ```
///
/// # Panics
///
/// The allocator panics if more than `u64::MAX - 1` sessions are
/// started in a single program execution.
#[derive(Debug, Default)]
pub struct SessionIdAllocator {
    next: AtomicU64,
}

impl SessionIdAllocator {
    /// Creates a new allocator starting from id `1`.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Returns the number of ids that have been allocated.
    pub fn count(&self) -> u64 {
        self.next.load(Ordering::Relaxed).saturating_sub(1)
    }

    /// Allocates a new unique [`SessionId`].
    pub fn alloc(&self) -> SessionId {
        let next = self.next.fetch_add(1, Ordering::Relaxed);
        match NonZeroU64::new(next) {
            Some(id) if next < u64::MAX => SessionId(id),
            _ => panic!("too many sessions"),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::SessionIdAllocator;

    #[test]
    fn alloc() {
        let allocator = SessionIdAllocator::new();
        assert_eq!(allocator.alloc().get(), 1);
        assert_eq!(allocator.alloc().get(), 2);
        assert_eq!(allocator.alloc().get(), 3);
        assert_eq!(allocator.count(), 3);
    }
}
