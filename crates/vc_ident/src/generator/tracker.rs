use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::generator::IdGenerator;
use crate::key::{IdentityKey, RefId};
use crate::{FixedHashState, HashMap, SessionId};

// -----------------------------------------------------------------------------
// Tracked

/// How a tracked object should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tracked {
    /// First appearance: write the object by value, tagged with the key.
    First(IdentityKey),
    /// Seen before in this session: write only the key.
    BackRef(IdentityKey),
}

impl Tracked {
    #[inline]
    pub const fn key(&self) -> &IdentityKey {
        match self {
            Tracked::First(key) | Tracked::BackRef(key) => key,
        }
    }

    #[inline]
    pub const fn is_first(&self) -> bool {
        matches!(self, Tracked::First(_))
    }
}

// -----------------------------------------------------------------------------
// IdTracker

/// First-seen bookkeeping for one encode session.
///
/// Objects are recognized by reference identity: the same allocation
/// always maps to the key it was given first, regardless of the strategy.
/// Every tracked allocation is kept alive until the tracker is dropped, so
/// an address can not be reused by another object within the session.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_ident::SessionIdAllocator;
/// use vc_ident::generator::{IdTracker, SequenceIdGenerator, Tracked};
///
/// let sessions = SessionIdAllocator::new();
/// let template = SequenceIdGenerator::<String>::new();
/// let mut tracker = IdTracker::new(&template, sessions.alloc());
///
/// let shared = Arc::new(String::from("shared"));
/// let first = tracker.track(&shared).unwrap();
/// let again = tracker.track(&shared).unwrap();
///
/// assert!(first.is_first());
/// assert_eq!(again, Tracked::BackRef(first.key().clone()));
/// ```
pub struct IdTracker<G> {
    session: SessionId,
    generator: G,
    seen: HashMap<RefId, IdentityKey>,
    pinned: Vec<Box<dyn Any + Send + Sync>>,
}

impl<G> IdTracker<G> {
    /// Starts tracking for `session` with a per-session copy of `template`.
    pub fn new<T: ?Sized>(template: &G, session: SessionId) -> Self
    where
        G: IdGenerator<T>,
    {
        log::debug!("start object id tracking for session {session}");
        Self {
            session,
            generator: template.new_for_serialization(session),
            seen: HashMap::with_hasher(FixedHashState),
            pinned: Vec::new(),
        }
    }

    /// Decides how `value` is written.
    ///
    /// Returns `None` if the generator does not track `value`; such values
    /// are written by value every time.
    pub fn track<T>(&mut self, value: &Arc<T>) -> Option<Tracked>
    where
        T: ?Sized + Send + Sync + 'static,
        G: IdGenerator<T>,
    {
        let ref_id = RefId::of_arc(value);
        if let Some(key) = self.seen.get(&ref_id) {
            return Some(Tracked::BackRef(key.clone()));
        }

        let key = self.generator.generate_id(&**value)?;
        self.seen.insert(ref_id, key.clone());
        self.pinned.push(Box::new(Arc::clone(value)));
        Some(Tracked::First(key))
    }

    #[inline]
    pub const fn session(&self) -> SessionId {
        self.session
    }

    /// The per-session generator.
    #[inline]
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Number of tracked objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl<G: fmt::Debug> fmt::Debug for IdTracker<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdTracker")
            .field("session", &self.session)
            .field("generator", &self.generator)
            .field("len", &self.seen.len())
            .field("pinned", &self.pinned.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
