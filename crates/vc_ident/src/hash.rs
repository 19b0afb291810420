//! Deterministic hashing for identity tables.
//!
//! Keys are hashed with `foldhash` under a fixed seed, so two resolvers in
//! one process always agree on the hash of an [`IdentityKey`].
//!
//! [`IdentityKey`]: crate::key::IdentityKey

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

/// Seed shared by every identity table.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6A09E667F3BCC908);

/// Fixed-seed build hasher based on [`foldhash`].
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_ident::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one("key1"), FixedHashState.hash_one("key1"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;
