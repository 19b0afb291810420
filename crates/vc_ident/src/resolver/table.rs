use hashbrown::hash_map::Entry;

use crate::key::IdentityKey;
use crate::{Bound, ConflictError, FixedHashState, HashMap};

/// Key to object storage shared by the resolver strategies.
#[derive(Default)]
pub(super) struct BindingTable {
    items: HashMap<IdentityKey, Bound>,
}

impl BindingTable {
    pub const fn new() -> Self {
        Self {
            items: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Check and insert in one step.
    pub fn bind(&mut self, key: IdentityKey, value: Bound) -> Result<(), ConflictError> {
        match self.items.entry(key) {
            Entry::Vacant(entry) => {
                log::trace!("bind object id {}", entry.key());
                entry.insert(value);
                Ok(())
            }
            Entry::Occupied(entry) => {
                if entry.get().same_as(&value) {
                    return Ok(());
                }
                let err = ConflictError {
                    key: entry.key().clone(),
                    existing: entry.get().describe(),
                    incoming: value.describe(),
                };
                log::warn!("{err}");
                Err(err)
            }
        }
    }

    #[inline]
    pub fn get(&self, key: &IdentityKey) -> Option<Bound> {
        self.items.get(key).cloned()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
