//! Per-packet mapping from option kind to its decoded record.

use crate::field::{self, Field};

/// Location of one decoded option within its region.
///
/// Offsets fit in a byte because a region never exceeds
/// [`field::MAX_OPTIONS_LEN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    length: u8,
    start: u8,
    end: u8,
}

impl Slot {
    fn payload(&self) -> Field {
        self.start as usize..self.end as usize
    }
}

/// Decoded options keyed by kind, at most one record per kind.
///
/// Records hold the total on-wire length and the payload position within
/// the region they were decoded from; a store only makes sense alongside
/// that exact buffer. If a kind occurs more than once in a region the store
/// keeps the last occurrence only.
///
/// The table has a slot for each of the 256 kinds, so lookups are a single
/// index and the store never allocates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionStore {
    slots: [Option<Slot>; 256],
    count: usize,
}

impl OptionStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        OptionStore {
            slots: [None; 256],
            count: 0,
        }
    }

    /// Insert or overwrite the record for `kind`.
    pub(crate) fn insert(&mut self, kind: u8, length: u8, payload: Field) {
        debug_assert!(payload.end <= field::MAX_OPTIONS_LEN);

        let slot = &mut self.slots[kind as usize];
        if slot.is_none() {
            self.count += 1;
        }
        *slot = Some(Slot {
            length,
            start: payload.start as u8,
            end: payload.end as u8,
        });
    }

    /// Length and payload position of the record for `kind`.
    ///
    /// # Returns
    /// * `Some((length, payload))` if the kind was decoded
    /// * `None` if it was not
    pub fn get(&self, kind: u8) -> Option<(u8, Field)> {
        self.slots[kind as usize].map(|slot| (slot.length, slot.payload()))
    }

    /// Whether a record for `kind` exists.
    pub fn contains(&self, kind: u8) -> bool {
        self.slots[kind as usize].is_some()
    }

    /// Number of distinct kinds held.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        *self = OptionStore::new();
    }

    /// Iterate `(kind, length, payload)` in ascending kind order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8, Field)> + '_ {
        self.slots.iter().enumerate().filter_map(|(kind, slot)| {
            slot.map(|slot| (kind as u8, slot.length, slot.payload()))
        })
    }
}

impl Default for OptionStore {
    fn default() -> Self {
        OptionStore::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_insert_get() {
        let mut store = OptionStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get(2), None);

        store.insert(2, 4, 2..4);
        assert_eq!(store.get(2), Some((4, 2..4)));
        assert!(store.contains(2));
        assert!(!store.contains(3));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_keeps_count() {
        let mut store = OptionStore::new();
        store.insert(2, 4, 2..4);
        store.insert(2, 4, 6..8);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(2), Some((4, 6..8)));
    }

    #[test]
    fn test_store_iter_ascending() {
        let mut store = OptionStore::new();
        store.insert(8, 10, 2..10);
        store.insert(1, 0, 11..11);
        store.insert(255, 4, 13..15);
        let kinds: Vec<u8> = store.iter().map(|(kind, _, _)| kind).collect();
        assert_eq!(kinds, vec![1, 8, 255]);
    }

    #[test]
    fn test_store_clear() {
        let mut store = OptionStore::new();
        store.insert(1, 0, 1..1);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store, OptionStore::default());
    }

    #[test]
    fn test_store_is_compact() {
        // One small slot per kind, no heap.
        assert!(core::mem::size_of::<OptionStore>() <= 256 * 4 + core::mem::size_of::<usize>());
    }
}
