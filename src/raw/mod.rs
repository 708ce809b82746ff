mod alloc;
mod hash;
mod iter;

use std::sync::atomic::{AtomicU64, Ordering};

use self::alloc::{Arena, Entry, EntryId};
use crate::error::Error;
use crate::value::Value;

pub use self::hash::symbol_hash;
pub use self::iter::{Iter, Position};

// Source of table identities, used to tie cursors to the table they came from.
static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(0);

// A fixed-capacity hash table with sorted, separately chained buckets.
pub struct RawTable {
    // The head of each bucket's chain. Never resized.
    buckets: Box<[Option<EntryId>]>,
    // Owns every entry reachable from `buckets`.
    arena: Arena,
    // Bumped by every successful mutation.
    generation: u64,
    // Unique for the lifetime of the process.
    id: u64,
}

// The result of scanning a chain for a key.
struct Slot {
    // The last entry whose key is less than the candidate.
    prev: Option<EntryId>,
    // The first entry whose key is greater than or equal to the candidate.
    next: Option<EntryId>,
}

impl RawTable {
    pub fn new(capacity: usize) -> Result<RawTable, Error> {
        if capacity < 1 {
            return Err(Error::InvalidCapacity(capacity));
        }

        let mut buckets = Vec::new();
        buckets.try_reserve_exact(capacity)?;
        buckets.resize(capacity, None);

        let table = RawTable {
            buckets: buckets.into_boxed_slice(),
            arena: Arena::default(),
            generation: 0,
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
        };

        log::debug!("created symbol table {} with {} buckets", table.id, capacity);
        Ok(table)
    }

    // The number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    // The number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn bucket(&self, key: &str) -> usize {
        hash::bucket(key, self.capacity())
    }

    // Returns the first entry of a bucket's chain.
    #[inline]
    pub fn head(&self, bucket: usize) -> Option<EntryId> {
        self.buckets[bucket]
    }

    #[inline]
    pub fn entry(&self, id: EntryId) -> &Entry {
        self.arena.get(id)
    }

    // Returns the number of entries chained in a bucket.
    pub fn chain_len(&self, bucket: usize) -> usize {
        let mut len = 0;
        let mut next = self.head(bucket);
        while let Some(id) = next {
            len += 1;
            next = self.entry(id).next;
        }
        len
    }

    // Walks a chain while `key` is greater than the current entry's key.
    fn search(&self, bucket: usize, key: &str) -> Slot {
        let mut prev = None;
        let mut next = self.head(bucket);

        while let Some(id) = next {
            let entry = self.entry(id);
            if key <= &*entry.key {
                break;
            }
            prev = Some(id);
            next = entry.next;
        }

        Slot { prev, next }
    }

    // Inserts a pair, or overwrites the value of an existing key.
    //
    // Returns the previous value if the key was already present.
    pub fn install(&mut self, key: &str, value: Value) -> Result<Option<Value>, Error> {
        let bucket = self.bucket(key);
        let Slot { prev, next } = self.search(bucket, key);

        // the key already exists, update it in place
        if let Some(id) = next {
            let entry = self.arena.get_mut(id);
            if &*entry.key == key {
                let old = std::mem::replace(&mut entry.value, value);
                self.generation += 1;
                log::trace!("updated {key:?} in bucket {bucket}");
                return Ok(Some(old));
            }
        }

        // reserve everything up front so a failure cannot leave a partial entry
        let vacant = self.arena.reserve(key)?;
        let id = vacant.insert(value, next);

        match prev {
            // new head, of either an empty or a non-empty chain
            None => self.buckets[bucket] = Some(id),
            // new tail or interior entry
            Some(prev) => self.arena.get_mut(prev).next = Some(id),
        }

        self.generation += 1;
        log::trace!("installed {key:?} in bucket {bucket}");
        Ok(None)
    }

    // Returns the value for `key`, scanning its whole chain.
    pub fn get(&self, key: &str) -> Option<Value> {
        let Slot { next, .. } = self.search(self.bucket(key), key);
        let entry = self.entry(next?);
        (&*entry.key == key).then_some(entry.value)
    }

    // Returns the value for `key` only if it sits at the head of its chain.
    pub fn get_head(&self, key: &str) -> Option<Value> {
        let entry = self.entry(self.head(self.bucket(key))?);
        (&*entry.key == key).then_some(entry.value)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    // Releases every entry, returning how many were freed.
    //
    // Each bucket in `0..capacity` is visited once and its chain is
    // followed to the end, unlinking entries as it goes.
    pub fn teardown(&mut self) -> usize {
        let mut unlinked = 0;

        for bucket in 0..self.capacity() {
            let mut next = self.buckets[bucket].take();
            while let Some(id) = next {
                next = self.arena.get_mut(id).next.take();
                unlinked += 1;
            }
        }

        let released = self.arena.release();
        debug_assert_eq!(unlinked, released, "arena held unreachable entries");

        if released > 0 {
            self.generation += 1;
            log::debug!("released {} entries from symbol table {}", released, self.id);
        }

        released
    }
}

impl Drop for RawTable {
    fn drop(&mut self) {
        self.teardown();
    }
}
