use std::collections::TryReserveError;

use crate::value::Value;

// A stable index into the entry arena.
//
// Entries are never removed individually, so an id stays valid for the
// lifetime of the table that handed it out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryId(usize);

impl EntryId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

// An entry in a bucket chain.
#[derive(Debug)]
pub struct Entry {
    // The owned copy of the key.
    pub key: Box<str>,
    pub value: Value,
    // The next entry in the chain, greater than this one.
    pub next: Option<EntryId>,
}

// Owns every entry of a table.
#[derive(Debug, Default)]
pub struct Arena {
    entries: Vec<Entry>,
}

impl Arena {
    // Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn get(&self, id: EntryId) -> &Entry {
        &self.entries[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntryId) -> &mut Entry {
        &mut self.entries[id.index()]
    }

    // Copies `key` into owned storage and reserves an arena slot for it.
    //
    // Nothing is written to the arena until the returned `Vacant` is filled,
    // so a failure here leaves the table untouched.
    pub fn reserve(&mut self, key: &str) -> Result<Vacant<'_>, TryReserveError> {
        let mut owned = String::new();
        owned.try_reserve_exact(key.len())?;
        owned.push_str(key);

        self.entries.try_reserve(1)?;

        Ok(Vacant {
            arena: self,
            key: owned.into_boxed_str(),
        })
    }

    // Frees every entry and the arena's storage, returning how many entries
    // were released.
    pub fn release(&mut self) -> usize {
        std::mem::take(&mut self.entries).len()
    }
}

// A reserved but not yet linked arena slot.
pub struct Vacant<'a> {
    arena: &'a mut Arena,
    key: Box<str>,
}

impl Vacant<'_> {
    // Writes the entry into its reserved slot. Capacity was reserved up
    // front, so this never allocates.
    pub fn insert(self, value: Value, next: Option<EntryId>) -> EntryId {
        let id = EntryId(self.arena.entries.len());
        self.arena.entries.push(Entry {
            key: self.key,
            value,
            next,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_insertion_order() {
        let mut arena = Arena::default();
        let a = arena.reserve("a").unwrap().insert(Value::Word(0), None);
        let b = arena.reserve("b").unwrap().insert(Value::Word(0), None);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
    }

    #[test]
    fn reserve_then_insert() {
        let mut arena = Arena::default();
        let id = arena.reserve("apple").unwrap().insert(Value::Word(1), None);
        assert_eq!(arena.len(), 1);
        assert_eq!(&*arena.get(id).key, "apple");
        assert_eq!(arena.get(id).value, Value::Word(1));
    }

    #[test]
    fn dropped_reservation_leaves_arena_unchanged() {
        let mut arena = Arena::default();
        drop(arena.reserve("apple").unwrap());
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.release(), 0);
    }
}
