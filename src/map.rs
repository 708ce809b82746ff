use crate::error::Error;
use crate::raw::{self, Position, RawTable};
use crate::value::Value;

use std::fmt;
use std::iter::FusedIterator;

/// The number of buckets used when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// A symbol table mapping string keys to [`Value`]s.
///
/// The table is a fixed array of buckets, chosen at creation and never
/// resized. Keys that hash to the same bucket are kept in a chain sorted by
/// key, so enumeration order is bucket index ascending, then key ascending.
///
/// Keys are copied into the table on installation. Values are opaque and
/// are never inspected.
///
/// Keys are `&str`, so they must be valid UTF-8. They are hashed and
/// compared by their UTF-8 bytes, with no normalization: `"Apple"` and
/// `"apple"` are different keys, and `"apple"` sorts before `"applé"`.
///
/// # Examples
///
/// ```
/// use symtab::{SymbolTable, Value};
///
/// let mut table = SymbolTable::new(10)?;
/// table.install("apple", Value::Word(1))?;
/// table.install("banana", Value::Word(2))?;
/// table.install("apple", Value::Word(5))?;
///
/// assert_eq!(table.lookup("apple"), Some(Value::Word(5)));
/// assert_eq!(table.len(), 2);
///
/// // keys are compared byte for byte
/// table.install("Apple", Value::Word(9))?;
/// assert_eq!(table.lookup("Apple"), Some(Value::Word(9)));
/// assert_eq!(table.lookup("apple"), Some(Value::Word(5)));
/// assert_eq!(table.lookup("applé"), None);
/// # Ok::<(), symtab::Error>(())
/// ```
pub struct SymbolTable {
    raw: RawTable,
    lookup_mode: LookupMode,
}

/// A builder for a [`SymbolTable`].
///
/// # Examples
///
/// ```rust
/// use symtab::{LookupMode, SymbolTable};
///
/// let table = SymbolTable::builder()
///     // Set the number of buckets.
///     .capacity(2048)
///     // Set how lookups search a bucket.
///     .lookup_mode(LookupMode::Chain)
///     // Construct the table.
///     .build()?;
///
/// assert_eq!(table.capacity(), 2048);
/// # Ok::<(), symtab::Error>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SymbolTableBuilder {
    capacity: usize,
    lookup_mode: LookupMode,
}

impl SymbolTableBuilder {
    /// Set the number of buckets.
    ///
    /// The capacity is fixed for the lifetime of the table. It must be at
    /// least 1, otherwise [`build`](SymbolTableBuilder::build) fails.
    pub fn capacity(self, capacity: usize) -> SymbolTableBuilder {
        SymbolTableBuilder { capacity, ..self }
    }

    /// Set how [`SymbolTable::lookup`] searches a bucket. See [`LookupMode`] for details.
    pub fn lookup_mode(self, lookup_mode: LookupMode) -> SymbolTableBuilder {
        SymbolTableBuilder {
            lookup_mode,
            ..self
        }
    }

    /// Construct a [`SymbolTable`] from the builder, using the configured options.
    ///
    /// Fails with [`Error::InvalidCapacity`] if the capacity is zero, and with
    /// [`Error::Alloc`] if the bucket array cannot be allocated.
    pub fn build(self) -> Result<SymbolTable, Error> {
        Ok(SymbolTable {
            raw: RawTable::new(self.capacity)?,
            lookup_mode: self.lookup_mode,
        })
    }
}

impl Default for SymbolTableBuilder {
    fn default() -> Self {
        SymbolTableBuilder {
            capacity: DEFAULT_CAPACITY,
            lookup_mode: LookupMode::default(),
        }
    }
}

/// How [`SymbolTable::lookup`] searches the bucket a key hashes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LookupMode {
    /// Scan the bucket's chain until the key is found or a greater key is
    /// reached.
    ///
    /// Every installed key can be looked up. This is the default.
    #[default]
    Chain,
    /// Only compare against the first entry of the bucket's chain.
    ///
    /// Lookup is a single comparison, but a key stored anywhere other than
    /// the head of its chain is reported as absent. Only suitable when
    /// chains are known to hold at most one entry, or when this exact
    /// behavior is needed for compatibility.
    HeadOnly,
}

impl SymbolTable {
    /// Creates an empty table with `capacity` buckets.
    ///
    /// Fails with [`Error::InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use symtab::{Error, SymbolTable};
    ///
    /// assert!(SymbolTable::new(16).is_ok());
    /// assert_eq!(SymbolTable::new(0).err(), Some(Error::InvalidCapacity(0)));
    /// ```
    pub fn new(capacity: usize) -> Result<SymbolTable, Error> {
        SymbolTable::builder().capacity(capacity).build()
    }

    /// Returns a builder for a `SymbolTable`.
    pub fn builder() -> SymbolTableBuilder {
        SymbolTableBuilder::default()
    }

    /// Returns the number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the number of entries in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the table holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the configured [`LookupMode`].
    #[inline]
    pub fn lookup_mode(&self) -> LookupMode {
        self.lookup_mode
    }

    /// Returns the index of the bucket `key` hashes to.
    ///
    /// The index depends only on the key and the table's capacity.
    #[inline]
    pub fn bucket_of(&self, key: &str) -> usize {
        self.raw.bucket(key)
    }

    /// Returns the number of entries chained in `bucket`.
    ///
    /// # Panics
    ///
    /// Panics if `bucket` is not less than [`capacity`](SymbolTable::capacity).
    pub fn chain_len(&self, bucket: usize) -> usize {
        self.raw.chain_len(bucket)
    }

    /// Installs a (key, value) pair.
    ///
    /// If `key` is already present its value is overwritten in place and the
    /// previous value is returned. Otherwise a copy of `key` is made and the
    /// pair is linked into its bucket at its sorted position.
    ///
    /// Fails with [`Error::Alloc`] if memory for the new entry or its key
    /// copy cannot be obtained, in which case the table is unchanged.
    ///
    /// Installing invalidates every [`Cursor`] created from this table.
    pub fn install(&mut self, key: &str, value: Value) -> Result<Option<Value>, Error> {
        self.raw.install(key, value)
    }

    /// Returns the value installed for `key`.
    ///
    /// With [`LookupMode::HeadOnly`] only keys at the head of their bucket's
    /// chain are found.
    pub fn lookup(&self, key: &str) -> Option<Value> {
        match self.lookup_mode {
            LookupMode::Chain => self.raw.get(key),
            LookupMode::HeadOnly => self.raw.get_head(key),
        }
    }

    /// Returns `true` if [`lookup`](SymbolTable::lookup) would find `key`.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Returns an iterator over the pairs in the table.
    ///
    /// Pairs are yielded in bucket order, and in ascending key order within
    /// a bucket. The iterator borrows the table, so the table cannot be
    /// modified while it is live.
    ///
    /// # Examples
    ///
    /// ```
    /// use symtab::{SymbolTable, Value};
    ///
    /// let mut table = SymbolTable::new(1)?;
    /// table.install("zebra", Value::Word(1))?;
    /// table.install("apple", Value::Word(2))?;
    ///
    /// let keys: Vec<&str> = table.iter().map(|(key, _)| key).collect();
    /// assert_eq!(keys, ["apple", "zebra"]);
    /// # Ok::<(), symtab::Error>(())
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            raw: self.raw.iter(),
        }
    }

    /// Returns a cursor over the pairs in the table.
    ///
    /// Unlike [`iter`](SymbolTable::iter), a cursor does not borrow the table;
    /// the table is passed to each [`Cursor::next`] call instead. If the table
    /// is modified after the cursor is created, the next call fails with
    /// [`Error::Modified`].
    pub fn cursor(&self) -> Cursor {
        Cursor {
            table: self.raw.id(),
            generation: self.raw.generation(),
            position: Position::first(&self.raw),
        }
    }

    /// Deletes the table, returning the number of entries released.
    ///
    /// Dropping the table does the same. Values are not inspected.
    pub fn delete(mut self) -> usize {
        self.raw.teardown()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = (&'a str, Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// An iterator over the pairs of a [`SymbolTable`].
///
/// This struct is created by the [`iter`](SymbolTable::iter) method on [`SymbolTable`].
/// See its documentation for details.
#[derive(Clone)]
pub struct Iter<'a> {
    raw: raw::Iter<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A detached cursor over the pairs of a [`SymbolTable`].
///
/// This struct is created by the [`cursor`](SymbolTable::cursor) method on
/// [`SymbolTable`]. It records which table it came from and that table's
/// state at creation, and refuses to continue if either no longer matches.
///
/// # Examples
///
/// ```
/// use symtab::{Error, SymbolTable, Value};
///
/// let mut table = SymbolTable::new(8)?;
/// table.install("apple", Value::Word(1))?;
///
/// let mut cursor = table.cursor();
/// assert_eq!(cursor.next(&table)?, Some(("apple", Value::Word(1))));
/// assert_eq!(cursor.next(&table)?, None);
///
/// let mut cursor = table.cursor();
/// table.install("banana", Value::Word(2))?;
/// assert_eq!(cursor.next(&table), Err(Error::Modified));
/// # Ok::<(), symtab::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Cursor {
    table: u64,
    generation: u64,
    position: Position,
}

impl Cursor {
    /// Returns the pair under the cursor and advances past it.
    ///
    /// Returns `Ok(None)` once every pair has been yielded, and keeps doing
    /// so on every later call.
    ///
    /// Fails with [`Error::ForeignCursor`] if `table` is not the table this
    /// cursor was created from, and with [`Error::Modified`] if the table was
    /// modified since.
    pub fn next<'t>(&mut self, table: &'t SymbolTable) -> Result<Option<(&'t str, Value)>, Error> {
        if self.position.is_exhausted() {
            return Ok(None);
        }

        if table.raw.id() != self.table {
            return Err(Error::ForeignCursor);
        }

        if table.raw.generation() != self.generation {
            log::trace!(
                "cursor invalidated: symbol table {} changed from generation {} to {}",
                self.table,
                self.generation,
                table.raw.generation()
            );
            return Err(Error::Modified);
        }

        Ok(self.position.advance(&table.raw))
    }

    /// Returns `true` once every pair has been yielded.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.position.is_exhausted()
    }
}
