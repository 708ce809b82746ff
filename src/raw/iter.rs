use std::iter::FusedIterator;

use super::alloc::EntryId;
use super::RawTable;
use crate::value::Value;

// A position in the enumeration order of a table: bucket index ascending,
// then chain order within a bucket.
//
// A position holds no reference to the table, so it is only meaningful
// against the table (and generation) it was created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    bucket: usize,
    // `None` once every entry has been yielded.
    entry: Option<EntryId>,
}

impl Position {
    // Positions at the first entry of the first non-empty bucket.
    pub fn first(table: &RawTable) -> Position {
        Position::seek(table, 0)
    }

    // Finds the first non-empty bucket at or after `from`.
    fn seek(table: &RawTable, from: usize) -> Position {
        (from..table.capacity())
            .find_map(|bucket| {
                table.head(bucket).map(|head| Position {
                    bucket,
                    entry: Some(head),
                })
            })
            .unwrap_or(Position {
                bucket: table.capacity(),
                entry: None,
            })
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.entry.is_none()
    }

    // Yields the pair under the position and moves past it.
    //
    // Once exhausted this keeps returning `None`.
    pub fn advance<'t>(&mut self, table: &'t RawTable) -> Option<(&'t str, Value)> {
        let entry = table.entry(self.entry?);

        *self = match entry.next {
            Some(next) => Position {
                bucket: self.bucket,
                entry: Some(next),
            },
            None => Position::seek(table, self.bucket + 1),
        };

        Some((&*entry.key, entry.value))
    }
}

// An iterator over the pairs of a borrowed table.
pub struct Iter<'t> {
    table: &'t RawTable,
    position: Position,
    remaining: usize,
}

impl<'t> Iter<'t> {
    pub fn new(table: &'t RawTable) -> Iter<'t> {
        Iter {
            table,
            position: Position::first(table),
            remaining: table.len(),
        }
    }
}

impl<'t> Iterator for Iter<'t> {
    type Item = (&'t str, Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.position.advance(self.table)?;
        self.remaining -= 1;
        Some(pair)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl Clone for Iter<'_> {
    fn clone(&self) -> Self {
        Iter {
            table: self.table,
            position: self.position,
            remaining: self.remaining,
        }
    }
}
