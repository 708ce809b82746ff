use std::fmt;

/// An opaque token referring to data owned outside the table.
///
/// The table stores handles verbatim and never dereferences or frees what
/// they refer to. Mapping a handle back to its data is up to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(pub u64);

/// The value half of a (key, value) pair.
///
/// A value is either a small integer stored directly in the table, such as
/// a tally, or a [`Handle`] to externally owned data. The table only copies
/// values around and hands them back unchanged.
///
/// # Examples
///
/// ```
/// use symtab::{Handle, Value};
///
/// let count = Value::from(3);
/// assert_eq!(count.as_word(), Some(3));
/// assert_eq!(count.as_handle(), None);
///
/// let data = Value::from(Handle(7));
/// assert_eq!(data.as_handle(), Some(Handle(7)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    /// An integer stored in place.
    Word(u64),
    /// A reference to caller-owned data.
    Handle(Handle),
}

impl Value {
    /// Returns the integer if this is a [`Value::Word`].
    #[inline]
    pub fn as_word(self) -> Option<u64> {
        match self {
            Value::Word(word) => Some(word),
            Value::Handle(_) => None,
        }
    }

    /// Returns the handle if this is a [`Value::Handle`].
    #[inline]
    pub fn as_handle(self) -> Option<Handle> {
        match self {
            Value::Handle(handle) => Some(handle),
            Value::Word(_) => None,
        }
    }
}

impl From<u64> for Value {
    fn from(word: u64) -> Value {
        Value::Word(word)
    }
}

impl From<Handle> for Value {
    fn from(handle: Handle) -> Value {
        Value::Handle(handle)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Word(word) => write!(f, "{word}"),
            Value::Handle(Handle(id)) => write!(f, "#{id}"),
        }
    }
}
