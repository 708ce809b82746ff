#![doc = include_str!("../README.md")]

mod error;
mod map;
mod raw;
mod value;

pub use error::Error;
pub use map::{Cursor, Iter, LookupMode, SymbolTable, SymbolTableBuilder, DEFAULT_CAPACITY};
pub use raw::symbol_hash;
pub use value::{Handle, Value};
