use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use symtab::{Error, SymbolTable, Value};

// Fails allocations on the current thread once its budget runs out.
struct Budgeted;

thread_local! {
    // `None` means unlimited.
    static BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
}

// Returns `false` if the allocation should fail.
fn take_budget() -> bool {
    BUDGET
        .try_with(|budget| match budget.get() {
            None => true,
            Some(0) => false,
            Some(n) => {
                budget.set(Some(n - 1));
                true
            }
        })
        .unwrap_or(true)
}

unsafe impl GlobalAlloc for Budgeted {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if !take_budget() {
            return std::ptr::null_mut();
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if !take_budget() {
            return std::ptr::null_mut();
        }
        System.realloc(ptr, layout, new_size)
    }
}

#[global_allocator]
static ALLOC: Budgeted = Budgeted;

// Runs `f` with at most `allocations` successful allocations on this thread.
fn with_budget<T>(allocations: usize, f: impl FnOnce() -> T) -> T {
    BUDGET.with(|budget| budget.set(Some(allocations)));
    let result = f();
    BUDGET.with(|budget| budget.set(None));
    result
}

fn pairs(table: &SymbolTable) -> Vec<(String, Value)> {
    table
        .iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

#[test]
fn key_copy_failure() {
    let mut table = SymbolTable::new(1).unwrap();
    table.install("a", Value::Word(1)).unwrap();
    table.install("c", Value::Word(3)).unwrap();
    let before = pairs(&table);

    let result = with_budget(0, || table.install("b", Value::Word(2)));
    assert!(matches!(result, Err(Error::Alloc(_))), "{result:?}");

    assert_eq!(table.len(), 2);
    assert_eq!(table.chain_len(0), 2);
    assert_eq!(pairs(&table), before);
    assert_eq!(table.lookup("b"), None);

    // the table still works once memory is available
    table.install("b", Value::Word(2)).unwrap();
    let keys: Vec<_> = table.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["a", "b", "c"]);
}

#[test]
fn entry_slot_failure() {
    let mut table = SymbolTable::new(1).unwrap();
    // fill the arena's first allocation so the next entry must grow it
    for key in ["a", "c", "e", "g"] {
        table.install(key, Value::Word(0)).unwrap();
    }
    let before = pairs(&table);

    // the key copy succeeds, growing the arena does not
    let result = with_budget(1, || table.install("b", Value::Word(2)));
    assert!(matches!(result, Err(Error::Alloc(_))), "{result:?}");

    assert_eq!(table.len(), 4);
    assert_eq!(pairs(&table), before);
}

#[test]
fn update_needs_no_memory() {
    let mut table = SymbolTable::new(1).unwrap();
    table.install("a", Value::Word(1)).unwrap();
    table.install("c", Value::Word(3)).unwrap();

    let old = with_budget(0, || table.install("c", Value::Word(4)));
    assert_eq!(old, Ok(Some(Value::Word(3))));
    assert_eq!(table.lookup("c"), Some(Value::Word(4)));
}

#[test]
fn bucket_array_failure() {
    let result = with_budget(0, || SymbolTable::new(64).map(|table| table.capacity()));
    assert!(matches!(result, Err(Error::Alloc(_))), "{result:?}");
}
