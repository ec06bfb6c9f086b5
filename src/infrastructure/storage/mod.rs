//! Row store traits and implementations

mod memory;
pub mod row;
mod traits;

pub use memory::InMemoryRowStore;
pub use row::{nullable_int, nullable_text, Filter, Key, Row, TableSpec, Value};
pub use traits::{RowStore, SharedRowStore, StoreError, StoreResult};
