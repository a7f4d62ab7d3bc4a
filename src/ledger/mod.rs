//! The transaction ledger: aggregate document, store operations, defaults.

pub mod books;
pub mod defaults;

pub use books::{Books, Totals};
pub use defaults::{NO_PROJECT_LABEL, STORAGE_KEY};
