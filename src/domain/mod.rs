pub mod common;
pub mod project;
pub mod transaction;

pub use common::{Displayable, Identifiable, NamedEntity};
pub use project::Project;
pub use transaction::{parse_entry_date, Transaction, TransactionDraft, TransactionKind};
