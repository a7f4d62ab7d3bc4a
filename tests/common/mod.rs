#![allow(dead_code)] // not every suite uses every fixture

use obra_core::domain::{TransactionDraft, TransactionKind};
use obra_core::ledger::Books;

/// Builds a draft with sensible defaults for the fields a test ignores.
pub fn draft(date: &str, amount: f64, kind: TransactionKind, project: &str) -> TransactionDraft {
    TransactionDraft {
        date: date.into(),
        description: String::new(),
        amount,
        kind,
        category: match kind {
            TransactionKind::Expense => "Herramientas".into(),
            TransactionKind::Income => "Anticipo Cliente".into(),
        },
        project_id: project.into(),
    }
}

/// A ledger with a handful of booked movements across two projects.
pub fn populated_books() -> Books {
    let mut books = Books::new();
    books.add_transaction(draft("2024-01-03", 100.0, TransactionKind::Expense, "p1"));
    books.add_transaction(draft("2024-01-01", 50.0, TransactionKind::Income, "p1"));
    books.add_transaction(draft("2024-01-01", 20.0, TransactionKind::Expense, "p2"));
    books
}
