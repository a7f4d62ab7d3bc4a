use tracing::{info, warn};

use crate::domain::{TransactionDraft, TransactionKind};
use crate::errors::BooksError;
use crate::interchange;
use crate::ledger::{Books, Totals, STORAGE_KEY};
use crate::storage::KeyValueStore;

/// Facade that owns the in-memory ledger and mirrors every mutation back
/// into the persisted slot.
///
/// The store is loaded once at construction; afterwards the in-memory
/// document is the single source of truth and the slot is write-through
/// only. A failed write-through is logged and retried on the next mutation,
/// never surfaced.
pub struct BooksManager {
    books: Books,
    storage: Box<dyn KeyValueStore>,
    key: String,
}

impl BooksManager {
    /// Loads the persisted document, falling back to the built-in defaults
    /// when the slot is empty or unparseable. Read anomalies are recovered
    /// here and never reach the caller.
    pub fn open(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let books = match storage.load(&key) {
            Ok(Some(text)) => match serde_json::from_str::<Books>(&text) {
                Ok(document) => Books::from_document(document),
                Err(err) => {
                    warn!(%key, "persisted document unreadable, starting fresh: {err}");
                    Books::new()
                }
            },
            Ok(None) => Books::new(),
            Err(err) => {
                warn!(%key, "persisted slot unavailable, starting fresh: {err}");
                Books::new()
            }
        };
        Self {
            books,
            storage,
            key,
        }
    }

    pub fn open_default(storage: Box<dyn KeyValueStore>) -> Self {
        Self::open(storage, STORAGE_KEY)
    }

    pub fn books(&self) -> &Books {
        &self.books
    }

    pub fn totals(&self) -> Totals {
        self.books.totals()
    }

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> String {
        let id = self.books.add_transaction(draft);
        self.persist();
        id
    }

    pub fn remove_transaction(&mut self, id: &str) -> bool {
        let removed = self.books.remove_transaction(id);
        self.persist();
        removed
    }

    pub fn add_project(&mut self, name: impl Into<String>) -> String {
        let id = self.books.add_project(name);
        self.persist();
        id
    }

    pub fn remove_project(&mut self, id: &str) -> bool {
        let removed = self.books.remove_project(id);
        self.persist();
        removed
    }

    pub fn add_category(&mut self, name: impl Into<String>, kind: TransactionKind) {
        self.books.add_category(name, kind);
        self.persist();
    }

    pub fn remove_category(&mut self, name: &str, kind: TransactionKind) -> bool {
        let removed = self.books.remove_category(name, kind);
        self.persist();
        removed
    }

    pub fn replace_all(&mut self, document: Books) {
        self.books.replace_all(document);
        self.persist();
    }

    /// Serializes the current document to interchange text.
    pub fn export_csv(&self) -> String {
        interchange::export_csv(&self.books)
    }

    /// Full-document restore from interchange text. Whole-document decode
    /// failures abort before any state changes; on success the imported row
    /// count is returned.
    pub fn import_csv(&mut self, text: &str) -> Result<usize, BooksError> {
        let document = interchange::import_csv(text)?;
        let count = document.transactions.len();
        self.replace_all(document);
        info!(count, "import: documento restaurado");
        Ok(count)
    }

    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.books) {
            Ok(json) => json,
            Err(err) => {
                warn!("write-through skipped, document not serializable: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.save(&self.key, &encoded) {
            warn!(key = %self.key, "write-through failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn draft(kind: TransactionKind, amount: f64) -> TransactionDraft {
        TransactionDraft {
            date: "2024-02-10".into(),
            description: String::new(),
            amount,
            kind,
            category: "Otros".into(),
            project_id: "gen".into(),
        }
    }

    #[test]
    fn mutations_write_through_to_the_slot() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let mut manager = BooksManager::open_default(Box::new(store.clone()));
        manager.add_transaction(draft(TransactionKind::Income, 10.0));

        let slot = store.load(STORAGE_KEY).unwrap().expect("slot written");
        assert!(slot.contains("INCOME"));

        let reopened = BooksManager::open_default(Box::new(store));
        assert_eq!(reopened.books().transactions.len(), 1);
    }

    #[test]
    fn unparseable_slot_recovers_to_defaults() {
        let store = MemoryStore::new();
        store.save(STORAGE_KEY, "{not json").unwrap();
        let manager = BooksManager::open_default(Box::new(store));
        assert!(manager.books().transactions.is_empty());
        assert_eq!(manager.books().projects.len(), 3);
    }

    #[test]
    fn import_failure_leaves_state_untouched() {
        let mut manager = BooksManager::open_default(Box::new(MemoryStore::new()));
        manager.add_transaction(draft(TransactionKind::Expense, 5.0));
        let err = manager.import_csv("solo una línea").unwrap_err();
        assert!(matches!(err, BooksError::InvalidFormat));
        assert_eq!(manager.books().transactions.len(), 1);
    }
}
