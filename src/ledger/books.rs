use serde::{Deserialize, Serialize};

use crate::domain::{Project, Transaction, TransactionDraft, TransactionKind};
use crate::ledger::defaults::{
    default_projects, DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES, NO_PROJECT_LABEL,
};

/// The aggregate bookkeeping document: every transaction, the project list,
/// and the two independent category registries.
///
/// Collections keep insertion order; "most recent first" displays are a view
/// concern. All operations are total; callers validate drafts before they
/// reach this layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Books {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub expense_categories: Vec<String>,
    #[serde(default)]
    pub income_categories: Vec<String>,
}

/// Derived totals, recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

impl Default for Books {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            projects: default_projects(),
            expense_categories: DEFAULT_EXPENSE_CATEGORIES.clone(),
            income_categories: DEFAULT_INCOME_CATEGORIES.clone(),
        }
    }
}

impl Books {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts an incoming document, filling empty or absent projects and
    /// registries with the built-in defaults. Shared by the initial-load
    /// path and bulk import.
    pub fn from_document(document: Books) -> Self {
        let mut books = document;
        books.normalize();
        books
    }

    fn normalize(&mut self) {
        if self.projects.is_empty() {
            self.projects = default_projects();
        }
        if self.expense_categories.is_empty() {
            self.expense_categories = DEFAULT_EXPENSE_CATEGORIES.clone();
        }
        if self.income_categories.is_empty() {
            self.income_categories = DEFAULT_INCOME_CATEGORIES.clone();
        }
    }

    /// Wholesale replacement of all collections.
    pub fn replace_all(&mut self, document: Books) {
        *self = Books::from_document(document);
    }

    /// Appends a materialized draft and returns the new transaction's id.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> String {
        let transaction = Transaction::from_draft(draft);
        let id = transaction.id.clone();
        self.transactions.push(transaction);
        id
    }

    /// Removes the transaction with the given id. Absent ids are a no-op.
    pub fn remove_transaction(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        self.transactions.len() != before
    }

    /// Creates a project and returns its id so callers can reference it
    /// immediately, e.g. to pre-select it in a pending draft.
    pub fn add_project(&mut self, name: impl Into<String>) -> String {
        let project = Project::new(name);
        let id = project.id.clone();
        self.projects.push(project);
        id
    }

    /// Removes a project. Transactions referencing it are left untouched;
    /// their lookups fall back to [`NO_PROJECT_LABEL`].
    pub fn remove_project(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|project| project.id != id);
        self.projects.len() != before
    }

    pub fn add_category(&mut self, name: impl Into<String>, kind: TransactionKind) {
        self.categories_mut(kind).push(name.into());
    }

    /// Removes every registry entry matching `name`. Transactions keep their
    /// now-registry-less category string unchanged.
    pub fn remove_category(&mut self, name: &str, kind: TransactionKind) -> bool {
        let registry = self.categories_mut(kind);
        let before = registry.len();
        registry.retain(|entry| entry != name);
        registry.len() != before
    }

    pub fn categories(&self, kind: TransactionKind) -> &[String] {
        match kind {
            TransactionKind::Expense => &self.expense_categories,
            TransactionKind::Income => &self.income_categories,
        }
    }

    fn categories_mut(&mut self, kind: TransactionKind) -> &mut Vec<String> {
        match kind {
            TransactionKind::Expense => &mut self.expense_categories,
            TransactionKind::Income => &mut self.income_categories,
        }
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Resolves a project reference to its display name, tolerating orphans.
    pub fn project_name(&self, id: &str) -> &str {
        self.project(id)
            .map(|project| project.name.as_str())
            .unwrap_or(NO_PROJECT_LABEL)
    }

    pub fn totals(&self) -> Totals {
        let sum = |kind: TransactionKind| {
            self.transactions
                .iter()
                .filter(|txn| txn.kind == kind)
                .map(|txn| txn.amount)
                .sum::<f64>()
        };
        let total_income = sum(TransactionKind::Income);
        let total_expense = sum(TransactionKind::Expense);
        Totals {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }
}
