//! Chart-ready aggregation over the transaction history.
//!
//! Everything here is a pure function of the current transaction slice and an
//! active filter; views are recomputed from scratch on every filter change.

use std::collections::BTreeMap;

use crate::domain::{parse_entry_date, Transaction, TransactionKind};

/// One dimension of the active filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    fn admits(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

/// The three filter dimensions, combined with logical AND.
///
/// Category filters are type-scoped: the expense filter only constrains
/// expense rows and the income filter only income rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartFilter {
    pub project: Selection,
    pub expense_category: Selection,
    pub income_category: Selection,
}

impl ChartFilter {
    pub fn admits(&self, transaction: &Transaction) -> bool {
        if !self.project.admits(&transaction.project_id) {
            return false;
        }
        match transaction.kind {
            TransactionKind::Expense => self.expense_category.admits(&transaction.category),
            TransactionKind::Income => self.income_category.admits(&transaction.category),
        }
    }
}

/// A `(category, total)` aggregation group. Groups with no matching
/// transactions are never emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub name: String,
    pub total: f64,
}

/// One chronological bucket keyed by the exact date string.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub income: f64,
    pub expense: f64,
}

fn filtered<'a>(
    transactions: &'a [Transaction],
    filter: &'a ChartFilter,
) -> impl Iterator<Item = &'a Transaction> {
    transactions.iter().filter(move |txn| filter.admits(txn))
}

/// Groups the filtered transactions of one kind by category and sums their
/// amounts. Emitted in name order; consumers re-sort as needed.
pub fn breakdown_by_category(
    transactions: &[Transaction],
    filter: &ChartFilter,
    kind: TransactionKind,
) -> Vec<CategorySlice> {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for txn in filtered(transactions, filter).filter(|txn| txn.kind == kind) {
        *groups.entry(txn.category.as_str()).or_insert(0.0) += txn.amount;
    }
    groups
        .into_iter()
        .map(|(name, total)| CategorySlice {
            name: name.to_string(),
            total,
        })
        .collect()
}

/// Buckets the filtered transactions by exact date string, summing income and
/// expense separately, and orders buckets ascending by parsed date value.
///
/// Two rows on the same calendar day but with differently formatted date
/// strings land in distinct buckets. Unparseable dates sort before parseable
/// ones, tie-broken by the raw string.
pub fn time_series(transactions: &[Transaction], filter: &ChartFilter) -> Vec<TimeSeriesPoint> {
    let mut buckets: Vec<TimeSeriesPoint> = Vec::new();
    for txn in filtered(transactions, filter) {
        let index = match buckets.iter().position(|point| point.date == txn.date) {
            Some(existing) => existing,
            None => {
                buckets.push(TimeSeriesPoint {
                    date: txn.date.clone(),
                    income: 0.0,
                    expense: 0.0,
                });
                buckets.len() - 1
            }
        };
        match txn.kind {
            TransactionKind::Income => buckets[index].income += txn.amount,
            TransactionKind::Expense => buckets[index].expense += txn.amount,
        }
    }
    buckets.sort_by(|a, b| {
        (parse_entry_date(&a.date), a.date.as_str()).cmp(&(parse_entry_date(&b.date), b.date.as_str()))
    });
    buckets
}

/// The distinct category strings actually present in the unfiltered history
/// for one kind, in lexicographic order. Used to populate filter choices;
/// intentionally distinct from the category registries.
pub fn used_categories(transactions: &[Transaction], kind: TransactionKind) -> Vec<String> {
    let mut names: Vec<String> = transactions
        .iter()
        .filter(|txn| txn.kind == kind)
        .map(|txn| txn.category.clone())
        .collect();
    names.sort();
    names.dedup();
    names
}
