//! Domain types representing booked income/expense movements.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};
use crate::errors::BooksError;

/// Whether a transaction adds to or subtracts from the balance.
///
/// The sign lives here; `Transaction::amount` is always an absolute
/// magnitude.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Ingreso",
            TransactionKind::Expense => "Gasto",
        };
        f.write_str(label)
    }
}

/// A single booked movement. Never mutated in place; created and deleted only.
///
/// Serialized field names stay camelCase so documents written by earlier
/// versions of the application load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Calendar date in raw string form. Aggregation buckets on the exact
    /// string and only parses it for chronological ordering.
    pub date: String,
    #[serde(default)]
    pub description: String,
    /// Absolute magnitude; see [`TransactionKind`].
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub project_id: String,
}

impl Transaction {
    /// Materializes a draft, assigning a fresh unique id.
    pub fn from_draft(draft: TransactionDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: draft.date,
            description: draft.description,
            amount: draft.amount,
            kind: draft.kind,
            category: draft.category,
            project_id: draft.project_id,
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} {} ${} [{}]", self.date, self.kind, self.amount, self.category)
    }
}

/// A transaction's field set prior to id assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub project_id: String,
}

impl TransactionDraft {
    /// Presence checks performed by the form layer. The store itself trusts
    /// its input and never rejects a draft.
    pub fn validate(&self) -> Result<(), BooksError> {
        if self.date.trim().is_empty() {
            return Err(BooksError::Validation("fecha".into()));
        }
        if parse_entry_date(&self.date).is_none() {
            return Err(BooksError::Validation(format!(
                "fecha no reconocida `{}`",
                self.date
            )));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(BooksError::Validation("monto".into()));
        }
        if self.category.trim().is_empty() {
            return Err(BooksError::Validation("categoría".into()));
        }
        if self.project_id.trim().is_empty() {
            return Err(BooksError::Validation("proyecto".into()));
        }
        Ok(())
    }
}

/// Best-effort date parsing for sorting and form validation.
///
/// Accepts ISO dates, RFC 3339 timestamps, and day-first slash dates.
pub fn parse_entry_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.date_naive());
    }
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TransactionDraft {
        TransactionDraft {
            date: "2024-03-01".into(),
            description: "Compra de placas".into(),
            amount: 1500.0,
            kind: TransactionKind::Expense,
            category: "Placas (OSB/Fenólico)".into(),
            project_id: "p1".into(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn missing_date_fails_validation() {
        let mut bad = draft();
        bad.date = "  ".into();
        assert!(matches!(
            bad.validate(),
            Err(BooksError::Validation(field)) if field == "fecha"
        ));
    }

    #[test]
    fn non_finite_amount_fails_validation() {
        let mut bad = draft();
        bad.amount = f64::NAN;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn kind_serializes_as_screaming_tag() {
        let json = serde_json::to_string(&TransactionKind::Income).unwrap();
        assert_eq!(json, "\"INCOME\"");
    }

    #[test]
    fn parses_iso_rfc3339_and_slash_dates() {
        assert_eq!(
            parse_entry_date("2024-01-03"),
            NaiveDate::from_ymd_opt(2024, 1, 3)
        );
        assert_eq!(
            parse_entry_date("2024-01-03T10:30:00Z"),
            NaiveDate::from_ymd_opt(2024, 1, 3)
        );
        assert_eq!(
            parse_entry_date("03/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 3)
        );
        assert_eq!(parse_entry_date("pronto"), None);
    }
}
