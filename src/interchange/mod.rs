//! Delimited-text interchange for the aggregate document.
//!
//! The format is CSV-like but hand-rolled on both sides: six fixed columns,
//! per-field quoting, and a decode path that tolerates hand-edited input by
//! skipping malformed rows instead of aborting.

use tracing::warn;

use crate::domain::{Project, Transaction, TransactionKind};
use crate::errors::BooksError;
use crate::ledger::{Books, NO_PROJECT_LABEL};

/// Header row, fixed order. Column order is assumed on decode; the header
/// line itself is skipped positionally, never re-derived.
pub const EXPORT_HEADERS: [&str; 6] = [
    "Fecha",
    "Descripción",
    "Monto",
    "Tipo",
    "Categoría",
    "Proyecto",
];

/// Localized display labels for the two transaction kinds. Decode matches
/// the income label case-insensitively as a substring; anything else reads
/// back as an expense.
pub const INCOME_LABEL: &str = "Ingreso";
pub const EXPENSE_LABEL: &str = "Gasto";

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => INCOME_LABEL,
        TransactionKind::Expense => EXPENSE_LABEL,
    }
}

/// A field is quoted iff it contains a comma, a double quote, or a newline;
/// embedded quotes are doubled. Everything else is emitted bare.
fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Quote-aware comma splitter. Inside a quoted region a doubled quote is an
/// escaped literal quote and commas do not split.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}

/// Serializes the document to delimited text: one header row, one data row
/// per transaction, project references resolved to display names.
pub fn export_csv(books: &Books) -> String {
    let mut lines = Vec::with_capacity(books.transactions.len() + 1);
    lines.push(EXPORT_HEADERS.join(","));
    for txn in &books.transactions {
        let row = [
            escape_field(&txn.date),
            escape_field(&txn.description),
            escape_field(&txn.amount.to_string()),
            escape_field(kind_label(txn.kind)),
            escape_field(&txn.category),
            escape_field(books.project_name(&txn.project_id)),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// Parses delimited text back into a full document.
///
/// Decode is a restore, not a merge: projects are synthesized fresh from the
/// distinct names encountered and category registries from the categories
/// seen per kind, in first-appearance order. Individual bad rows are skipped;
/// the decode only fails when the text has no header plus data line
/// ([`BooksError::InvalidFormat`]) or when no row survives
/// ([`BooksError::EmptyImport`]).
pub fn import_csv(text: &str) -> Result<Books, BooksError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() < 2 {
        return Err(BooksError::InvalidFormat);
    }

    let mut transactions = Vec::new();
    let mut projects: Vec<Project> = Vec::new();
    let mut expense_categories: Vec<String> = Vec::new();
    let mut income_categories: Vec<String> = Vec::new();

    fn resolve_project(name: &str, projects: &mut Vec<Project>) -> String {
        if let Some(existing) = projects.iter().find(|p| p.name == name) {
            return existing.id.clone();
        }
        let project = Project::new(name);
        let id = project.id.clone();
        projects.push(project);
        id
    }

    let income_needle = INCOME_LABEL.to_lowercase();
    for (number, line) in lines.iter().enumerate().skip(1) {
        let fields = split_row(line);
        if fields.len() < 5 {
            warn!(row = number + 1, "import: fila descartada, faltan columnas");
            continue;
        }
        let date = fields[0].clone();
        let amount = fields[2].parse::<f64>();
        let amount = match amount {
            Ok(value) if value.is_finite() => value.abs(),
            _ => {
                warn!(row = number + 1, "import: fila descartada, monto ilegible");
                continue;
            }
        };
        if date.is_empty() {
            warn!(row = number + 1, "import: fila descartada, sin fecha");
            continue;
        }

        let kind = if fields[3].to_lowercase().contains(&income_needle) {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        let category = fields[4].clone();
        let registry = match kind {
            TransactionKind::Income => &mut income_categories,
            TransactionKind::Expense => &mut expense_categories,
        };
        if !registry.contains(&category) {
            registry.push(category.clone());
        }

        let project_name = match fields.get(5) {
            Some(name) if !name.is_empty() => name.as_str(),
            _ => NO_PROJECT_LABEL,
        };

        transactions.push(Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            description: fields[1].clone(),
            amount,
            kind,
            category,
            project_id: resolve_project(project_name, &mut projects),
        });
    }

    if transactions.is_empty() {
        return Err(BooksError::EmptyImport);
    }

    Ok(Books {
        transactions,
        projects,
        expense_categories,
        income_categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionDraft;

    fn sample_books() -> Books {
        let mut books = Books::new();
        books.add_transaction(TransactionDraft {
            date: "2024-03-01".into(),
            description: "Clavos, 2 pulgadas".into(),
            amount: 120.5,
            kind: TransactionKind::Expense,
            category: "Herramientas".into(),
            project_id: "p1".into(),
        });
        books.add_transaction(TransactionDraft {
            date: "2024-03-02".into(),
            description: String::new(),
            amount: 900.0,
            kind: TransactionKind::Income,
            category: "Anticipo Cliente".into(),
            project_id: "gen".into(),
        });
        books
    }

    #[test]
    fn export_emits_header_and_localized_labels() {
        let text = export_csv(&sample_books());
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Fecha,Descripción,Monto,Tipo,Categoría,Proyecto"
        );
        assert!(text.contains("Gasto"));
        assert!(text.contains("Ingreso"));
        assert!(text.contains("Casa Modelo 45m2"));
    }

    #[test]
    fn fields_with_commas_are_quoted_and_round_trip() {
        let text = export_csv(&sample_books());
        assert!(text.contains("\"Clavos, 2 pulgadas\""));
        let decoded = import_csv(&text).unwrap();
        assert_eq!(decoded.transactions[0].description, "Clavos, 2 pulgadas");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(escape_field("tabla \"seca\""), "\"tabla \"\"seca\"\"\"");
        assert_eq!(split_row("\"tabla \"\"seca\"\"\",10"), vec!["tabla \"seca\"", "10"]);
    }

    #[test]
    fn orphaned_project_exports_placeholder() {
        let mut books = sample_books();
        books.remove_project("p1");
        let text = export_csv(&books);
        assert!(text.contains(NO_PROJECT_LABEL));
    }

    #[test]
    fn bad_amount_skips_only_that_row() {
        let text = "Fecha,Descripción,Monto,Tipo,Categoría,Proyecto\n\
                    2024-01-01,ok,100,Gasto,Otros,Obra\n\
                    2024-01-02,mal,abc,Gasto,Otros,Obra\n\
                    2024-01-03,ok,50,Ingreso,Otros,Obra";
        let decoded = import_csv(text).unwrap();
        assert_eq!(decoded.transactions.len(), 2);
    }

    #[test]
    fn header_only_text_fails_with_empty_import() {
        let text = "Fecha,Descripción,Monto,Tipo,Categoría,Proyecto\n,,abc,,";
        assert!(matches!(import_csv(text), Err(BooksError::EmptyImport)));
    }

    #[test]
    fn single_line_fails_with_invalid_format() {
        assert!(matches!(
            import_csv("Fecha,Descripción,Monto,Tipo,Categoría,Proyecto"),
            Err(BooksError::InvalidFormat)
        ));
    }

    #[test]
    fn garbled_type_defaults_to_expense() {
        let text = "h\n2024-01-01,x,10,???,Otros,Obra";
        let decoded = import_csv(text).unwrap();
        assert_eq!(decoded.transactions[0].kind, TransactionKind::Expense);
    }

    #[test]
    fn missing_project_column_maps_to_placeholder() {
        let text = "h\n2024-01-01,x,10,Gasto,Otros";
        let decoded = import_csv(text).unwrap();
        let txn = &decoded.transactions[0];
        assert_eq!(decoded.project_name(&txn.project_id), NO_PROJECT_LABEL);
        assert_eq!(decoded.projects.len(), 1);
    }

    #[test]
    fn decode_mints_fresh_project_ids() {
        let text = export_csv(&sample_books());
        let decoded = import_csv(&text).unwrap();
        assert!(decoded.projects.iter().all(|p| p.id != "p1" && p.id != "gen"));
        // Distinct names collapse to one project each.
        assert_eq!(decoded.projects.len(), 2);
    }

    #[test]
    fn negative_amounts_decode_as_magnitudes() {
        let text = "h\n2024-01-01,x,-25.5,Gasto,Otros,Obra";
        let decoded = import_csv(text).unwrap();
        assert_eq!(decoded.transactions[0].amount, 25.5);
    }
}
