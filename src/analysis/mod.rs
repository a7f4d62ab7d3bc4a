//! Natural-language financial analysis, delegated to an external advisor.
//!
//! The core only condenses the ledger into a prompt and shields callers from
//! advisor failures; the advisor itself (a remote model, a canned reporter, a
//! test stub) plugs in behind the [`Advisor`] trait.

use std::collections::BTreeMap;

use tracing::warn;

use crate::analytics::{breakdown_by_category, ChartFilter};
use crate::domain::{NamedEntity, TransactionKind};
use crate::errors::BooksError;
use crate::ledger::Books;

/// User-facing message returned whenever the advisor call fails.
pub const ANALYSIS_FALLBACK: &str =
    "Ocurrió un error al consultar al asesor. Por favor intenta más tarde.";

/// External collaborator producing a natural-language report over the
/// current ledger.
pub trait Advisor {
    fn analyze(&self, books: &Books) -> Result<String, BooksError>;
}

/// Condenses the ledger into an advisor prompt: totals, the expense
/// breakdown, and the active project list, with the consulting instructions.
/// Advisors are free to use it or build their own.
pub fn build_report_prompt(books: &Books) -> String {
    let totals = books.totals();
    let expenses: BTreeMap<String, f64> = breakdown_by_category(
        &books.transactions,
        &ChartFilter::default(),
        TransactionKind::Expense,
    )
    .into_iter()
    .map(|slice| (slice.name, slice.total))
    .collect();
    let breakdown = serde_json::to_string_pretty(&expenses).unwrap_or_else(|_| "{}".into());
    let project_names: Vec<&str> = books.projects.iter().map(NamedEntity::name).collect();

    format!(
        "Actúa como un experto consultor financiero para una empresa de construcción \
         de casas Wood Frame.\n\
         Analiza los siguientes datos resumidos:\n\n\
         Total Ingresos: ${}\n\
         Total Gastos: ${}\n\
         Balance: ${}\n\n\
         Desglose de gastos por categoría:\n{}\n\n\
         Proyectos activos: {}\n\n\
         Por favor, provee:\n\
         1. Un breve diagnóstico de la salud financiera.\n\
         2. Identifica si hay algún gasto desproporcionado para el método constructivo \
         Wood Frame.\n\
         3. Dos recomendaciones concretas para optimizar costos o flujo de caja.\n\n\
         Responde en formato Markdown, sé conciso y profesional.",
        totals.total_income,
        totals.total_expense,
        totals.balance,
        breakdown,
        project_names.join(", "),
    )
}

/// Runs the advisor over the current ledger. Failures are logged and mapped
/// to [`ANALYSIS_FALLBACK`]; this call never propagates a fault.
pub fn run_analysis(advisor: &dyn Advisor, books: &Books) -> String {
    match advisor.analyze(books) {
        Ok(report) => report,
        Err(err) => {
            warn!("analysis advisor failed: {err}");
            ANALYSIS_FALLBACK.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionDraft;

    struct PromptEchoAdvisor;
    impl Advisor for PromptEchoAdvisor {
        fn analyze(&self, books: &Books) -> Result<String, BooksError> {
            Ok(build_report_prompt(books))
        }
    }

    struct DownAdvisor;
    impl Advisor for DownAdvisor {
        fn analyze(&self, _books: &Books) -> Result<String, BooksError> {
            Err(BooksError::Storage("sin conexión".into()))
        }
    }

    fn books_with_expense() -> Books {
        let mut books = Books::new();
        books.add_transaction(TransactionDraft {
            date: "2024-05-01".into(),
            description: String::new(),
            amount: 300.0,
            kind: TransactionKind::Expense,
            category: "Mano de Obra".into(),
            project_id: "p1".into(),
        });
        books
    }

    #[test]
    fn prompt_carries_totals_and_breakdown() {
        let prompt = build_report_prompt(&books_with_expense());
        assert!(prompt.contains("Total Gastos: $300"));
        assert!(prompt.contains("Mano de Obra"));
        assert!(prompt.contains("Casa Modelo 45m2"));
    }

    #[test]
    fn advisor_failure_maps_to_fallback_message() {
        let report = run_analysis(&DownAdvisor, &books_with_expense());
        assert_eq!(report, ANALYSIS_FALLBACK);
    }

    #[test]
    fn advisor_success_passes_report_through() {
        let report = run_analysis(&PromptEchoAdvisor, &books_with_expense());
        assert!(report.contains("consultor financiero"));
    }
}
