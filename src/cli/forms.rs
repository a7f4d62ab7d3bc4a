//! Interactive data-entry flows for the shell.
//!
//! The transaction form is the validation gate of the system: drafts are
//! checked here before they reach the store, which trusts its input.

use chrono::Local;

use crate::cli::{io, CommandError};
use crate::core::BooksManager;
use crate::domain::{TransactionDraft, TransactionKind};

const NEW_ENTRY: &str = "+ Crear nuevo...";

/// Walks the user through a new transaction. Categories and projects can be
/// created inline; those creations persist immediately even if the form is
/// later abandoned, matching the store's append-only model.
pub fn transaction_form(
    manager: &mut BooksManager,
) -> Result<Option<TransactionDraft>, CommandError> {
    let kinds = vec!["Gasto".to_string(), "Ingreso".to_string()];
    let kind = match io::select("Tipo de registro", &kinds)? {
        Some(0) => TransactionKind::Expense,
        Some(_) => TransactionKind::Income,
        None => return Ok(None),
    };

    let today = Local::now().date_naive().to_string();
    let date = io::text("Fecha", Some(&today), false)?;

    let amount_raw = io::text("Monto", None, false)?;
    let amount = match amount_raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            return Err(CommandError::Usage(format!(
                "monto inválido `{}`",
                amount_raw.trim()
            )))
        }
    };

    let category = match pick_category(manager, kind)? {
        Some(category) => category,
        None => return Ok(None),
    };
    let project_id = match pick_project(manager)? {
        Some(id) => id,
        None => return Ok(None),
    };
    let description = io::text("Descripción", None, true)?;

    let draft = TransactionDraft {
        date,
        description,
        amount,
        kind,
        category,
        project_id,
    };
    draft.validate()?;
    Ok(Some(draft))
}

fn pick_category(
    manager: &mut BooksManager,
    kind: TransactionKind,
) -> Result<Option<String>, CommandError> {
    let mut items: Vec<String> = manager.books().categories(kind).to_vec();
    items.push(NEW_ENTRY.to_string());
    let picked = match io::select("Categoría", &items)? {
        Some(index) => index,
        None => return Ok(None),
    };
    if picked + 1 == items.len() {
        let name = io::text("Nombre de la nueva categoría", None, false)?;
        let name = name.trim().to_string();
        if name.is_empty() {
            return Ok(None);
        }
        manager.add_category(name.clone(), kind);
        Ok(Some(name))
    } else {
        Ok(Some(items[picked].clone()))
    }
}

fn pick_project(manager: &mut BooksManager) -> Result<Option<String>, CommandError> {
    let mut items: Vec<String> = manager
        .books()
        .projects
        .iter()
        .map(|project| project.name.clone())
        .collect();
    items.push(NEW_ENTRY.to_string());
    let picked = match io::select("Proyecto", &items)? {
        Some(index) => index,
        None => return Ok(None),
    };
    if picked + 1 == items.len() {
        let name = io::text("Nombre del nuevo proyecto", None, false)?;
        let name = name.trim().to_string();
        if name.is_empty() {
            return Ok(None);
        }
        Ok(Some(manager.add_project(name)))
    } else {
        let id = manager.books().projects[picked].id.clone();
        Ok(Some(id))
    }
}
