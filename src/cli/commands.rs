//! Command handlers and dispatch for the interactive shell.
//!
//! All confirmation flows for destructive operations live here, in the
//! presentation layer; the store operations themselves never prompt.

use std::fs;

use chrono::Local;

use crate::analytics::{
    breakdown_by_category, time_series, used_categories, ChartFilter, Selection,
};
use crate::cli::{forms, io, output, CommandError};
use crate::core::BooksManager;
use crate::domain::{Displayable, TransactionDraft, TransactionKind};

pub enum LoopControl {
    Continue,
    Exit,
}

/// Top-level command tokens, used for dispatch and typo suggestions.
pub const COMMANDS: [&str; 9] = [
    "help",
    "totals",
    "tx",
    "project",
    "cat",
    "dashboard",
    "export",
    "import",
    "exit",
];

pub struct ShellContext {
    pub manager: BooksManager,
    pub script_mode: bool,
}

impl ShellContext {
    pub fn new(manager: BooksManager, script_mode: bool) -> Self {
        Self {
            manager,
            script_mode,
        }
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        match command {
            "help" => {
                print_help();
                Ok(LoopControl::Continue)
            }
            "totals" => {
                self.print_totals();
                Ok(LoopControl::Continue)
            }
            "tx" => self.handle_tx(args),
            "project" => self.handle_project(args),
            "cat" => self.handle_cat(args),
            "dashboard" => self.handle_dashboard(args),
            "export" => self.handle_export(args),
            "import" => self.handle_import(args),
            "exit" | "quit" => Ok(LoopControl::Exit),
            unknown => {
                output::warning(format!("Comando desconocido `{}`.", unknown));
                if let Some(candidate) = suggest_command(unknown) {
                    output::info(format!("¿Quisiste decir `{}`?", candidate));
                }
                Ok(LoopControl::Continue)
            }
        }
    }

    fn print_totals(&self) {
        let totals = self.manager.totals();
        output::section("Balance");
        output::info(format!("Ingresos: {}", money(totals.total_income)));
        output::info(format!("Gastos:   {}", money(totals.total_expense)));
        output::info(format!("Balance:  {}", money(totals.balance)));
    }

    fn handle_tx(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        match args.first().copied() {
            None | Some("list") => self.list_transactions(),
            Some("add") => self.add_transaction(&args[1..]),
            Some("rm") => self.remove_transaction(&args[1..]),
            Some(other) => Err(CommandError::Usage(format!(
                "subcomando `tx {}` no reconocido (list|add|rm)",
                other
            ))),
        }
    }

    fn list_transactions(&self) -> Result<LoopControl, CommandError> {
        let books = self.manager.books();
        if books.transactions.is_empty() {
            output::info("Sin registros.");
            return Ok(LoopControl::Continue);
        }
        output::section("Libro Diario");
        // Most recent first is a view concern; storage stays append-ordered.
        for txn in books.transactions.iter().rev() {
            let description = if txn.description.is_empty() {
                "Sin descripción"
            } else {
                txn.description.as_str()
            };
            output::info(format!(
                "{}  {}  {:<7}  {:>12}  {}  {}  [{}]",
                short_id(&txn.id),
                txn.date,
                txn.kind.to_string(),
                money(txn.amount),
                txn.category,
                description,
                books.project_name(&txn.project_id),
            ));
        }
        Ok(LoopControl::Continue)
    }

    fn add_transaction(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let draft = if args.is_empty() {
            if self.script_mode {
                return Err(CommandError::Usage(
                    "tx add <fecha> <monto> <gasto|ingreso> <categoría> <proyecto> [descripción]"
                        .into(),
                ));
            }
            match forms::transaction_form(&mut self.manager)? {
                Some(draft) => draft,
                None => {
                    output::info("Registro cancelado.");
                    return Ok(LoopControl::Continue);
                }
            }
        } else {
            draft_from_args(args)?
        };
        draft.validate()?;
        let id = self.manager.add_transaction(draft);
        output::success(format!("Registro agregado ({}).", short_id(&id)));
        Ok(LoopControl::Continue)
    }

    fn remove_transaction(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let (args, force) = take_force_flag(args);
        let id = args
            .first()
            .ok_or_else(|| CommandError::Usage("tx rm <id>".into()))?;
        let id = self.resolve_transaction_id(id)?;
        if !self.confirm_destructive(
            "¿Seguro que quieres borrar este registro? No se puede deshacer.",
            force,
        )? {
            return Ok(LoopControl::Continue);
        }
        if self.manager.remove_transaction(&id) {
            output::success("Registro borrado.");
        } else {
            output::warning(format!("No existe el registro `{}`.", id));
        }
        Ok(LoopControl::Continue)
    }

    /// Accepts full ids or the shortened prefix shown by `tx list`, as long
    /// as the prefix is unambiguous.
    fn resolve_transaction_id(&self, prefix: &str) -> Result<String, CommandError> {
        let matches: Vec<&str> = self
            .manager
            .books()
            .transactions
            .iter()
            .filter(|txn| txn.id.starts_with(prefix))
            .map(|txn| txn.id.as_str())
            .collect();
        match matches.as_slice() {
            [] => Ok(prefix.to_string()),
            [only] => Ok((*only).to_string()),
            _ => Err(CommandError::Usage(format!(
                "`{}` coincide con varios registros, usa el id completo",
                prefix
            ))),
        }
    }

    fn handle_project(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        match args.first().copied() {
            None | Some("list") => {
                output::section("Proyectos Activos");
                for project in &self.manager.books().projects {
                    output::info(project.display_label());
                }
                Ok(LoopControl::Continue)
            }
            Some("add") => {
                let name = join_name(&args[1..], "project add <nombre>")?;
                let id = self.manager.add_project(name);
                output::success(format!("Proyecto creado ({}).", id));
                Ok(LoopControl::Continue)
            }
            Some("rm") => {
                let (rest, force) = take_force_flag(&args[1..]);
                let id = rest
                    .first()
                    .ok_or_else(|| CommandError::Usage("project rm <id>".into()))?;
                if !self.confirm_destructive(
                    "¿Borrar proyecto? Los registros quedarán huerfanos.",
                    force,
                )? {
                    return Ok(LoopControl::Continue);
                }
                if self.manager.remove_project(id) {
                    output::success("Proyecto borrado.");
                } else {
                    output::warning(format!("No existe el proyecto `{}`.", id));
                }
                Ok(LoopControl::Continue)
            }
            Some(other) => Err(CommandError::Usage(format!(
                "subcomando `project {}` no reconocido (list|add|rm)",
                other
            ))),
        }
    }

    fn handle_cat(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        match args.first().copied() {
            None | Some("list") => {
                let books = self.manager.books();
                output::section("Categorías Gastos");
                for name in books.categories(TransactionKind::Expense) {
                    output::info(format!("  {}", name));
                }
                output::section("Categorías Ingresos");
                for name in books.categories(TransactionKind::Income) {
                    output::info(format!("  {}", name));
                }
                Ok(LoopControl::Continue)
            }
            Some("add") => {
                let kind = parse_kind(args.get(1).copied())?;
                let name = join_name(&args[2..], "cat add <gasto|ingreso> <nombre>")?;
                self.manager.add_category(name.clone(), kind);
                output::success(format!("Categoría `{}` agregada.", name));
                Ok(LoopControl::Continue)
            }
            Some("rm") => {
                let kind = parse_kind(args.get(1).copied())?;
                let (rest, force) = take_force_flag(&args[2..]);
                let name = join_name(&rest, "cat rm <gasto|ingreso> <nombre>")?;
                if !self.confirm_destructive(&format!("¿Eliminar \"{}\"?", name), force)? {
                    return Ok(LoopControl::Continue);
                }
                if self.manager.remove_category(&name, kind) {
                    output::success(format!("Categoría `{}` eliminada.", name));
                } else {
                    output::warning(format!("No existe la categoría `{}`.", name));
                }
                Ok(LoopControl::Continue)
            }
            Some(other) => Err(CommandError::Usage(format!(
                "subcomando `cat {}` no reconocido (list|add|rm)",
                other
            ))),
        }
    }

    fn handle_dashboard(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let filter = ChartFilter {
            project: match args.first() {
                Some(id) => Selection::Only((*id).to_string()),
                None => Selection::All,
            },
            ..ChartFilter::default()
        };
        let books = self.manager.books();

        output::section("Gastos por Categoría");
        let mut expenses =
            breakdown_by_category(&books.transactions, &filter, TransactionKind::Expense);
        expenses.sort_by(|a, b| b.total.total_cmp(&a.total));
        if expenses.is_empty() {
            output::info("Sin datos.");
        }
        for slice in &expenses {
            output::info(format!("{:>12}  {}", money(slice.total), slice.name));
        }

        output::section("Ingresos por Categoría");
        let mut income =
            breakdown_by_category(&books.transactions, &filter, TransactionKind::Income);
        income.sort_by(|a, b| b.total.total_cmp(&a.total));
        if income.is_empty() {
            output::info("Sin datos.");
        }
        for slice in &income {
            output::info(format!("{:>12}  {}", money(slice.total), slice.name));
        }

        output::section("Flujo de Caja");
        let series = time_series(&books.transactions, &filter);
        if series.is_empty() {
            output::info("Sin datos.");
        }
        for point in &series {
            output::info(format!(
                "{}  ingresos {:>12}  gastos {:>12}",
                point.date,
                money(point.income),
                money(point.expense)
            ));
        }

        // Filter options come from the history itself, not the registries.
        output::section("Filtros Disponibles");
        output::info(format!(
            "Gastos:   {}",
            used_categories(&books.transactions, TransactionKind::Expense).join(", ")
        ));
        output::info(format!(
            "Ingresos: {}",
            used_categories(&books.transactions, TransactionKind::Income).join(", ")
        ));
        Ok(LoopControl::Continue)
    }

    fn handle_export(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let default_name = format!(
            "woodframe_registros_{}.csv",
            Local::now().date_naive()
        );
        let path = args.first().copied().unwrap_or(default_name.as_str());
        fs::write(path, self.manager.export_csv())?;
        output::success(format!("Archivo CSV guardado en `{}`.", path));
        Ok(LoopControl::Continue)
    }

    fn handle_import(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let path = args
            .first()
            .ok_or_else(|| CommandError::Usage("import <ruta>".into()))?;
        let text = fs::read_to_string(path)?;
        let count = self.manager.import_csv(&text)?;
        output::success(format!("Se importaron {} registros exitosamente.", count));
        Ok(LoopControl::Continue)
    }

    fn confirm_destructive(&self, message: &str, force: bool) -> Result<bool, CommandError> {
        if force {
            return Ok(true);
        }
        if self.script_mode {
            output::warning("Confirmación requerida: agrega `--si` al comando.");
            return Ok(false);
        }
        io::confirm(message)
    }
}

fn draft_from_args(args: &[&str]) -> Result<TransactionDraft, CommandError> {
    if args.len() < 5 {
        return Err(CommandError::Usage(
            "tx add <fecha> <monto> <gasto|ingreso> <categoría> <proyecto> [descripción]".into(),
        ));
    }
    let amount = args[1].parse::<f64>().map_err(|_| {
        CommandError::Usage(format!("monto inválido `{}`", args[1]))
    })?;
    Ok(TransactionDraft {
        date: args[0].to_string(),
        description: args[5..].join(" "),
        amount,
        kind: parse_kind(Some(args[2]))?,
        category: args[3].to_string(),
        project_id: args[4].to_string(),
    })
}

fn parse_kind(token: Option<&str>) -> Result<TransactionKind, CommandError> {
    match token.map(str::to_lowercase).as_deref() {
        Some("gasto") | Some("expense") => Ok(TransactionKind::Expense),
        Some("ingreso") | Some("income") => Ok(TransactionKind::Income),
        other => Err(CommandError::Usage(format!(
            "tipo `{}` no reconocido (gasto|ingreso)",
            other.unwrap_or("")
        ))),
    }
}

fn join_name(args: &[&str], usage: &str) -> Result<String, CommandError> {
    let name = args.join(" ").trim().to_string();
    if name.is_empty() {
        return Err(CommandError::Usage(usage.into()));
    }
    Ok(name)
}

fn take_force_flag<'a>(args: &[&'a str]) -> (Vec<&'a str>, bool) {
    let force = args.iter().any(|arg| *arg == "--si");
    (
        args.iter().copied().filter(|arg| *arg != "--si").collect(),
        force,
    )
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn money(value: f64) -> String {
    format!("${:.2}", value)
}

fn suggest_command(unknown: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|candidate| (strsim::jaro_winkler(unknown, candidate), *candidate))
        .filter(|(score, _)| *score > 0.78)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate)
}

fn print_help() {
    output::section("Comandos");
    output::info("totals                        resumen de ingresos, gastos y balance");
    output::info("tx [list]                     listado de registros (más recientes primero)");
    output::info("tx add [...]                  nuevo registro (interactivo sin argumentos)");
    output::info("tx rm <id> [--si]             borrar un registro");
    output::info("project list|add|rm           gestión de proyectos");
    output::info("cat list|add|rm               gestión de categorías");
    output::info("dashboard [proyecto]          desgloses y flujo de caja");
    output::info("export [ruta]                 exportar registros a CSV");
    output::info("import <ruta>                 restaurar registros desde CSV");
    output::info("exit                          salir");
}
