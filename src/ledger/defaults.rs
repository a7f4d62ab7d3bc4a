//! Built-in fallback data applied when a loaded document is missing pieces.

use once_cell::sync::Lazy;

use crate::domain::Project;

/// Placeholder rendered wherever a project reference no longer resolves.
pub const NO_PROJECT_LABEL: &str = "Sin Proyecto";

/// Fixed key of the persisted aggregate document. Must not change: existing
/// installations already store their data under it.
pub const STORAGE_KEY: &str = "woodframe_books_data_v1";

pub static DEFAULT_EXPENSE_CATEGORIES: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "Madera Estructural",
        "Placas (OSB/Fenólico)",
        "Aislación (Lana/EPS)",
        "Revestimiento Exterior",
        "Revestimiento Interior",
        "Techumbre/Zinguería",
        "Fundaciones/Base",
        "Aberturas (Puertas/Ventanas)",
        "Instalación Eléctrica",
        "Instalación Sanitaria",
        "Mano de Obra",
        "Herramientas",
        "Fletes/Transporte",
        "Permisos/Impuestos",
        "Marketing/Publicidad",
        "Otros",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});

pub static DEFAULT_INCOME_CATEGORIES: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "Anticipo Cliente",
        "Pago Avance de Obra",
        "Pago Final",
        "Venta de Sobrantes",
        "Inversión Externa",
        "Otros",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});

/// The starter project set for a fresh or incomplete document.
pub fn default_projects() -> Vec<Project> {
    vec![
        Project::with_id("gen", "General / Oficina"),
        Project::with_id("p1", "Casa Modelo 45m2"),
        Project::with_id("p2", "Cabaña Alpina"),
    ]
}
