#![doc(test(attr(deny(warnings))))]

//! Obra Core keeps the income/expense books of a small construction
//! business: an in-memory transaction ledger mirrored into a persisted slot,
//! chart-ready aggregation, and a delimited-text interchange format.

pub mod analysis;
pub mod analytics;
pub mod cli;
pub mod core;
pub mod domain;
pub mod errors;
pub mod interchange;
pub mod ledger;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("obra_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Obra Core tracing initialized.");
    });
}
