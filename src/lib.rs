//! Reconcile a catalog price list against a vendor price list and write
//! discrepancy reports.
//!
//! A run loads a catalog table and a vendor table (from SQLite or from CSV
//! files), left joins them by sku, and writes three CSV reports into a dated
//! folder: price updates, products to disable, and vendor products the
//! catalog is missing.

pub mod args;
pub mod errors;
pub mod job;
pub mod loader;
pub mod model;
pub mod price;
pub mod reconcile;
pub mod report;

/// Install the stdout log subscriber used by the binaries. `RUST_LOG`
/// overrides the default `price_checker=info` filter.
pub fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "price_checker=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
