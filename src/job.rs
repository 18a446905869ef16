use crate::errors::{JobError, LoadError, Side};
use crate::loader::{flat_file, sqlite};
use crate::model::{CatalogRecord, Schema, VendorRecord};
use crate::reconcile::{reconcile, ReconSummary};
use crate::report::{ReportPaths, ReportSink};
use std::fmt::Debug;
use std::path::PathBuf;
use tracing::{debug, error, info};

const PREVIEW_ROWS: usize = 5;

/// Where the two input tables come from.
#[derive(Clone, Debug)]
pub enum Source {
    /// Both tables live in one SQLite database file.
    Sqlite {
        database: PathBuf,
        catalog_table: String,
        vendor_table: String,
    },

    /// Each table is its own CSV file.
    FlatFile {
        catalog: PathBuf,
        vendor: PathBuf,
        encoding: Option<String>,
    },
}

impl Source {
    fn load<S: Schema>(&self, side: Side) -> Result<Vec<S>, LoadError> {
        match self {
            Source::Sqlite {
                database,
                catalog_table,
                vendor_table,
            } => {
                let table = match side {
                    Side::Catalog => catalog_table,
                    Side::Vendor => vendor_table,
                };
                sqlite::load_table(database, table)
            }
            Source::FlatFile {
                catalog,
                vendor,
                encoding,
            } => {
                let path = match side {
                    Side::Catalog => catalog,
                    Side::Vendor => vendor,
                };
                flat_file::load_file(path, encoding.as_deref())
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct JobConfig {
    pub source: Source,
    pub output: ReportSink,
}

/// The outcome of a successful run.
#[derive(Debug)]
pub struct RunReport {
    pub summary: ReconSummary,
    pub paths: ReportPaths,
}

/// Run one reconciliation: load both tables, compare them, write the
/// reports.
///
/// If either table fails to load, nothing is written and the load error is
/// returned. Report write failures are returned as they occur.
pub fn run(config: &JobConfig) -> Result<RunReport, JobError> {
    let catalog: Vec<CatalogRecord> = load(&config.source, Side::Catalog)?;
    let vendor: Vec<VendorRecord> = load(&config.source, Side::Vendor)?;

    let reconciliation = reconcile(&catalog, &vendor);
    let summary = reconciliation.summary.clone();
    info!(
        catalog = summary.catalog_rows,
        vendor = summary.vendor_rows,
        joined = summary.joined_rows,
        price_differences = summary.price_differences,
        disabled = summary.disabled,
        missing = summary.missing,
        "reconciled price lists"
    );

    let paths = config.output.write_all(&reconciliation)?;
    info!(directory = %config.output.directory().display(), "reports written");

    Ok(RunReport { summary, paths })
}

fn load<S: Schema + Debug>(source: &Source, side: Side) -> Result<Vec<S>, JobError> {
    match source.load::<S>(side) {
        Ok(records) => {
            info!(table = %side, rows = records.len(), "loaded table");
            preview(side, &records);
            Ok(records)
        }
        Err(err) => {
            error!(table = %side, %err, "failed to load table");
            Err(JobError::Load { side, source: err })
        }
    }
}

fn preview<T: Debug>(side: Side, records: &[T]) {
    for record in records.iter().take(PREVIEW_ROWS) {
        debug!(table = %side, ?record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    fn sink(root: &std::path::Path) -> ReportSink {
        ReportSink::new(root, "Cuda", NaiveDate::from_ymd_opt(2024, 9, 14).unwrap())
    }

    #[test]
    fn should_not_write_reports_when_vendor_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("catalog.csv");
        fs::write(&catalog, "sku,product_online,price\nA,1,10.00\n").unwrap();

        let config = JobConfig {
            source: Source::FlatFile {
                catalog,
                vendor: dir.path().join("missing.csv"),
                encoding: None,
            },
            output: sink(dir.path()),
        };

        let err = run(&config).unwrap_err();
        assert!(matches!(
            err,
            JobError::Load {
                side: Side::Vendor,
                source: LoadError::Io(_)
            }
        ));
        assert!(!config.output.directory().exists());
    }

    #[test]
    fn should_report_catalog_side_of_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("catalog.csv");
        fs::write(&catalog, "sku,price\nA,10.00\n").unwrap();

        let config = JobConfig {
            source: Source::FlatFile {
                catalog,
                vendor: dir.path().join("vendor.csv"),
                encoding: None,
            },
            output: sink(dir.path()),
        };

        let err = run(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to load catalog table: required column \"product_online\" is not present"
        );
    }
}
