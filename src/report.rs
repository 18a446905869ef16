use crate::errors::ReportError;
use crate::model::{DisableSku, MissingSku, PriceDifference};
use crate::reconcile::Reconciliation;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A row type that can be written as a report. `HEADER` is written even when
/// there are no rows and must match the serialized field order.
pub trait ReportRow: Serialize {
    const HEADER: &'static [&'static str];
}

impl ReportRow for PriceDifference {
    const HEADER: &'static [&'static str] = &["sku", "price", "store_view_code", "product_websites"];
}

impl ReportRow for DisableSku {
    const HEADER: &'static [&'static str] =
        &["sku", "product_online", "store_view_code", "product_websites"];
}

impl ReportRow for MissingSku {
    const HEADER: &'static [&'static str] = &["sku", "description", "price"];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    PriceDifference,
    DisableSku,
    MissingSku,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::PriceDifference => "price-difference",
            ReportKind::DisableSku => "disable-sku",
            ReportKind::MissingSku => "missing-sku",
        }
    }
}

/// Where the reports of one run were written.
#[derive(Debug, PartialEq)]
pub struct ReportPaths {
    pub price_difference: PathBuf,
    pub disable_sku: PathBuf,
    pub missing_sku: PathBuf,
}

/// Destination for one run's reports: `<root>/<tag>-<date>/<kind>-<date>.csv`.
///
/// The date is supplied by the caller rather than read from the clock, so two
/// sinks built with the same arguments always resolve to the same files.
#[derive(Clone, Debug)]
pub struct ReportSink {
    root: PathBuf,
    source_tag: String,
    date: NaiveDate,
}

impl ReportSink {
    pub fn new(root: impl Into<PathBuf>, source_tag: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            root: root.into(),
            source_tag: source_tag.into(),
            date,
        }
    }

    pub fn directory(&self) -> PathBuf {
        self.root
            .join(format!("{}-{}", self.source_tag, self.date.format(DATE_FORMAT)))
    }

    pub fn path_for(&self, kind: ReportKind) -> PathBuf {
        self.directory()
            .join(format!("{}-{}.csv", kind.as_str(), self.date.format(DATE_FORMAT)))
    }

    /// Write all three reports, creating the output directory if needed.
    /// Existing files for the same date are replaced.
    pub fn write_all(&self, reconciliation: &Reconciliation) -> Result<ReportPaths, ReportError> {
        Ok(ReportPaths {
            price_difference: self
                .write_report(ReportKind::PriceDifference, &reconciliation.price_differences)?,
            disable_sku: self.write_report(ReportKind::DisableSku, &reconciliation.disabled)?,
            missing_sku: self.write_report(ReportKind::MissingSku, &reconciliation.missing)?,
        })
    }

    /// Write a single report and return its path.
    pub fn write_report<R: ReportRow>(
        &self,
        kind: ReportKind,
        rows: &[R],
    ) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(self.directory())?;

        let path = self.path_for(kind);
        write_rows(&path, rows)?;

        info!(report = kind.as_str(), rows = rows.len(), path = %path.display(), "wrote report");
        Ok(path)
    }
}

fn write_rows<R: ReportRow>(path: &Path, rows: &[R]) -> Result<(), ReportError> {
    // The header is written by hand so that an empty report still has one.
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record(R::HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    Ok(())
}
