use serde::Serialize;

use crate::distance::{DistanceResult, normalized_distance};
use crate::source::CountSource;
use crate::vector::reconstruct;

/// Distance of one measured table for one application.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableResult {
    pub table: String,
    pub result: DistanceResult,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportRow {
    pub app: String,
    /// One entry per measured table, in the order the tables were requested.
    pub results: Vec<TableResult>,
}

/// Every requested table scored against `norm`, one row per application.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub norm: String,
    pub tables: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn row(&self, app: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|r| r.app == app)
    }
}

impl ReportRow {
    pub fn result(&self, table: &str) -> Option<DistanceResult> {
        self.results
            .iter()
            .find(|r| r.table == table)
            .map(|r| r.result)
    }
}

/// Score each table in `tables` against `norm` for each application.
///
/// An empty `apps` slice means every application the source knows about.
/// Each (application, table) pair reconstructs both vectors afresh; the first
/// data-source failure aborts the whole report.
pub fn evaluate<S: CountSource + ?Sized>(
    source: &S,
    apps: &[String],
    tables: &[String],
    norm: &str,
) -> Result<Report, S::Error> {
    let apps = if apps.is_empty() {
        source.app_names()?
    } else {
        apps.to_vec()
    };

    let mut rows = Vec::with_capacity(apps.len());
    for app in apps {
        let mut results = Vec::with_capacity(tables.len());
        for table in tables {
            let measured = reconstruct(source, &app, table)?;
            let reference = reconstruct(source, &app, norm)?;
            results.push(TableResult {
                table: table.clone(),
                result: normalized_distance(&measured, &reference),
            });
        }
        rows.push(ReportRow { app, results });
    }

    Ok(Report {
        norm: norm.to_string(),
        tables: tables.to_vec(),
        rows,
    })
}
