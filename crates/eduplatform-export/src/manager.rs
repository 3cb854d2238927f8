use eduplatform_config::ExportConfig;
use eduplatform_store::DataStore;
use std::path::Path;
use tracing::{error, info};

use crate::exporter::Exporter;
use crate::flat_file::CsvExporter;
use crate::log::{ExportFormat, ExportLog};
use crate::rows::ExportSnapshot;
use crate::sql_script::SqlExporter;
use crate::workbook::WorkbookExporter;

pub fn exporter_for(format: ExportFormat) -> &'static dyn Exporter {
    match format {
        ExportFormat::Xlsx => &WorkbookExporter,
        ExportFormat::Csv => &CsvExporter,
        ExportFormat::Sql => &SqlExporter,
    }
}

/// Runs exports and keeps the session's export log.
///
/// Failures never propagate: each run is logged with `tracing`, recorded in
/// the [`ExportLog`] and reported as `false`.
#[derive(Debug, Clone, Default)]
pub struct ExportManager {
    config: ExportConfig,
    log: ExportLog,
}

impl ExportManager {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            log: ExportLog::new(),
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn log(&self) -> &ExportLog {
        &self.log
    }

    /// Configured destination for `format`.
    pub fn destination(&self, format: ExportFormat) -> &Path {
        match format {
            ExportFormat::Xlsx => &self.config.xlsx_path,
            ExportFormat::Csv => &self.config.csv_dir,
            ExportFormat::Sql => &self.config.sql_path,
        }
    }

    pub fn export_to_xlsx(&mut self, store: &DataStore) -> bool {
        self.export(ExportFormat::Xlsx, store)
    }

    pub fn export_to_csv(&mut self, store: &DataStore) -> bool {
        self.export(ExportFormat::Csv, store)
    }

    pub fn export_to_sql(&mut self, store: &DataStore) -> bool {
        self.export(ExportFormat::Sql, store)
    }

    /// Exports to the configured destination for `format`.
    pub fn export(&mut self, format: ExportFormat, store: &DataStore) -> bool {
        let destination = self.destination(format).to_path_buf();
        self.export_to(format, store, &destination)
    }

    pub fn export_to(&mut self, format: ExportFormat, store: &DataStore, destination: &Path) -> bool {
        let snapshot = ExportSnapshot::capture(store);
        self.run(exporter_for(format), &snapshot, destination)
    }

    /// Runs every format against one snapshot. Each format is attempted even
    /// if an earlier one failed; true only if all succeed.
    pub fn export_all(&mut self, store: &DataStore) -> bool {
        let snapshot = ExportSnapshot::capture(store);
        let results: Vec<bool> = ExportFormat::ALL
            .into_iter()
            .map(|format| {
                let destination = self.destination(format).to_path_buf();
                self.run(exporter_for(format), &snapshot, &destination)
            })
            .collect();
        results.into_iter().all(|ok| ok)
    }

    pub fn run(&mut self, exporter: &dyn Exporter, snapshot: &ExportSnapshot, destination: &Path) -> bool {
        let format = exporter.format();
        let success = match exporter.export(snapshot, destination) {
            Ok(()) => {
                info!(%format, destination = %destination.display(), "Export completed");
                true
            }
            Err(e) => {
                error!(%format, destination = %destination.display(), error = %e, "Export failed");
                false
            }
        };
        self.log.record(format, destination, success);
        success
    }
}
