/// Error type for a single export run.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
