use std::path::Path;

use crate::error::ExportError;
use crate::log::ExportFormat;
use crate::rows::ExportSnapshot;

/// One output format. Implementations only read the snapshot.
pub trait Exporter {
    fn format(&self) -> ExportFormat;

    /// Writes the snapshot to `destination`, a file or a directory depending
    /// on the format.
    fn export(&self, snapshot: &ExportSnapshot, destination: &Path) -> Result<(), ExportError>;
}
