//! Excel workbook export, one sheet per table.

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};
use std::path::Path;

use crate::error::ExportError;
use crate::exporter::Exporter;
use crate::log::ExportFormat;
use crate::rows::{Cell, ExportSnapshot, TableRow};

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookExporter;

impl Exporter for WorkbookExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }

    fn export(&self, snapshot: &ExportSnapshot, destination: &Path) -> Result<(), ExportError> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        write_sheet(&mut workbook, &header, &snapshot.users)?;
        write_sheet(&mut workbook, &header, &snapshot.students)?;
        write_sheet(&mut workbook, &header, &snapshot.teachers)?;
        write_sheet(&mut workbook, &header, &snapshot.assignments)?;

        workbook.save(destination)?;
        Ok(())
    }
}

fn write_sheet<R: TableRow>(workbook: &mut Workbook, header: &Format, rows: &[R]) -> Result<(), ExportError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(R::TABLE)?;

    for (col, title) in R::HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as ColNum, *title, header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as RowNum;
        for (col, cell) in row.cells().iter().enumerate() {
            let c = col as ColNum;
            match cell {
                Cell::Text(s) => sheet.write_string(r, c, s.as_str())?,
                Cell::Integer(n) => sheet.write_number(r, c, *n as f64)?,
                Cell::Float(x) => sheet.write_number(r, c, *x)?,
            };
        }
    }
    Ok(())
}
