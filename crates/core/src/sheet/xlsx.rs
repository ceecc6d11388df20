use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet, XlsxError};
use thiserror::Error;

use super::cell::Cell;
use super::workbook::Workbook;

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATE_TIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Longest string a single XLSX cell can hold, in characters.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Integers beyond this magnitude do not survive conversion to f64.
const MAX_EXACT_INT: u64 = 1 << 53;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("xlsx error: {0}")]
    Xlsx(#[from] XlsxError),
}

struct Formats {
    header: Format,
    date: Format,
    date_time: Format,
}

/// Serialize a workbook to XLSX bytes. Headers go in the first row; empty
/// cells are not written. Text longer than [`MAX_CELL_CHARS`] is cut to fit.
pub fn write_xlsx(workbook: &Workbook) -> Result<Vec<u8>, SheetError> {
    let formats = Formats {
        header: Format::new().set_bold(),
        date: Format::new().set_num_format(DATE_FORMAT),
        date_time: Format::new().set_num_format(DATE_TIME_FORMAT),
    };

    let mut book = XlsxWorkbook::new();
    for sheet in workbook.sheets() {
        let worksheet = book.add_worksheet();
        worksheet.set_name(sheet.name())?;

        for (col, name) in sheet.table().columns().iter().enumerate() {
            worksheet.write_string_with_format(
                0,
                column_number(col)?,
                fit_cell(name),
                &formats.header,
            )?;
        }

        for (row, cells) in sheet.table().rows().iter().enumerate() {
            let row = u32::try_from(row + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            for (col, cell) in cells.iter().enumerate() {
                write_cell(worksheet, row, column_number(col)?, cell, &formats)?;
            }
        }
    }

    Ok(book.save_to_buffer()?)
}

fn column_number(col: usize) -> Result<u16, XlsxError> {
    u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
}

/// Cut `text` to at most [`MAX_CELL_CHARS`] characters on a char boundary.
fn fit_cell(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    formats: &Formats,
) -> Result<(), XlsxError> {
    match cell {
        Cell::Empty => {}
        Cell::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Cell::Int(i) if i.unsigned_abs() > MAX_EXACT_INT => {
            worksheet.write_string(row, col, i.to_string())?;
        }
        Cell::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        // NaN and infinities have no XLSX representation.
        Cell::Float(f) if !f.is_finite() => {}
        Cell::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        Cell::Text(text) => {
            worksheet.write_string(row, col, fit_cell(text))?;
        }
        Cell::DateTime(dt) => {
            worksheet.write_datetime_with_format(row, col, dt, &formats.date_time)?;
        }
        Cell::Date(date) => {
            worksheet.write_datetime_with_format(row, col, date, &formats.date)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    use crate::document::{normalize, FieldMap, FieldValue, Timestamp};
    use crate::sheet::{assemble, project, ColumnSchema, Table};

    fn workbook(forestal_rows: usize) -> Workbook {
        let ts = Timestamp::parse("2025-01-05T08:30:00-03:00").unwrap();
        let registro = normalize(
            vec![
                ("nameCamp", FieldValue::from("Norte")),
                ("startDateCamp", FieldValue::DateTime(ts)),
                ("plotArea", FieldValue::Float(500.0)),
                ("fireEvidence", FieldValue::Bool(false)),
                ("plotNumber", FieldValue::Int(i64::MAX)),
            ]
            .into_iter()
            .collect::<FieldMap>(),
            Some("r1"),
        );
        let forestal: Vec<_> = (0..forestal_rows)
            .map(|i| {
                normalize(
                    vec![("arbol", FieldValue::Int(i as i64))]
                        .into_iter()
                        .collect::<FieldMap>(),
                    None,
                )
            })
            .collect();
        assemble(
            project(&[registro], &ColumnSchema::registro().unwrap()),
            Table::from_records(&forestal),
        )
    }

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn sheets_are_written_in_fixed_order() {
        let bytes = write_xlsx(&workbook(3)).unwrap();
        let book = part(&bytes, "xl/workbook.xml");

        let registro = book.find(r#"name="registro""#).unwrap();
        let forestal = book.find(r#"name="ListadoForestal""#).unwrap();
        assert!(registro < forestal);
        assert_eq!(book.matches("<sheet ").count(), 2);
    }

    #[test]
    fn registro_header_row_has_every_label() {
        let bytes = write_xlsx(&workbook(0)).unwrap();
        let sheet = part(&bytes, "xl/worksheets/sheet1.xml");
        let strings = part(&bytes, "xl/sharedStrings.xml");

        // 45 columns end at AS.
        assert!(sheet.contains(r#"r="AS1""#));
        assert!(!sheet.contains(r#"r="AT1""#));
        for label in ColumnSchema::registro().unwrap().labels() {
            assert!(strings.contains(label), "missing header {label}");
        }
        // Oversized integers are kept exactly, as text.
        assert!(strings.contains(&i64::MAX.to_string()));
    }

    #[test]
    fn campaign_dates_use_date_only_format() {
        let bytes = write_xlsx(&workbook(0)).unwrap();
        let styles = part(&bytes, "xl/styles.xml");
        assert!(styles.contains(r#"formatCode="yyyy-mm-dd""#));
    }

    #[test]
    fn empty_forestal_sheet_has_no_rows() {
        let bytes = write_xlsx(&workbook(0)).unwrap();
        let sheet = part(&bytes, "xl/worksheets/sheet2.xml");
        assert!(!sheet.contains("<row"));
    }

    #[test]
    fn long_text_is_cut_on_char_boundary() {
        let text = "ñ".repeat(MAX_CELL_CHARS + 10);
        let fitted = fit_cell(&text);
        assert_eq!(fitted.chars().count(), MAX_CELL_CHARS);
        assert_eq!(fit_cell("corto"), "corto");
    }
}
