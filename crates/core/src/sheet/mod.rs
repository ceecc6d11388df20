//! Tabular shaping of records into the exported workbook.

mod cell;
mod project;
mod schema;
mod table;
mod workbook;
mod xlsx;

pub use cell::Cell;
pub use project::{project, DATE_COLUMNS};
pub use schema::{ColumnDef, ColumnSchema, SchemaError, REGISTRO_COLUMNS, REGISTRO_LABELS};
pub use table::Table;
pub use workbook::{assemble, Sheet, Workbook, FORESTAL_SHEET, REGISTRO_SHEET};
pub use xlsx::{write_xlsx, SheetError, MAX_CELL_CHARS};
