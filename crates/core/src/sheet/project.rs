use crate::document::Record;

use super::cell::Cell;
use super::schema::ColumnSchema;
use super::table::Table;

/// Labelled registro columns reduced to calendar dates.
pub const DATE_COLUMNS: [&str; 2] = [
    "Fecha de inicio de la campaña",
    "Fecha de término de la campaña",
];

/// Project registro records onto `schema`.
///
/// Every schema column is present in schema order; fields a record lacks
/// become empty cells. Columns are then relabelled and the campaign date
/// range columns are cut down to dates. Row order follows `records`.
pub fn project(records: &[Record], schema: &ColumnSchema) -> Table {
    let columns: Vec<String> = schema.columns().map(str::to_string).collect();
    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(column).map(Cell::from).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut table = Table::from_parts(columns, rows);
    table.rename_columns(|name| schema.label_for(name));

    for label in DATE_COLUMNS {
        if let Some(index) = table.column_index(label) {
            table.map_column(index, Cell::into_date);
        }
    }
    table
}
