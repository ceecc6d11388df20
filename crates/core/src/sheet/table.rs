use crate::document::Record;

use super::cell::Cell;

/// Column names plus rows of cells; every row has one cell per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// A table with no rows and no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self { columns, rows }
    }

    /// Tabulate records as they are: columns are the union of all field
    /// names in first-seen order, missing fields become empty cells.
    ///
    /// Within one document "first-seen" is the order its fields were decoded
    /// in. Documents read from JSONB come back with keys sorted, so columns
    /// contributed by a single document appear alphabetically.
    pub fn from_records(records: &[Record]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for key in record.fields().keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).map(Cell::from).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Cell>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }

    /// Rename every column for which `rename` returns a new name.
    pub(crate) fn rename_columns<'a>(&mut self, rename: impl Fn(&str) -> Option<&'a str>) {
        for column in &mut self.columns {
            if let Some(label) = rename(column) {
                *column = label.to_string();
            }
        }
    }

    /// Apply `f` to every cell of column `index`.
    pub(crate) fn map_column(&mut self, index: usize, f: impl Fn(Cell) -> Cell) {
        for row in &mut self.rows {
            let cell = std::mem::take(&mut row[index]);
            row[index] = f(cell);
        }
    }
}
