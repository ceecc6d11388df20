use super::table::Table;

pub const REGISTRO_SHEET: &str = "registro";
pub const FORESTAL_SHEET: &str = "ListadoForestal";

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    table: Table,
}

impl Sheet {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
}

/// Ordered, named sheets.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }
}

/// Build the export workbook: `registro` first, then `ListadoForestal`.
///
/// The forestal sheet is always emitted; with no rows it is a blank sheet
/// with no columns either.
pub fn assemble(registro: Table, forestal: Table) -> Workbook {
    let forestal = if forestal.is_empty() {
        Table::empty()
    } else {
        forestal
    };
    Workbook {
        sheets: vec![
            Sheet::new(REGISTRO_SHEET, registro),
            Sheet::new(FORESTAL_SHEET, forestal),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{normalize, FieldMap, FieldValue};

    fn forestal_table() -> Table {
        let record = normalize(
            vec![("especie", FieldValue::from("Coigüe"))]
                .into_iter()
                .collect::<FieldMap>(),
            None,
        );
        Table::from_records(&[record])
    }

    #[test]
    fn both_sheets_in_order() {
        let workbook = assemble(Table::empty(), forestal_table());
        assert_eq!(workbook.sheet_names(), vec!["registro", "ListadoForestal"]);
        assert_eq!(workbook.sheet(FORESTAL_SHEET).unwrap().table().row_count(), 1);
    }

    #[test]
    fn empty_forestal_is_still_present() {
        let workbook = assemble(forestal_table(), Table::empty());
        let forestal = workbook.sheet(FORESTAL_SHEET).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["registro", "ListadoForestal"]);
        assert!(forestal.table().columns().is_empty());
        assert_eq!(forestal.table().row_count(), 0);
    }

    #[test]
    fn forestal_is_not_transformed() {
        let table = forestal_table();
        let workbook = assemble(Table::empty(), table.clone());
        assert_eq!(workbook.sheet(FORESTAL_SHEET).unwrap().table(), &table);
    }
}
