use crate::reader::{RawCell, SheetGrid};

/// A sheet re-read with one of its rows used as column names.
///
/// Data rows are every row below the header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

impl HeaderedTable {
    /// Split `grid` at `header_row`. Column names are the normalized header
    /// cells.
    pub fn from_grid(grid: &SheetGrid, header_row: usize) -> Self {
        let columns = grid
            .rows
            .get(header_row)
            .map(|row| row.iter().map(RawCell::normalized).collect())
            .unwrap_or_default();
        let rows = grid.rows.iter().skip(header_row + 1).cloned().collect();
        Self { columns, rows }
    }

    /// Position of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell of data row `row` in column `col`; short rows read as empty.
    pub fn value(&self, row: usize, col: usize) -> &RawCell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&RawCell::Empty)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_grid_splits_at_header() {
        let grid = SheetGrid::new(
            "Base",
            vec![
                vec![RawCell::Text("Obra X".to_string())],
                vec![RawCell::Text(" Item".to_string()), RawCell::Text("un".to_string())],
                vec![RawCell::Text("Areia".to_string())],
            ],
        );

        let table = HeaderedTable::from_grid(&grid, 1);
        assert_eq!(table.columns, vec!["Item", "un"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.column_index("un"), Some(1));
        assert_eq!(table.value(0, 1), &RawCell::Empty);
    }

    #[test]
    fn test_duplicate_column_names_resolve_to_first() {
        let grid = SheetGrid::new(
            "Base",
            vec![vec![
                RawCell::Text("Item".to_string()),
                RawCell::Text("Item".to_string()),
            ]],
        );
        let table = HeaderedTable::from_grid(&grid, 0);
        assert_eq!(table.column_index("Item"), Some(0));
        assert!(table.is_empty());
    }
}
