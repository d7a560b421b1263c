// SPDX-License-Identifier: MIT OR Apache-2.0
//! Row bookkeeping for one construction pass.

use std::collections::HashMap;

/// Last row used in each column.
///
/// A fresh value is created for every construction pass and never
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    last_row: HashMap<usize, usize>,
}

impl LayoutState {
    /// Create an empty layout state
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next row in a column: 0 for a new column, else last + 1
    pub fn next_row(&mut self, column: usize) -> usize {
        let row = self.last_row.get(&column).map_or(0, |last| last + 1);
        self.last_row.insert(column, row);
        row
    }

    /// Last row claimed in a column
    pub fn last_row(&self, column: usize) -> Option<usize> {
        self.last_row.get(&column).copied()
    }

    /// Number of columns touched so far
    pub fn column_count(&self) -> usize {
        self.last_row.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_contiguous_per_column() {
        let mut layout = LayoutState::new();
        assert_eq!(layout.next_row(0), 0);
        assert_eq!(layout.next_row(1), 0);
        assert_eq!(layout.next_row(0), 1);
        assert_eq!(layout.next_row(0), 2);
        assert_eq!(layout.next_row(1), 1);
        assert_eq!(layout.last_row(0), Some(2));
        assert_eq!(layout.last_row(5), None);
        assert_eq!(layout.column_count(), 2);
    }

    #[test]
    fn test_fresh_state_restarts_at_zero() {
        let mut layout = LayoutState::new();
        layout.next_row(3);
        layout.next_row(3);

        let mut layout = LayoutState::new();
        assert_eq!(layout.next_row(3), 0);
    }
}
