//! Grid state manager.
//!
//! Owns the rows, the row view (sort/filter), the active cell and the edit
//! history. Every operation runs to completion on the caller's thread in
//! response to one UI event; the presentation layer calls in and receives
//! notifications back through the injected sink.
//!
//! Rows are addressed by `RowId`, never by screen position, so a selection
//! or history entry stays valid when the view is re-sorted or filtered.

use rustc_hash::{FxHashMap, FxHashSet};

use taskgrid_core::sample::sample_rows;
use taskgrid_core::{default_columns, CellRef, Column, Direction, Field, GridError, Row, RowId};

use crate::events::{LogSink, NotificationSink, NotifyKind};
use crate::filter::{sort_permutation, FilterState, RowView, SortDirection, SortState};
use crate::history::{Edit, History};

/// Resolve one navigation step.
///
/// `row_order` and `column_order` are what the user currently sees. The
/// target index is clamped to the bounds (no wraparound). Returns `current`
/// unchanged when it is not part of the given orders.
pub fn next_cell(
    current: CellRef,
    row_order: &[RowId],
    column_order: &[Field],
    direction: Direction,
) -> CellRef {
    let (Some(row_pos), Some(col_pos)) = (
        row_order.iter().position(|&id| id == current.row),
        column_order.iter().position(|&f| f == current.field),
    ) else {
        return current;
    };

    let (dr, dc) = direction.delta();
    let clamp = |pos: usize, delta: isize, len: usize| -> usize {
        (pos as isize + delta).clamp(0, len as isize - 1) as usize
    };

    CellRef::new(
        row_order[clamp(row_pos, dr, row_order.len())],
        column_order[clamp(col_pos, dc, column_order.len())],
    )
}

pub struct Grid {
    /// Data space: rows in insertion order
    rows: Vec<Row>,
    /// RowId -> data row index
    index: FxHashMap<RowId, usize>,
    columns: Vec<Column>,
    row_view: RowView,
    sort: Option<SortState>,
    filter: FilterState,
    selection: Option<CellRef>,
    history: History,
    sink: Box<dyn NotificationSink>,
    /// Lowest id never handed out; only grows
    next_id: u32,
    /// Ids of removed rows. Never reused, so stale history cannot land on a
    /// different row.
    retired: FxHashSet<RowId>,
}

/// Narrowest a column can be resized to, in pixels
pub const MIN_COLUMN_WIDTH: f32 = 60.0;

/// Where a context-menu row insert lands relative to the selected row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPlacement {
    Above,
    Below,
}

impl Grid {
    /// Build a grid over `rows`, in the given insertion order.
    pub fn new(rows: Vec<Row>) -> Result<Self, GridError> {
        let mut seen = FxHashSet::default();
        for row in &rows {
            if !seen.insert(row.id) {
                return Err(GridError::DuplicateRow(row.id));
            }
        }
        Ok(Self::from_unique_rows(rows))
    }

    /// Grid seeded with the five sample job requests.
    pub fn with_sample_data() -> Self {
        Self::from_unique_rows(sample_rows())
    }

    /// Caller guarantees ids are unique.
    fn from_unique_rows(rows: Vec<Row>) -> Self {
        let index: FxHashMap<RowId, usize> = rows
            .iter()
            .enumerate()
            .map(|(data_row, row)| (row.id, data_row))
            .collect();
        let next_id = rows.iter().map(|r| r.id.raw() + 1).max().unwrap_or(1);

        Self {
            row_view: RowView::new(rows.len()),
            rows,
            index,
            columns: default_columns(),
            sort: None,
            filter: FilterState::default(),
            selection: None,
            history: History::new(),
            sink: Box::new(LogSink),
            next_id,
            retired: FxHashSet::default(),
        }
    }

    /// Replace the notification sink.
    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.set_sink(sink);
        self
    }

    pub fn set_sink(&mut self, sink: impl NotificationSink + 'static) {
        self.sink = Box::new(sink);
    }

    /// Cap the undo stack; None = unbounded. Clears existing history.
    pub fn set_history_limit(&mut self, max_entries: Option<usize>) {
        self.history = History::with_limit(max_entries);
    }

    fn notify(&mut self, kind: NotifyKind, message: String) {
        self.sink.notify(kind, &message);
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    /// Rows in display order (sorted, filtered rows skipped).
    pub fn rows_in_display_order(&self) -> Vec<&Row> {
        self.row_view
            .visible_data_rows()
            .map(|data_row| &self.rows[data_row])
            .collect()
    }

    pub fn display_row_ids(&self) -> Vec<RowId> {
        self.row_view
            .visible_data_rows()
            .map(|data_row| self.rows[data_row].id)
            .collect()
    }

    /// Rows in insertion order, including filtered-out rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.index.get(&id).map(|&data_row| &self.rows[data_row])
    }

    pub fn cell_value(&self, cell: CellRef) -> Option<String> {
        self.row(cell.row).map(|row| row.get(cell.field))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, field: Field) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == field)
    }

    pub fn column_order(&self) -> Vec<Field> {
        self.columns.iter().map(|c| c.key).collect()
    }

    pub fn selection(&self) -> Option<CellRef> {
        self.selection
    }

    /// Value of the active cell, empty when nothing is selected.
    pub fn selected_value(&self) -> String {
        self.selection
            .and_then(|cell| self.cell_value(cell))
            .unwrap_or_default()
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn is_filtered(&self) -> bool {
        self.filter.is_active()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_row_count(&self) -> usize {
        self.row_view.visible_count()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // =========================================================================
    // Selection & navigation
    // =========================================================================

    /// Select a cell by wire key. Unknown rows or columns are ignored.
    pub fn select_cell(&mut self, row: RowId, key: &str) -> bool {
        match Field::from_key(key) {
            Some(field) => self.select(CellRef::new(row, field)),
            None => false,
        }
    }

    /// Select a cell. Ignored if the row is unknown or hidden by a filter.
    pub fn select(&mut self, cell: CellRef) -> bool {
        let Some(&data_row) = self.index.get(&cell.row) else {
            return false;
        };
        if !self.row_view.is_data_row_visible(data_row) {
            return false;
        }
        self.selection = Some(cell);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Move the active cell one step. Returns true if it changed.
    pub fn move_selection(&mut self, direction: Direction) -> bool {
        let Some(current) = self.selection else {
            return false;
        };

        let next = next_cell(current, &self.display_row_ids(), &self.column_order(), direction);
        if next == current {
            return false;
        }

        log::debug!("selection {} -> {}", current, next);
        self.selection = Some(next);
        true
    }

    /// Signal that the user wants to edit the active cell (Enter/double-click).
    /// Does not change any data.
    pub fn activate_selection(&mut self) -> Option<CellRef> {
        let cell = self.selection?;
        self.notify(
            NotifyKind::EditStarted,
            format!("Started editing Row {}, Column {}", cell.row, cell.field),
        );
        Some(cell)
    }

    /// Drop the selection if its row is gone or no longer shown.
    fn revalidate_selection(&mut self) {
        if let Some(cell) = self.selection {
            let shown = self
                .index
                .get(&cell.row)
                .is_some_and(|&data_row| self.row_view.is_data_row_visible(data_row));
            if !shown {
                self.selection = None;
            }
        }
    }

    // =========================================================================
    // Sort & filter (view transforms, not undoable)
    // =========================================================================

    pub fn apply_sort(&mut self, field: Field, direction: SortDirection) {
        let permutation = sort_permutation(&self.rows, field, direction);
        self.row_view.apply_sort(permutation);
        self.sort = Some(SortState { field, direction });

        log::debug!("sorted by {} {}", field, direction.as_str());
        self.notify(
            NotifyKind::SortApplied,
            format!("Sorted by {} in {}ending order", field.label(), direction.as_str()),
        );
    }

    /// Sort by wire key.
    pub fn apply_sort_by_key(&mut self, key: &str, direction: SortDirection) -> Result<(), GridError> {
        let field = Field::from_key(key).ok_or_else(|| GridError::InvalidColumn(key.to_string()))?;
        self.apply_sort(field, direction);
        Ok(())
    }

    /// Back to insertion order.
    pub fn clear_sort(&mut self) {
        self.row_view.clear_sort();
        self.sort = None;
    }

    pub fn apply_filter(&mut self, filter: FilterState) {
        let mask = filter.build_mask(&self.rows);
        self.row_view.apply_filter(mask);
        self.filter = filter;
        self.revalidate_selection();

        log::debug!(
            "filter applied: {} of {} rows visible",
            self.row_view.visible_count(),
            self.rows.len()
        );
        let count = self.filter.active_count();
        self.notify(
            NotifyKind::FilterApplied,
            format!("Applied {} filter{}", count, if count == 1 { "" } else { "s" }),
        );
    }

    pub fn clear_filter(&mut self) {
        self.apply_filter(FilterState::default());
    }

    // =========================================================================
    // Edits & history
    // =========================================================================

    /// Commit a value typed into a cell, addressed by wire key.
    pub fn commit_edit(
        &mut self,
        row: RowId,
        key: &str,
        new_value: impl Into<String>,
    ) -> Result<(), GridError> {
        if !self.index.contains_key(&row) {
            return Err(GridError::NotFound(row));
        }
        let field = Field::from_key(key).ok_or_else(|| GridError::InvalidColumn(key.to_string()))?;
        self.commit_field_edit(row, field, new_value)
    }

    /// Commit a value to a typed field. Values are stored as given.
    pub fn commit_field_edit(
        &mut self,
        row: RowId,
        field: Field,
        new_value: impl Into<String>,
    ) -> Result<(), GridError> {
        let &data_row = self.index.get(&row).ok_or(GridError::NotFound(row))?;
        let new_value = new_value.into();

        let target = &mut self.rows[data_row];
        let old_value = target.get(field);
        target.set(field, new_value.clone())?;

        self.history.record(Edit {
            row,
            field,
            old_value,
            new_value,
        });
        self.notify(
            NotifyKind::EditApplied,
            format!("Updated {} for row {}", field, row),
        );
        Ok(())
    }

    /// Write a history value back. False if the row no longer exists.
    fn restore(&mut self, row: RowId, field: Field, value: String) -> bool {
        let Some(&data_row) = self.index.get(&row) else {
            log::warn!("history entry for missing row {} skipped", row);
            return false;
        };
        match self.rows[data_row].set(field, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("history entry for {}:{} skipped: {}", row, field, e);
                false
            }
        }
    }

    /// Revert the most recent edit. Selection is untouched.
    /// Returns false when there was nothing to undo or the edit's row is gone.
    pub fn undo(&mut self) -> bool {
        let Some(edit) = self.history.undo() else {
            return false;
        };
        let applied = self.restore(edit.row, edit.field, edit.old_value);
        if applied {
            self.notify(
                NotifyKind::Undo,
                format!("Undid edit of {} for row {}", edit.field, edit.row),
            );
        }
        applied
    }

    /// Re-apply the most recently undone edit. Selection is untouched.
    pub fn redo(&mut self) -> bool {
        let Some(edit) = self.history.redo() else {
            return false;
        };
        let applied = self.restore(edit.row, edit.field, edit.new_value);
        if applied {
            self.notify(
                NotifyKind::Redo,
                format!("Redid edit of {} for row {}", edit.field, edit.row),
            );
        }
        applied
    }

    /// Empty the selected cell as one undoable edit. Returns false without a
    /// selection.
    pub fn clear_selected_cell(&mut self) -> Result<bool, GridError> {
        let Some(cell) = self.selection else {
            return Ok(false);
        };
        self.commit_field_edit(cell.row, cell.field, String::new())?;
        Ok(true)
    }

    // =========================================================================
    // Row lifecycle
    // =========================================================================

    /// Add a row at the end of insertion order. An active sort is re-applied
    /// so the row lands in place; an active filter decides its visibility.
    /// Ids in use or previously removed are rejected.
    pub fn insert_row(&mut self, row: Row) -> Result<RowId, GridError> {
        self.check_fresh_id(row.id)?;
        let data_row = self.rows.len();
        Ok(self.place_row(row, data_row, data_row))
    }

    /// Append an empty row with the next unused id.
    pub fn append_blank_row(&mut self) -> RowId {
        let row = Row::blank(self.allocate_id());
        let data_row = self.rows.len();
        self.place_row(row, data_row, data_row)
    }

    /// Insert an empty row directly above or below the selected row.
    /// Returns None without a selection. The selection stays where it was.
    pub fn insert_row_near_selection(&mut self, placement: RowPlacement) -> Option<RowId> {
        let anchor = self.selection?.row;
        let &anchor_data = self.index.get(&anchor)?;
        let anchor_view = self.row_view.view_position(anchor_data)?;
        let (data_row, view_row) = match placement {
            RowPlacement::Above => (anchor_data, anchor_view),
            RowPlacement::Below => (anchor_data + 1, anchor_view + 1),
        };

        let row = Row::blank(self.allocate_id());
        let id = self.place_row(row, data_row, view_row);

        let side = match placement {
            RowPlacement::Above => "above",
            RowPlacement::Below => "below",
        };
        self.notify(
            NotifyKind::RowInserted,
            format!("Inserted row {} {} row {}", id, side, anchor),
        );
        Some(id)
    }

    fn check_fresh_id(&self, id: RowId) -> Result<(), GridError> {
        if self.index.contains_key(&id) || self.retired.contains(&id) {
            return Err(GridError::DuplicateRow(id));
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Store a row whose id is known to be fresh.
    fn place_row(&mut self, row: Row, data_row: usize, view_row: usize) -> RowId {
        let id = row.id;
        let visible = !self.filter.is_active() || self.filter.passes(&row);
        self.next_id = self.next_id.max(id.raw() + 1);

        for idx in self.index.values_mut() {
            if *idx >= data_row {
                *idx += 1;
            }
        }
        self.index.insert(id, data_row);
        self.rows.insert(data_row, row);
        self.row_view.insert_row(data_row, view_row, visible);

        if let Some(sort) = self.sort {
            let permutation = sort_permutation(&self.rows, sort.field, sort.direction);
            self.row_view.apply_sort(permutation);
        }
        id
    }

    /// Delete a row. A selection on it is cleared; history entries that
    /// reference it become no-ops. Its id is never handed out again.
    pub fn remove_row(&mut self, id: RowId) -> Option<Row> {
        let data_row = self.index.remove(&id)?;
        let row = self.rows.remove(data_row);
        for idx in self.index.values_mut() {
            if *idx > data_row {
                *idx -= 1;
            }
        }
        self.row_view.delete_row(data_row);
        self.retired.insert(id);
        self.revalidate_selection();
        Some(row)
    }

    /// Delete the selected row.
    pub fn remove_selected_row(&mut self) -> Option<Row> {
        let id = self.selection?.row;
        let row = self.remove_row(id)?;
        self.notify(NotifyKind::RowRemoved, format!("Deleted row {}", id));
        Some(row)
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Set a column's width, clamped to `MIN_COLUMN_WIDTH`. Returns the width
    /// applied. Not an edit; history is untouched.
    pub fn resize_column(&mut self, field: Field, width: f32) -> f32 {
        let width = if width.is_nan() { MIN_COLUMN_WIDTH } else { width.max(MIN_COLUMN_WIDTH) };
        if let Some(column) = self.columns.iter_mut().find(|c| c.key == field) {
            column.width = width;
        }
        width
    }
}
