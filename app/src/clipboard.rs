//! Clipboard operations for the workspace.
//!
//! One cell's text at a time. Cut and paste go through
//! `Grid::commit_field_edit`, so each is a single undoable edit.

use taskgrid_core::{CellRef, GridError};
use taskgrid_engine::NotifyKind;

use crate::workspace::Workspace;

/// Text copied from a cell, plus where it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellClipboard {
    text: Option<String>,
    source: Option<CellRef>,
}

impl CellClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn source(&self) -> Option<CellRef> {
        self.source
    }

    /// Paste is only offered once something was copied.
    pub fn has_content(&self) -> bool {
        self.text.is_some()
    }

    fn store(&mut self, cell: CellRef, text: String) {
        self.text = Some(text);
        self.source = Some(cell);
    }
}

impl Workspace {
    /// Copy the selected cell's value. None without a selection.
    pub fn copy(&mut self) -> Option<String> {
        let cell = self.grid.selection()?;
        let text = self.grid.cell_value(cell)?;
        self.clipboard.store(cell, text.clone());
        self.notify(NotifyKind::Clipboard, "Copied to clipboard".to_string());
        Some(text)
    }

    /// Copy the selected cell, then empty it. The clipboard is left alone
    /// when the cell cannot be edited.
    pub fn cut(&mut self) -> Result<Option<String>, GridError> {
        let Some(cell) = self.grid.selection() else {
            return Ok(None);
        };
        let text = self.grid.cell_value(cell).unwrap_or_default();
        self.grid.commit_field_edit(cell.row, cell.field, String::new())?;

        self.clipboard.store(cell, text.clone());
        self.notify(NotifyKind::Clipboard, "Cut to clipboard".to_string());
        Ok(Some(text))
    }

    /// Write the clipboard text into the selected cell. Returns false when
    /// nothing is selected or nothing was copied.
    pub fn paste(&mut self) -> Result<bool, GridError> {
        let (Some(cell), Some(text)) = (self.grid.selection(), self.clipboard.text()) else {
            return Ok(false);
        };
        let text = text.to_string();
        self.grid.commit_field_edit(cell.row, cell.field, text.as_str())?;
        self.notify(NotifyKind::Clipboard, format!("Pasted: {}", text));
        Ok(true)
    }
}
