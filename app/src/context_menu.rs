//! Cell context menu.

use taskgrid_core::GridError;
use taskgrid_engine::{NotifyKind, RowPlacement};

use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextMenuAction {
    Cut,
    Copy,
    Paste,
    InsertRowAbove,
    InsertRowBelow,
    DeleteRow,
    FormatCell,
    AddComment,
    ClearContents,
}

impl ContextMenuAction {
    /// Menu order; separators fall after Paste and after DeleteRow.
    pub const ALL: [ContextMenuAction; 9] = [
        ContextMenuAction::Cut,
        ContextMenuAction::Copy,
        ContextMenuAction::Paste,
        ContextMenuAction::InsertRowAbove,
        ContextMenuAction::InsertRowBelow,
        ContextMenuAction::DeleteRow,
        ContextMenuAction::FormatCell,
        ContextMenuAction::AddComment,
        ContextMenuAction::ClearContents,
    ];

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }

    pub fn id(self) -> &'static str {
        match self {
            ContextMenuAction::Cut => "cut",
            ContextMenuAction::Copy => "copy",
            ContextMenuAction::Paste => "paste",
            ContextMenuAction::InsertRowAbove => "insert-row-above",
            ContextMenuAction::InsertRowBelow => "insert-row-below",
            ContextMenuAction::DeleteRow => "delete-row",
            ContextMenuAction::FormatCell => "format-cell",
            ContextMenuAction::AddComment => "add-comment",
            ContextMenuAction::ClearContents => "clear-contents",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContextMenuAction::Cut => "Cut",
            ContextMenuAction::Copy => "Copy",
            ContextMenuAction::Paste => "Paste",
            ContextMenuAction::InsertRowAbove => "Insert Row Above",
            ContextMenuAction::InsertRowBelow => "Insert Row Below",
            ContextMenuAction::DeleteRow => "Delete Row",
            ContextMenuAction::FormatCell => "Format Cell",
            ContextMenuAction::AddComment => "Add Comment",
            ContextMenuAction::ClearContents => "Clear Contents",
        }
    }

    pub fn shortcut(self) -> Option<&'static str> {
        match self {
            ContextMenuAction::Cut => Some("Ctrl+X"),
            ContextMenuAction::Copy => Some("Ctrl+C"),
            ContextMenuAction::Paste => Some("Ctrl+V"),
            _ => None,
        }
    }
}

impl Workspace {
    /// Run a context-menu item against the selected cell. Returns true when
    /// the item did something; items with nothing selected (or an empty
    /// clipboard, for Paste) return false.
    pub fn context_action(&mut self, action: ContextMenuAction) -> Result<bool, GridError> {
        match action {
            ContextMenuAction::Cut => Ok(self.cut()?.is_some()),
            ContextMenuAction::Copy => Ok(self.copy().is_some()),
            ContextMenuAction::Paste => self.paste(),
            ContextMenuAction::InsertRowAbove => {
                Ok(self.grid.insert_row_near_selection(RowPlacement::Above).is_some())
            }
            ContextMenuAction::InsertRowBelow => {
                Ok(self.grid.insert_row_near_selection(RowPlacement::Below).is_some())
            }
            ContextMenuAction::DeleteRow => Ok(self.grid.remove_selected_row().is_some()),
            ContextMenuAction::ClearContents => self.grid.clear_selected_cell(),
            ContextMenuAction::FormatCell | ContextMenuAction::AddComment => {
                self.notify(NotifyKind::Action, format!("Action: {}", action.id()));
                Ok(true)
            }
        }
    }

    /// Dispatch by menu item id. Unknown ids are logged and ignored.
    pub fn context_action_id(&mut self, id: &str) -> Result<bool, GridError> {
        match ContextMenuAction::from_id(id) {
            Some(action) => self.context_action(action),
            None => {
                log::debug!("ignoring unknown context menu item {}", id);
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for action in ContextMenuAction::ALL {
            assert_eq!(ContextMenuAction::from_id(action.id()), Some(action));
        }
        assert_eq!(ContextMenuAction::from_id("separator"), None);
    }

    #[test]
    fn test_only_clipboard_items_have_shortcuts() {
        let with_shortcut: Vec<&str> = ContextMenuAction::ALL
            .iter()
            .filter(|a| a.shortcut().is_some())
            .map(|a| a.label())
            .collect();
        assert_eq!(with_shortcut, vec!["Cut", "Copy", "Paste"]);
    }
}
