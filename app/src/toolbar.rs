//! Toolbar buttons above the grid.

use taskgrid_engine::SortDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    /// None toggles the button; `sort-asc`/`sort-desc` pin a direction
    Sort(Option<SortDirection>),
    Filter,
    HideFields,
    CellView,
    Import,
    Export,
    Share,
    NewAction,
}

impl ToolbarAction {
    pub const ALL: [ToolbarAction; 8] = [
        ToolbarAction::Sort(None),
        ToolbarAction::Filter,
        ToolbarAction::HideFields,
        ToolbarAction::CellView,
        ToolbarAction::Import,
        ToolbarAction::Export,
        ToolbarAction::Share,
        ToolbarAction::NewAction,
    ];

    /// Parse a button id.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "sort" => Some(ToolbarAction::Sort(None)),
            "filter" => Some(ToolbarAction::Filter),
            "hide-fields" => Some(ToolbarAction::HideFields),
            "cell-view" => Some(ToolbarAction::CellView),
            "import" => Some(ToolbarAction::Import),
            "export" => Some(ToolbarAction::Export),
            "share" => Some(ToolbarAction::Share),
            "new-action" => Some(ToolbarAction::NewAction),
            _ => id
                .strip_prefix("sort-")
                .and_then(SortDirection::parse)
                .map(|direction| ToolbarAction::Sort(Some(direction))),
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            ToolbarAction::Sort(None) => "sort",
            ToolbarAction::Sort(Some(SortDirection::Asc)) => "sort-asc",
            ToolbarAction::Sort(Some(SortDirection::Desc)) => "sort-desc",
            ToolbarAction::Filter => "filter",
            ToolbarAction::HideFields => "hide-fields",
            ToolbarAction::CellView => "cell-view",
            ToolbarAction::Import => "import",
            ToolbarAction::Export => "export",
            ToolbarAction::Share => "share",
            ToolbarAction::NewAction => "new-action",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolbarAction::Sort(_) => "Sort",
            ToolbarAction::Filter => "Filter",
            ToolbarAction::HideFields => "Hide fields",
            ToolbarAction::CellView => "Cell view",
            ToolbarAction::Import => "Import",
            ToolbarAction::Export => "Export",
            ToolbarAction::Share => "Share",
            ToolbarAction::NewAction => "New Action",
        }
    }

    /// Notification text for actions that only open a panel or dialog.
    /// None for Sort, which acts on the grid.
    pub fn message(self) -> Option<&'static str> {
        match self {
            ToolbarAction::Sort(_) => None,
            ToolbarAction::Filter => Some("Advanced filter opened"),
            ToolbarAction::HideFields => Some("Field visibility toggled"),
            ToolbarAction::CellView => Some("Cell view mode toggled"),
            ToolbarAction::Import => Some("Import dialog opened"),
            ToolbarAction::Export => Some("Export options displayed"),
            ToolbarAction::Share => Some("Share dialog opened"),
            ToolbarAction::NewAction => Some("New action dialog opened"),
        }
    }
}

/// Toolbar state. The sort button remembers the direction it last applied.
#[derive(Debug, Clone, Copy)]
pub struct Toolbar {
    sort_direction: SortDirection,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self {
            sort_direction: SortDirection::Asc,
        }
    }
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction shown on the sort button
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Flip the sort button and return the direction to apply.
    pub fn toggle_sort(&mut self) -> SortDirection {
        self.sort_direction = self.sort_direction.toggled();
        self.sort_direction
    }

    /// Direction for a sort request: the requested one if given, otherwise
    /// the toggled one. The button shows the result either way.
    pub fn resolve_sort(&mut self, requested: Option<SortDirection>) -> SortDirection {
        match requested {
            Some(direction) => {
                self.sort_direction = direction;
                direction
            }
            None => self.toggle_sort(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for action in ToolbarAction::ALL {
            assert_eq!(ToolbarAction::from_id(action.id()), Some(action));
        }
        assert_eq!(
            ToolbarAction::from_id("sort-desc"),
            Some(ToolbarAction::Sort(Some(SortDirection::Desc)))
        );
        assert_eq!(ToolbarAction::from_id("sort-asc").map(|a| a.id()), Some("sort-asc"));
        assert_eq!(ToolbarAction::from_id("print"), None);
    }

    #[test]
    fn test_only_sort_has_no_message() {
        for action in ToolbarAction::ALL {
            assert_eq!(
                action.message().is_none(),
                matches!(action, ToolbarAction::Sort(_))
            );
        }
        assert_eq!(ToolbarAction::Sort(Some(SortDirection::Asc)).label(), "Sort");
    }

    #[test]
    fn test_sort_button_toggles() {
        let mut toolbar = Toolbar::new();
        assert_eq!(toolbar.sort_direction(), SortDirection::Asc);
        assert_eq!(toolbar.toggle_sort(), SortDirection::Desc);
        assert_eq!(toolbar.toggle_sort(), SortDirection::Asc);
    }

    #[test]
    fn test_explicit_sort_direction_is_kept() {
        let mut toolbar = Toolbar::new();
        assert_eq!(toolbar.resolve_sort(Some(SortDirection::Asc)), SortDirection::Asc);
        assert_eq!(toolbar.sort_direction(), SortDirection::Asc);
        assert_eq!(toolbar.resolve_sort(Some(SortDirection::Desc)), SortDirection::Desc);
        assert_eq!(toolbar.resolve_sort(None), SortDirection::Asc);
    }
}
