//! Workspace state behind the spreadsheet view: the grid plus the chrome
//! around it (sheet tabs, toolbar, formula bar, context menu, clipboard and
//! presence overlay).
//!
//! Rendering is not done here. A view layer reads this state and forwards
//! user input to `Workspace`.

pub mod clipboard;
pub mod context_menu;
pub mod formula_bar;
pub mod tabs;
pub mod toolbar;
pub mod workspace;

pub use clipboard::CellClipboard;
pub use context_menu::ContextMenuAction;
pub use formula_bar::FormulaBar;
pub use tabs::{SheetTab, SheetTabs};
pub use toolbar::{Toolbar, ToolbarAction};
pub use workspace::Workspace;
