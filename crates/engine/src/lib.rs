pub mod events;
pub mod filter;
pub mod formula;
pub mod grid;
pub mod history;
pub mod presence;

pub use events::{LogSink, Notification, NotificationLog, NotificationSink, NotifyKind, SharedSink};
pub use filter::{FilterState, SortDirection, SortState};
pub use grid::{Grid, RowPlacement, MIN_COLUMN_WIDTH};
pub use history::{Edit, History};
