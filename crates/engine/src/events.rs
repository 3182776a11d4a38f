//! User-facing notifications.
//!
//! The grid never owns a global toast queue. Every component that reports
//! something is handed a `NotificationSink`; the presentation layer decides
//! how to show it, and tests collect it with `NotificationLog`.

use std::cell::RefCell;
use std::rc::Rc;

/// What happened. Maps to a toast title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyKind {
    EditApplied,
    EditStarted,
    SortApplied,
    FilterApplied,
    RowInserted,
    RowRemoved,
    Undo,
    Redo,
    ExportComplete,
    ExportFailed,
    FormulaSubmitted,
    TabChanged,
    /// Cut, copy or paste through the workspace clipboard
    Clipboard,
    /// Toolbar or context-menu action without grid semantics (share, import, ...)
    Action,
}

impl NotifyKind {
    pub fn title(self) -> &'static str {
        match self {
            NotifyKind::EditApplied => "Cell Updated",
            NotifyKind::EditStarted => "Cell Editing",
            NotifyKind::SortApplied => "Sort Applied",
            NotifyKind::FilterApplied => "Filters Applied",
            NotifyKind::RowInserted => "Row Inserted",
            NotifyKind::RowRemoved => "Row Deleted",
            NotifyKind::Undo => "Action Undone",
            NotifyKind::Redo => "Action Redone",
            NotifyKind::ExportComplete => "Export Successful",
            NotifyKind::ExportFailed => "Export Failed",
            NotifyKind::FormulaSubmitted => "Formula Submitted",
            NotifyKind::TabChanged => "Tab Changed",
            NotifyKind::Clipboard => "Clipboard",
            NotifyKind::Action => "Action Triggered",
        }
    }

    /// Failures are shown with destructive styling.
    pub fn is_failure(self) -> bool {
        matches!(self, NotifyKind::ExportFailed)
    }
}

impl std::fmt::Display for NotifyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// A single delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotifyKind,
    pub message: String,
}

/// Receiver for notifications.
pub trait NotificationSink {
    fn notify(&mut self, kind: NotifyKind, message: &str);
}

impl<F> NotificationSink for F
where
    F: FnMut(NotifyKind, &str),
{
    fn notify(&mut self, kind: NotifyKind, message: &str) {
        self(kind, message)
    }
}

/// Forwards notifications to the `log` facade. Default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, kind: NotifyKind, message: &str) {
        if kind.is_failure() {
            log::warn!("{}: {}", kind, message);
        } else {
            log::info!("{}: {}", kind, message);
        }
    }
}

/// Cloneable handle to one sink, for when several components report to the
/// same destination.
#[derive(Clone)]
pub struct SharedSink(Rc<RefCell<dyn NotificationSink>>);

impl SharedSink {
    pub fn new(sink: impl NotificationSink + 'static) -> Self {
        Self(Rc::new(RefCell::new(sink)))
    }
}

impl NotificationSink for SharedSink {
    fn notify(&mut self, kind: NotifyKind, message: &str) {
        self.0.borrow_mut().notify(kind, message);
    }
}

/// Shared in-memory collector. Clones share the same buffer, so one clone
/// can be installed as the sink while another is inspected.
#[derive(Debug, Default, Clone)]
pub struct NotificationLog {
    entries: Rc<RefCell<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries.borrow().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries.borrow().last().cloned()
    }

    /// Messages of one kind, oldest first.
    pub fn messages(&self, kind: NotifyKind) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn count(&self, kind: NotifyKind) -> usize {
        self.entries.borrow().iter().filter(|n| n.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl NotificationSink for NotificationLog {
    fn notify(&mut self, kind: NotifyKind, message: &str) {
        self.entries.borrow_mut().push(Notification {
            kind,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_clones_share_buffer() {
        let log = NotificationLog::new();
        let mut sink = log.clone();

        sink.notify(NotifyKind::SortApplied, "Sorted in ascending order");
        sink.notify(NotifyKind::Undo, "Undid cell edit");
        sink.notify(NotifyKind::SortApplied, "Sorted in descending order");

        assert_eq!(log.len(), 3);
        assert_eq!(log.count(NotifyKind::SortApplied), 2);
        assert_eq!(
            log.messages(NotifyKind::SortApplied),
            vec!["Sorted in ascending order", "Sorted in descending order"]
        );
        assert_eq!(log.last().map(|n| n.kind), Some(NotifyKind::SortApplied));

        log.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |kind: NotifyKind, message: &str| seen.push((kind, message.to_string()));
            sink.notify(NotifyKind::TabChanged, "Switched to abc");
        }
        assert_eq!(seen, vec![(NotifyKind::TabChanged, "Switched to abc".to_string())]);
    }

    #[test]
    fn test_shared_sink_forwards() {
        let log = NotificationLog::new();
        let mut a = SharedSink::new(log.clone());
        let mut b = a.clone();
        a.notify(NotifyKind::EditApplied, "one");
        b.notify(NotifyKind::Redo, "two");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_titles() {
        assert_eq!(NotifyKind::EditApplied.to_string(), "Cell Updated");
        assert!(NotifyKind::ExportFailed.is_failure());
        assert!(!NotifyKind::ExportComplete.is_failure());
    }
}
