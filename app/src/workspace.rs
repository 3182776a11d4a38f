//! The spreadsheet workspace: one grid plus the chrome that drives it.
//!
//! Every component reports through the same `SharedSink`, so a view layer
//! installs one toast handler and sees grid, tab, toolbar and export events
//! in order.

use taskgrid_config::Settings;
use taskgrid_core::{Field, GridError, RowId};
use taskgrid_engine::formula::{is_formula, FormulaContext, FormulaEvaluator};
use taskgrid_engine::presence::{PresenceFeed, PresenceOverlay};
use taskgrid_engine::{Grid, NotificationSink, NotifyKind, SharedSink, SortDirection};
use taskgrid_io::{serialize, ExportFormat, ExportOptions, ExportPayload};

use crate::clipboard::CellClipboard;
use crate::formula_bar::FormulaBar;
use crate::tabs::SheetTabs;
use crate::toolbar::{Toolbar, ToolbarAction};

pub struct Workspace {
    pub(crate) grid: Grid,
    tabs: SheetTabs,
    toolbar: Toolbar,
    formula_bar: FormulaBar,
    pub(crate) clipboard: CellClipboard,
    presence: PresenceOverlay,
    settings: Settings,
    sink: SharedSink,
}

impl Workspace {
    /// Workspace over the sample job requests.
    pub fn new(settings: Settings, sink: impl NotificationSink + 'static) -> Self {
        Self::with_grid(Grid::with_sample_data(), settings, sink)
    }

    pub fn with_grid(mut grid: Grid, settings: Settings, sink: impl NotificationSink + 'static) -> Self {
        let sink = SharedSink::new(sink);
        grid.set_sink(sink.clone());
        grid.set_history_limit(settings.history_max_entries);
        for (key, &width) in &settings.column_widths {
            match Field::from_key(key) {
                Some(field) => {
                    grid.resize_column(field, width);
                }
                None => log::warn!("grid.columnWidths: unknown column {}", key),
            }
        }

        Self {
            grid,
            tabs: SheetTabs::new(),
            toolbar: Toolbar::new(),
            formula_bar: FormulaBar::default(),
            clipboard: CellClipboard::new(),
            presence: PresenceOverlay::new(),
            settings,
            sink,
        }
    }

    /// Swap the formula evaluator behind the formula bar.
    pub fn with_evaluator(mut self, evaluator: impl FormulaEvaluator + 'static) -> Self {
        self.formula_bar = FormulaBar::new(evaluator);
        self
    }

    pub(crate) fn notify(&mut self, kind: NotifyKind, message: String) {
        self.sink.notify(kind, &message);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn tabs(&self) -> &SheetTabs {
        &self.tabs
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn formula_bar(&self) -> &FormulaBar {
        &self.formula_bar
    }

    pub fn formula_bar_mut(&mut self) -> &mut FormulaBar {
        &mut self.formula_bar
    }

    pub fn clipboard(&self) -> &CellClipboard {
        &self.clipboard
    }

    pub fn presence(&self) -> &PresenceOverlay {
        &self.presence
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // =========================================================================
    // Tabs
    // =========================================================================

    pub fn activate_tab(&mut self, id: &str) -> bool {
        if !self.tabs.activate(id) {
            log::debug!("ignoring unknown tab {}", id);
            return false;
        }
        self.notify(NotifyKind::TabChanged, format!("Switched to {}", id));
        true
    }

    /// Add a sheet tab, make it active, and return its id.
    pub fn add_tab(&mut self) -> String {
        let id = self.tabs.add_tab().id.clone();
        self.notify(NotifyKind::TabChanged, format!("Switched to {}", id));
        id
    }

    // =========================================================================
    // Toolbar
    // =========================================================================

    pub fn dispatch(&mut self, action: ToolbarAction) {
        if let ToolbarAction::Sort(direction) = action {
            self.sort_from_toolbar(direction);
        } else if let Some(message) = action.message() {
            self.notify(NotifyKind::Action, message.to_string());
        }
    }

    /// Dispatch by button id. Unknown ids are reported and return false.
    pub fn dispatch_id(&mut self, id: &str) -> bool {
        match ToolbarAction::from_id(id) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => {
                self.notify(NotifyKind::Action, format!("Action: {}", id));
                false
            }
        }
    }

    /// Sort by the selected cell's column, in `requested` or else the
    /// toggled direction.
    fn sort_from_toolbar(&mut self, requested: Option<SortDirection>) {
        let direction = self.toolbar.resolve_sort(requested);
        match self.grid.selection() {
            Some(cell) => self.grid.apply_sort(cell.field, direction),
            None => self.notify(
                NotifyKind::SortApplied,
                format!("Sorted in {}ending order", direction.as_str()),
            ),
        }
    }

    // =========================================================================
    // Formula bar
    // =========================================================================

    pub fn reference(&self) -> String {
        FormulaBar::reference(self.grid.selection())
    }

    pub fn formula_text(&self) -> String {
        self.formula_bar.text(&self.grid)
    }

    /// Commit `input` to the selected cell as typed. `=` input is also handed
    /// to the evaluator and the outcome reported; the stored value is still
    /// the input text. Returns false when nothing is selected.
    pub fn submit_formula(&mut self, input: &str) -> Result<bool, GridError> {
        let Some(cell) = self.grid.selection() else {
            return Ok(false);
        };
        self.formula_bar.cancel();

        let current_value = self.grid.cell_value(cell).unwrap_or_default();
        self.grid.commit_field_edit(cell.row, cell.field, input)?;

        if is_formula(input) {
            let ctx = FormulaContext {
                cell,
                current_value: &current_value,
            };
            let message = match self.formula_bar.evaluator().evaluate(input, &ctx) {
                Ok(value) => format!("Formula {} evaluated to {}", input, value),
                Err(e) => format!("Formula {} stored as text ({})", input, e),
            };
            self.notify(NotifyKind::FormulaSubmitted, message);
        }
        Ok(true)
    }

    /// Enter in the formula bar: submit the draft, if any.
    pub fn submit_draft(&mut self) -> Result<bool, GridError> {
        match self.formula_bar.take_draft() {
            Some(draft) => self.submit_formula(&draft),
            None => Ok(false),
        }
    }

    // =========================================================================
    // Export
    // =========================================================================

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            include_headers: self.settings.export_include_headers,
            row_filter: None,
            filename: self.settings.export_default_filename.clone(),
        }
    }

    /// Export the displayed rows with the configured defaults.
    pub fn export(&mut self, format: ExportFormat) -> Result<ExportPayload, GridError> {
        let options = self.export_options();
        self.export_with(format, &options)
    }

    /// Export only the given rows (still in display order).
    pub fn export_rows(
        &mut self,
        format: ExportFormat,
        ids: impl IntoIterator<Item = RowId>,
    ) -> Result<ExportPayload, GridError> {
        let options = ExportOptions {
            row_filter: Some(ids.into_iter().collect()),
            ..self.export_options()
        };
        self.export_with(format, &options)
    }

    fn export_with(
        &mut self,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<ExportPayload, GridError> {
        let result = serialize(self.grid.rows_in_display_order(), format, options);
        match &result {
            Ok(payload) => self.notify(
                NotifyKind::ExportComplete,
                format!("Data exported as {} format ({})", format, payload.filename),
            ),
            Err(e) => self.notify(NotifyKind::ExportFailed, e.to_string()),
        }
        result
    }

    // =========================================================================
    // Presence
    // =========================================================================

    /// Poll `feed` if presence is enabled and the poll interval has elapsed.
    /// Returns true when the overlay was refreshed.
    pub fn refresh_presence(&mut self, feed: &mut dyn PresenceFeed, now_ms: u64) -> bool {
        if !self.settings.presence_enabled {
            self.presence.clear();
            return false;
        }
        if !self
            .presence
            .is_due(now_ms, self.settings.presence_poll_interval_ms)
        {
            return false;
        }
        self.presence.refresh(feed, now_ms);
        true
    }
}
