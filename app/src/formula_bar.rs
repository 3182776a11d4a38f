//! Formula bar: reference label plus an input mirroring the active cell.

use taskgrid_core::CellRef;
use taskgrid_engine::formula::{FormulaEvaluator, UnimplementedEvaluator};
use taskgrid_engine::Grid;

/// Label shown when no cell is selected
pub const EMPTY_REFERENCE: &str = "A1";

pub struct FormulaBar {
    evaluator: Box<dyn FormulaEvaluator>,
    /// Text being typed; None = mirror the selected cell
    draft: Option<String>,
}

impl Default for FormulaBar {
    fn default() -> Self {
        Self::new(UnimplementedEvaluator)
    }
}

impl FormulaBar {
    pub fn new(evaluator: impl FormulaEvaluator + 'static) -> Self {
        Self {
            evaluator: Box::new(evaluator),
            draft: None,
        }
    }

    pub fn evaluator(&self) -> &dyn FormulaEvaluator {
        self.evaluator.as_ref()
    }

    /// Reference label for the selection, e.g. `Status2`.
    pub fn reference(selection: Option<CellRef>) -> String {
        selection
            .map(|cell| cell.reference())
            .unwrap_or_else(|| EMPTY_REFERENCE.to_string())
    }

    /// Input contents: the draft while editing, otherwise the selected value.
    pub fn text(&self, grid: &Grid) -> String {
        match &self.draft {
            Some(draft) => draft.clone(),
            None => grid.selected_value(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = Some(text.into());
    }

    /// Escape: drop the draft and mirror the cell again.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    pub fn take_draft(&mut self) -> Option<String> {
        self.draft.take()
    }
}
