//! Formula bar capability.
//!
//! Formula input (`=`-prefixed) is handed to a `FormulaEvaluator`. No real
//! evaluator ships with the grid; `UnimplementedEvaluator` reports that
//! plainly instead of pretending a result was computed.

use taskgrid_core::{CellRef, GridError};

/// Where a formula was entered and what the cell held before.
#[derive(Debug, Clone, Copy)]
pub struct FormulaContext<'a> {
    pub cell: CellRef,
    pub current_value: &'a str,
}

pub trait FormulaEvaluator {
    /// Evaluate `formula` (including the leading `=`) to a display value.
    fn evaluate(&self, formula: &str, ctx: &FormulaContext<'_>) -> Result<String, GridError>;
}

/// Placeholder evaluator: every formula is unsupported.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnimplementedEvaluator;

impl FormulaEvaluator for UnimplementedEvaluator {
    fn evaluate(&self, formula: &str, _ctx: &FormulaContext<'_>) -> Result<String, GridError> {
        Err(GridError::FormulaUnsupported(formula.to_string()))
    }
}

/// Formula-bar input starting with `=`.
pub fn is_formula(input: &str) -> bool {
    input.starts_with('=')
}
