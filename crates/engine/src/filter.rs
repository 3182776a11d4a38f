//! Sort and Filter - Row View Layer
//!
//! This module provides the view layer that maps between:
//! - View space (what the user sees, affected by sort/filter)
//! - Data space (rows in insertion order, index 0..N-1)
//!
//! Key invariants:
//! - Navigation and rendering use view space
//! - Row storage and edits use data space (addressed by RowId)
//! - visible_mask is indexed by DATA row (not view row)
//! - Sorting is a view transform; it never touches row contents

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use taskgrid_core::{Field, FieldKind, Row};

// =============================================================================
// RowView: The core view layer mapping
// =============================================================================

/// Row view layer: maps between view space and data space
#[derive(Debug, Clone)]
pub struct RowView {
    /// Maps view_row index -> data_row index
    /// Identity by default: [0, 1, 2, ..., N-1]
    row_order: Vec<usize>,

    /// Inverse map: data_row -> view_row
    data_to_view_map: Vec<usize>,

    /// Visibility mask indexed by DATA row
    visible_mask: Vec<bool>,

    /// Cached list of visible VIEW row indices, in view order
    visible_rows: Vec<usize>,
}

impl RowView {
    /// Initialize identity mapping for N rows
    pub fn new(row_count: usize) -> Self {
        Self {
            row_order: (0..row_count).collect(),
            data_to_view_map: (0..row_count).collect(),
            visible_mask: vec![true; row_count],
            visible_rows: (0..row_count).collect(),
        }
    }

    /// Number of visible rows
    pub fn visible_count(&self) -> usize {
        self.visible_rows.len()
    }

    pub fn is_data_row_visible(&self, data_row: usize) -> bool {
        data_row < self.visible_mask.len() && self.visible_mask[data_row]
    }

    /// View position of a data row, shown or not
    pub fn view_position(&self, data_row: usize) -> Option<usize> {
        self.data_to_view_map.get(data_row).copied()
    }

    /// Data rows in display order, hidden rows skipped
    pub fn visible_data_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible_rows.iter().map(move |&v| self.row_order[v])
    }

    // -------------------------------------------------------------------------
    // Internal rebuilders
    // -------------------------------------------------------------------------

    fn rebuild_inverse_map(&mut self) {
        if self.data_to_view_map.len() != self.row_order.len() {
            self.data_to_view_map.resize(self.row_order.len(), 0);
        }
        for (view_row, &data_row) in self.row_order.iter().enumerate() {
            if data_row < self.data_to_view_map.len() {
                self.data_to_view_map[data_row] = view_row;
            }
        }
    }

    fn rebuild_visible_cache(&mut self) {
        self.visible_rows = self
            .row_order
            .iter()
            .enumerate()
            .filter_map(|(view_row, &data_row)| {
                if data_row < self.visible_mask.len() && self.visible_mask[data_row] {
                    Some(view_row)
                } else {
                    None
                }
            })
            .collect();
    }

    // -------------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------------

    /// Apply a sort permutation (maps new_view_row -> data_row)
    pub fn apply_sort(&mut self, permutation: Vec<usize>) {
        debug_assert_eq!(permutation.len(), self.row_order.len());
        self.row_order = permutation;
        self.rebuild_inverse_map();
        self.rebuild_visible_cache();
    }

    /// Reset to identity order (unsorted)
    pub fn clear_sort(&mut self) {
        self.row_order = (0..self.row_order.len()).collect();
        self.rebuild_inverse_map();
        self.rebuild_visible_cache();
    }

    /// Apply filter visibility (mask indexed by data row)
    pub fn apply_filter(&mut self, visible_mask: Vec<bool>) {
        debug_assert_eq!(visible_mask.len(), self.row_order.len());
        self.visible_mask = visible_mask;
        self.rebuild_visible_cache();
    }

    /// Register a row inserted at `data_row`, shown at `view_row`.
    /// Existing data rows at or after `data_row` shift up by one.
    pub fn insert_row(&mut self, data_row: usize, view_row: usize, visible: bool) {
        let data_row = data_row.min(self.row_order.len());
        let view_row = view_row.min(self.row_order.len());

        for data_row_ref in self.row_order.iter_mut() {
            if *data_row_ref >= data_row {
                *data_row_ref += 1;
            }
        }
        self.row_order.insert(view_row, data_row);
        self.visible_mask.insert(data_row, visible);

        self.rebuild_inverse_map();
        self.rebuild_visible_cache();
    }

    /// Handle row deletion at data_row index
    pub fn delete_row(&mut self, data_row: usize) {
        if data_row >= self.row_order.len() {
            return;
        }

        let view_row = self.data_to_view_map[data_row];
        self.row_order.remove(view_row);
        self.visible_mask.remove(data_row);
        self.data_to_view_map.remove(data_row);

        // Shift all data_row references > deleted index
        for data_row_ref in self.row_order.iter_mut() {
            if *data_row_ref > data_row {
                *data_row_ref -= 1;
            }
        }

        self.rebuild_inverse_map();
        self.rebuild_visible_cache();
    }
}

// =============================================================================
// SortKey: For stable, deterministic sorting
// =============================================================================

/// Comparable form of a field value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Number(OrderedFloat<f64>),
    Date(NaiveDate),
    /// Trimmed + lowercased
    Text(String),
    Blank,
}

/// Key for sorting rows
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    /// Parsed(0) < Text(1) < Blank(2), compared before the value
    pub type_rank: u8,
    pub value: SortValue,
}

impl SortKey {
    /// Build a key for a raw field value according to the field's kind.
    /// Numbers and dates that fail to parse fall back to text.
    pub fn from_value(kind: FieldKind, raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self { type_rank: 2, value: SortValue::Blank };
        }
        let parsed = match kind {
            FieldKind::Number => parse_number(trimmed).map(SortValue::Number),
            FieldKind::Date => parse_date(trimmed).map(SortValue::Date),
            FieldKind::Text => None,
        };
        match parsed {
            Some(value) => Self { type_rank: 0, value },
            None => Self {
                type_rank: 1,
                value: SortValue::Text(trimmed.to_lowercase()),
            },
        }
    }
}

/// Parse `6,200,000` style numbers. Non-finite results are rejected.
fn parse_number(s: &str) -> Option<OrderedFloat<f64>> {
    let cleaned: String = s.chars().filter(|c| *c != ',' && *c != '$').collect();
    let n: f64 = cleaned.trim().parse().ok()?;
    n.is_finite().then_some(OrderedFloat(n))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%d-%m-%Y").ok()
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Asc),
            "desc" | "descending" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Current sort state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: Field,
    pub direction: SortDirection,
}

// =============================================================================
// Sorting Logic
// =============================================================================

/// Compute the display permutation (view_row -> data_row) for sorting
/// `rows` by `field`.
///
/// # Invariants
/// - Stable: equal keys keep insertion (data) order in both directions
/// - Direction flips the whole key comparison (type rank, then value), never
///   the tie-break, so `Desc` is the exact reverse of `Asc` for distinct keys
/// - Ascending puts parsed values first, then text, then blanks
pub fn sort_permutation(rows: &[Row], field: Field, direction: SortDirection) -> Vec<usize> {
    let kind = field.kind();
    let mut keyed: Vec<(SortKey, usize)> = rows
        .iter()
        .enumerate()
        .map(|(data_row, row)| (SortKey::from_value(kind, &row.get(field)), data_row))
        .collect();

    keyed.sort_by(|(a, ai), (b, bi)| {
        let by_key = a.cmp(b);
        let by_key = match direction {
            SortDirection::Asc => by_key,
            SortDirection::Desc => by_key.reverse(),
        };
        by_key.then(ai.cmp(bi))
    });

    keyed.into_iter().map(|(_, data_row)| data_row).collect()
}

// =============================================================================
// FilterState: per-column text filters
// =============================================================================

/// Substring predicate for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFilter {
    pub value: String,
    pub case_sensitive: bool,
}

impl TextFilter {
    pub fn contains(value: impl Into<String>) -> Self {
        Self { value: value.into(), case_sensitive: false }
    }

    pub fn matches(&self, text: &str) -> bool {
        if self.case_sensitive {
            text.contains(&self.value)
        } else {
            text.to_lowercase().contains(&self.value.to_lowercase())
        }
    }
}

/// Active filters, keyed by field. A row passes when every filter matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub column_filters: BTreeMap<Field, TextFilter>,
}

impl FilterState {
    /// Build from field -> needle pairs. Empty needles are dropped.
    pub fn from_needles<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = (Field, S)>,
        S: Into<String>,
    {
        let column_filters = needles
            .into_iter()
            .map(|(field, needle)| (field, Into::<String>::into(needle)))
            .filter(|(_, needle)| !needle.trim().is_empty())
            .map(|(field, needle)| (field, TextFilter::contains(needle)))
            .collect();
        Self { column_filters }
    }

    pub fn is_active(&self) -> bool {
        !self.column_filters.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.column_filters.len()
    }

    pub fn passes(&self, row: &Row) -> bool {
        self.column_filters
            .iter()
            .all(|(&field, filter)| filter.matches(&row.get(field)))
    }

    /// Visibility mask indexed by data row
    pub fn build_mask(&self, rows: &[Row]) -> Vec<bool> {
        rows.iter().map(|row| self.passes(row)).collect()
    }
}
