//! Column schema.
//!
//! The grid has a fixed set of fields. `Field` is the typed key; `Column`
//! carries the display metadata (label, width) for one field. The order of
//! `Field::ALL` is the column order everywhere: rendering, navigation and
//! export.

use serde::{Deserialize, Serialize};

/// One schema key of a task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Id,
    JobRequest,
    Submitted,
    Status,
    Submitter,
    Url,
    Assigned,
    Priority,
    DueDate,
    EstValue,
}

/// How values of a field compare when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain or enumerated text
    Text,
    /// Integer or currency with thousands separators
    Number,
    /// `DD-MM-YYYY`
    Date,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 10] = [
        Field::Id,
        Field::JobRequest,
        Field::Submitted,
        Field::Status,
        Field::Submitter,
        Field::Url,
        Field::Assigned,
        Field::Priority,
        Field::DueDate,
        Field::EstValue,
    ];

    /// Wire key, as used in export headers and by the presentation layer.
    pub fn key(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::JobRequest => "jobRequest",
            Field::Submitted => "submitted",
            Field::Status => "status",
            Field::Submitter => "submitter",
            Field::Url => "url",
            Field::Assigned => "assigned",
            Field::Priority => "priority",
            Field::DueDate => "dueDate",
            Field::EstValue => "estValue",
        }
    }

    /// Resolve a wire key. Keys are case-sensitive.
    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Id => "#",
            Field::JobRequest => "Job Request",
            Field::Submitted => "Submitted",
            Field::Status => "Status",
            Field::Submitter => "Submitter",
            Field::Url => "URL",
            Field::Assigned => "Assigned",
            Field::Priority => "Priority",
            Field::DueDate => "Due Date",
            Field::EstValue => "Est. Value",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Id | Field::EstValue => FieldKind::Number,
            Field::Submitted | Field::DueDate => FieldKind::Date,
            _ => FieldKind::Text,
        }
    }

    /// Position in column order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The row id is assigned once and never edited.
    pub fn is_read_only(self) -> bool {
        matches!(self, Field::Id)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Display descriptor for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub key: Field,
    pub label: String,
    /// Width in pixels
    pub width: f32,
}

impl Column {
    pub fn new(key: Field, width: f32) -> Self {
        Self {
            key,
            label: key.label().to_string(),
            width,
        }
    }
}

/// Default pixel width per field.
fn default_width(field: Field) -> f32 {
    match field {
        Field::Id => 48.0,
        Field::JobRequest => 320.0,
        Field::Submitter | Field::Assigned => 160.0,
        Field::Url => 192.0,
        Field::Priority => 112.0,
        Field::Submitted | Field::Status | Field::DueDate | Field::EstValue => 128.0,
    }
}

/// The fixed schema, in column order.
pub fn default_columns() -> Vec<Column> {
    Field::ALL
        .iter()
        .map(|&f| Column::new(f, default_width(f)))
        .collect()
}
