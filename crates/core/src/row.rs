//! Task rows.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::field::Field;

/// Stable row identifier. Never reused or edited once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u32);

impl RowId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workflow status of a job request.
///
/// Values outside the known set are kept verbatim in `Other`; this layer
/// does not validate edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    InProcess,
    NeedToStart,
    Complete,
    Blocked,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::InProcess => "In-process",
            Status::NeedToStart => "Need to start",
            Status::Complete => "Complete",
            Status::Blocked => "Blocked",
            Status::Other(s) => s,
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "In-process" => Status::InProcess,
            "Need to start" => Status::NeedToStart,
            "Complete" => Status::Complete,
            "Blocked" => Status::Blocked,
            _ => Status::Other(s),
        }
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        match s {
            Status::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// Priority of a job request. Unknown values are kept in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Other(s) => s,
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "High" => Priority::High,
            "Medium" => Priority::Medium,
            "Low" => Priority::Low,
            _ => Priority::Other(s),
        }
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        match p {
            Priority::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// One record of the grid.
///
/// Dates are `DD-MM-YYYY` strings and `est_value` is a display currency
/// string (`"6,200,000"`); both are stored as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: RowId,
    pub job_request: String,
    pub submitted: String,
    pub status: Status,
    pub submitter: String,
    pub url: String,
    pub assigned: String,
    pub priority: Priority,
    pub due_date: String,
    pub est_value: String,
}

impl Row {
    /// A row with every editable field empty.
    pub fn blank(id: RowId) -> Self {
        Self {
            id,
            job_request: String::new(),
            submitted: String::new(),
            status: Status::Other(String::new()),
            submitter: String::new(),
            url: String::new(),
            assigned: String::new(),
            priority: Priority::Other(String::new()),
            due_date: String::new(),
            est_value: String::new(),
        }
    }

    /// Display value of a field.
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::Id => self.id.to_string(),
            Field::JobRequest => self.job_request.clone(),
            Field::Submitted => self.submitted.clone(),
            Field::Status => self.status.as_str().to_string(),
            Field::Submitter => self.submitter.clone(),
            Field::Url => self.url.clone(),
            Field::Assigned => self.assigned.clone(),
            Field::Priority => self.priority.as_str().to_string(),
            Field::DueDate => self.due_date.clone(),
            Field::EstValue => self.est_value.clone(),
        }
    }

    /// Overwrite a field. The id column is read-only.
    pub fn set(&mut self, field: Field, value: String) -> Result<(), GridError> {
        match field {
            Field::Id => return Err(GridError::ReadOnlyColumn(field)),
            Field::JobRequest => self.job_request = value,
            Field::Submitted => self.submitted = value,
            Field::Status => self.status = Status::from(value),
            Field::Submitter => self.submitter = value,
            Field::Url => self.url = value,
            Field::Assigned => self.assigned = value,
            Field::Priority => self.priority = Priority::from(value),
            Field::DueDate => self.due_date = value,
            Field::EstValue => self.est_value = value,
        }
        Ok(())
    }

    /// All field values in column order.
    pub fn values(&self) -> Vec<String> {
        Field::ALL.iter().map(|&f| self.get(f)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_known_and_other() {
        assert_eq!(Status::from("Blocked".to_string()), Status::Blocked);
        assert_eq!(
            Status::from("On hold".to_string()),
            Status::Other("On hold".to_string())
        );
        assert_eq!(Status::Other("On hold".to_string()).as_str(), "On hold");
    }

    #[test]
    fn test_set_and_get() {
        let mut row = Row::blank(RowId(7));
        row.set(Field::Priority, "High".to_string()).unwrap();
        row.set(Field::EstValue, "1,000".to_string()).unwrap();
        assert_eq!(row.priority, Priority::High);
        assert_eq!(row.get(Field::EstValue), "1,000");
        assert_eq!(row.get(Field::Id), "7");
    }

    #[test]
    fn test_id_is_read_only() {
        let mut row = Row::blank(RowId(1));
        let err = row.set(Field::Id, "9".to_string()).unwrap_err();
        assert!(matches!(err, GridError::ReadOnlyColumn(Field::Id)));
        assert_eq!(row.id, RowId(1));
    }

    #[test]
    fn test_json_shape() {
        let mut row = Row::blank(RowId(3));
        row.set(Field::Status, "Complete".to_string()).unwrap();
        row.set(Field::DueDate, "10-12-2024".to_string()).unwrap();
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["status"], "Complete");
        assert_eq!(value["dueDate"], "10-12-2024");

        let back: Row = serde_json::from_value(value).unwrap();
        assert_eq!(back, row);
    }
}
