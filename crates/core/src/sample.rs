//! Seed data loaded at startup.

use crate::row::{Priority, Row, RowId, Status};

#[allow(clippy::too_many_arguments)]
fn row(
    id: u32,
    job_request: &str,
    submitted: &str,
    status: Status,
    submitter: &str,
    url: &str,
    assigned: &str,
    priority: Priority,
    due_date: &str,
    est_value: &str,
) -> Row {
    Row {
        id: RowId(id),
        job_request: job_request.to_string(),
        submitted: submitted.to_string(),
        status,
        submitter: submitter.to_string(),
        url: url.to_string(),
        assigned: assigned.to_string(),
        priority,
        due_date: due_date.to_string(),
        est_value: est_value.to_string(),
    }
}

/// The five job-request rows the grid starts with.
pub fn sample_rows() -> Vec<Row> {
    vec![
        row(
            1,
            "Launch social media campaign for pro...",
            "15-11-2024",
            Status::InProcess,
            "Aisha Patel",
            "www.aishapatel...",
            "Sophie Choudhury",
            Priority::Medium,
            "20-11-2024",
            "6,200,000",
        ),
        row(
            2,
            "Update press kit for company redesign",
            "28-10-2024",
            Status::NeedToStart,
            "Irfan Khan",
            "www.irfankhanp...",
            "Tejas Pandey",
            Priority::High,
            "30-10-2024",
            "3,500,000",
        ),
        row(
            3,
            "Finalize user testing feedback for app...",
            "05-12-2024",
            Status::InProcess,
            "Mark Johnson",
            "www.markjohns...",
            "Rachel Lee",
            Priority::Medium,
            "10-12-2024",
            "4,750,000",
        ),
        row(
            4,
            "Design new features for the website",
            "10-01-2025",
            Status::Complete,
            "Emily Green",
            "www.emilygreen...",
            "Tom Wright",
            Priority::Low,
            "15-01-2025",
            "5,900,000",
        ),
        row(
            5,
            "Prepare financial report for Q4",
            "25-01-2025",
            Status::Blocked,
            "Jessica Brown",
            "www.jessicabro...",
            "Kevin Smith",
            Priority::Low,
            "30-01-2025",
            "2,800,000",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_ids_unique() {
        let rows = sample_rows();
        let ids: HashSet<RowId> = rows.iter().map(|r| r.id).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(ids.len(), 5);
    }
}
