// CSV export

use taskgrid_core::{Field, Row};

/// Wrap a field in double quotes iff it contains a comma.
/// Embedded quotes are written as-is, not doubled.
fn quote_field(value: &str) -> String {
    if value.contains(',') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

/// Render rows as CSV text: optional header of column keys, then one line
/// per row with fields in column order. Lines are joined with `\n`.
pub fn export(rows: &[&Row], include_headers: bool) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(rows.len() + 1);

    if include_headers {
        let header: Vec<&str> = Field::ALL.iter().map(|f| f.key()).collect();
        lines.push(header.join(","));
    }

    for row in rows {
        let record: Vec<String> = Field::ALL
            .iter()
            .map(|&f| quote_field(&row.get(f)))
            .collect();
        lines.push(record.join(","));
    }

    lines.join("\n")
}
