// Export serialization
//
// Produces bytes plus a suggested filename. Getting them to the user
// (download prompt, file dialog) is the caller's job; `write_to_dir` is a
// convenience for file-based callers.

pub mod csv;
pub mod json;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use taskgrid_core::{GridError, Row, RowId};

/// Default base name for exported files
pub const DEFAULT_EXPORT_FILENAME: &str = "spreadsheet";

/// Requested export format. Only CSV and JSON are implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    /// Parse a format name (case-insensitive). Unknown names are unsupported.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(GridError::UnsupportedFormat(s.to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub include_headers: bool,
    /// Only rows with these ids; None = every row passed in
    pub row_filter: Option<HashSet<RowId>>,
    /// Base name without extension
    pub filename: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_headers: true,
            row_filter: None,
            filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

/// Serialized export ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub bytes: Vec<u8>,
    /// Suggested filename including extension
    pub filename: String,
    pub content_type: &'static str,
}

impl ExportPayload {
    /// Write the payload into `dir` under its suggested filename.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, GridError> {
        let path = dir.join(&self.filename);
        fs::write(&path, &self.bytes).map_err(|e| GridError::Export(e.to_string()))?;
        Ok(path)
    }
}

type Renderer = fn(&[&Row], &ExportOptions) -> Result<String, GridError>;

fn render_csv(rows: &[&Row], options: &ExportOptions) -> Result<String, GridError> {
    Ok(csv::export(rows, options.include_headers))
}

fn render_json(rows: &[&Row], _options: &ExportOptions) -> Result<String, GridError> {
    json::export(rows)
}

/// Serialize `rows` (in the order given) to `format`.
///
/// Unsupported formats fail before any work is done.
pub fn serialize<'a, I>(
    rows: I,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<ExportPayload, GridError>
where
    I: IntoIterator<Item = &'a Row>,
{
    let render: Renderer = match format {
        ExportFormat::Csv => render_csv,
        ExportFormat::Json => render_json,
        ExportFormat::Xlsx | ExportFormat::Pdf => {
            return Err(GridError::UnsupportedFormat(format.extension().to_string()));
        }
    };

    let included: Vec<&Row> = rows
        .into_iter()
        .filter(|row| {
            options
                .row_filter
                .as_ref()
                .map_or(true, |ids| ids.contains(&row.id))
        })
        .collect();

    let text = render(&included, options)?;

    log::debug!("exported {} row(s) as {}", included.len(), format);

    Ok(ExportPayload {
        bytes: text.into_bytes(),
        filename: format!("{}.{}", options.filename, format.extension()),
        content_type: format.content_type(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskgrid_core::sample::sample_rows;
    use tempfile::tempdir;

    #[test]
    fn test_parse_format() {
        assert_eq!(ExportFormat::parse("CSV"), Ok(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse("json"), Ok(ExportFormat::Json));
        assert_eq!(ExportFormat::parse("xlsx"), Ok(ExportFormat::Xlsx));
        assert_eq!(
            ExportFormat::parse("ods"),
            Err(GridError::UnsupportedFormat("ods".to_string()))
        );
    }

    #[test]
    fn test_serialize_csv_payload() {
        let rows = sample_rows();
        let payload = serialize(&rows, ExportFormat::Csv, &ExportOptions::default()).unwrap();

        assert_eq!(payload.filename, "spreadsheet.csv");
        assert_eq!(payload.content_type, "text/csv");
        let text = String::from_utf8(payload.bytes).unwrap();
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_serialize_row_filter_keeps_given_order() {
        let rows = sample_rows();
        let reversed: Vec<&Row> = rows.iter().rev().collect();
        let options = ExportOptions {
            include_headers: false,
            row_filter: Some([RowId(2), RowId(4)].into_iter().collect()),
            filename: "selection".to_string(),
        };

        let payload = serialize(reversed, ExportFormat::Csv, &options).unwrap();
        let text = String::from_utf8(payload.bytes).unwrap();
        let ids: Vec<&str> = text.lines().map(|l| l.split(',').next().unwrap()).collect();
        assert_eq!(ids, vec!["4", "2"]);
        assert_eq!(payload.filename, "selection.csv");
    }

    #[test]
    fn test_serialize_json_payload() {
        let rows = sample_rows();
        let options = ExportOptions {
            row_filter: Some([RowId(5)].into_iter().collect()),
            ..ExportOptions::default()
        };
        let payload = serialize(&rows, ExportFormat::Json, &options).unwrap();
        assert_eq!(payload.filename, "spreadsheet.json");

        let parsed: Vec<Row> = serde_json::from_slice(&payload.bytes).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, RowId(5));
    }

    #[test]
    fn test_unsupported_formats_fail() {
        let rows = sample_rows();
        for format in [ExportFormat::Xlsx, ExportFormat::Pdf] {
            let err = serialize(&rows, format, &ExportOptions::default()).unwrap_err();
            assert_eq!(err, GridError::UnsupportedFormat(format.extension().to_string()));
        }
    }

    #[test]
    fn test_unsupported_format_does_not_consume_rows() {
        let rows = sample_rows();
        let mut pulled = 0;
        let counting = rows.iter().inspect(|_| pulled += 1);

        assert!(serialize(counting, ExportFormat::Pdf, &ExportOptions::default()).is_err());
        assert_eq!(pulled, 0);
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempdir().unwrap();
        let rows = sample_rows();
        let payload = serialize(&rows, ExportFormat::Json, &ExportOptions::default()).unwrap();

        let path = payload.write_to_dir(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("spreadsheet.json"));
        assert_eq!(std::fs::read(&path).unwrap(), payload.bytes);
    }
}
