// JSON export

use taskgrid_core::{GridError, Row};

/// Render rows as a pretty-printed (2-space) array of field-keyed objects.
pub fn export(rows: &[&Row]) -> Result<String, GridError> {
    serde_json::to_string_pretty(rows).map_err(|e| GridError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskgrid_core::sample::sample_rows;

    #[test]
    fn test_json_export() {
        let rows = sample_rows();
        let refs: Vec<&Row> = rows.iter().collect();
        let content = export(&refs).unwrap();

        assert!(content.starts_with("[\n  {\n    \"id\": 1,\n"));

        let parsed: Vec<Row> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, rows);

        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value[0]["jobRequest"], "Launch social media campaign for pro...");
        assert_eq!(value[1]["status"], "Need to start");
        assert_eq!(value[4]["estValue"], "2,800,000");
    }

    #[test]
    fn test_json_empty() {
        assert_eq!(export(&[]).unwrap(), "[]");
    }
}
