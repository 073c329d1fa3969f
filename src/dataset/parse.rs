use std::collections::HashSet;
use std::io::Read;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use super::types::Dataset;
use crate::error::RankError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse uploaded CSV bytes into a [`Dataset`].
///
/// A leading UTF-8 byte order mark is ignored.
pub fn parse_csv_bytes(bytes: &[u8]) -> Result<Dataset, RankError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    parse_csv(bytes)
}

/// Parse CSV from any reader.
///
/// The first record is the header row. Header names are trimmed; cells are
/// kept verbatim. Fails with `MalformedFile` on invalid UTF-8, rows whose
/// width differs from the header, an empty input, or duplicate header names.
pub fn parse_csv<R: Read>(reader: R) -> Result<Dataset, RankError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| RankError::MalformedFile(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() {
        return Err(RankError::MalformedFile(
            "file is empty or has no header row".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for header in &headers {
        if !seen.insert(header.as_str()) {
            return Err(RankError::MalformedFile(format!(
                "duplicate column '{}'",
                header
            )));
        }
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| RankError::MalformedFile(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(columns = headers.len(), rows = rows.len(), "parsed csv upload");

    Ok(Dataset::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let input = "Name,Education,Experience,Skills\nA,3,5,2\nB,1,2,9\n";
        let ds = parse_csv_bytes(input.as_bytes()).unwrap();
        assert_eq!(ds.headers(), &["Name", "Education", "Experience", "Skills"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.cell(1, "Skills"), Some("9"));
    }

    #[test]
    fn test_parse_quoted_fields() {
        let input = "Name,Education,Experience,Skills\n\"Doe, Jane\",3,5,2\n";
        let ds = parse_csv_bytes(input.as_bytes()).unwrap();
        assert_eq!(ds.cell(0, "Name"), Some("Doe, Jane"));
    }

    #[test]
    fn test_parse_strips_bom() {
        let mut input = UTF8_BOM.to_vec();
        input.extend_from_slice(b"Name,Skills\nA,1\n");
        let ds = parse_csv_bytes(&input).unwrap();
        assert_eq!(ds.headers()[0], "Name");
    }

    #[test]
    fn test_parse_trims_headers_not_cells() {
        let input = "Name , Skills\n A , 1\n";
        let ds = parse_csv_bytes(input.as_bytes()).unwrap();
        assert_eq!(ds.headers(), &["Name", "Skills"]);
        assert_eq!(ds.cell(0, "Name"), Some(" A "));
    }

    #[test]
    fn test_parse_header_only() {
        let ds = parse_csv_bytes(b"Name,Education,Experience,Skills\n").unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.headers().len(), 4);
    }

    #[test]
    fn test_parse_empty_input() {
        let err = parse_csv_bytes(b"").unwrap_err();
        assert!(matches!(err, RankError::MalformedFile(_)));
    }

    #[test]
    fn test_parse_ragged_rows() {
        let input = "Name,Education\nA,1\nB,2,3\n";
        let err = parse_csv_bytes(input.as_bytes()).unwrap_err();
        assert!(matches!(err, RankError::MalformedFile(_)));
    }

    #[test]
    fn test_parse_invalid_utf8() {
        let input = b"Name,Education\n\xff\xfe,1\n";
        let err = parse_csv_bytes(input).unwrap_err();
        assert!(matches!(err, RankError::MalformedFile(_)));
    }

    #[test]
    fn test_parse_duplicate_headers() {
        let err = parse_csv_bytes(b"Name,Skills,Skills\nA,1,2\n").unwrap_err();
        assert_eq!(
            err,
            RankError::MalformedFile("duplicate column 'Skills'".to_string())
        );
    }
}
