//! Spreadsheet export reader (CSV/TSV).

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::Row;
use crate::infrastructure::traits::RowSource;

/// Path value meaning "read from stdin".
pub const STDIN_PATH: &str = "-";

/// Reads `path,name,url` rows from a delimited file; the first row is a header.
#[derive(Debug, Clone)]
pub struct CsvRowSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvRowSource {
    pub fn new(path: impl Into<PathBuf>, delimiter: u8) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSource for CsvRowSource {
    fn read_rows(&self) -> io::Result<Vec<Row>> {
        if self.path.as_os_str() == STDIN_PATH {
            return read_rows_from(io::stdin().lock(), self.delimiter);
        }
        debug!("reading rows from {}", self.path.display());
        let file = File::open(&self.path)
            .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", self.path.display(), e)))?;
        read_rows_from(BufReader::new(file), self.delimiter)
    }
}

/// Parse delimited rows, skipping the header.
///
/// Short records are padded with empty cells, extra cells are ignored.
pub fn read_rows_from<R: Read>(reader: R, delimiter: u8) -> io::Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |i: usize| record.get(i).unwrap_or_default();
        rows.push(Row::new(cell(0), cell(1), cell(2)));
    }
    Ok(rows)
}

/// Parse a delimiter setting: a single ASCII character, or `tab` / `\t`.
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!(
                    "delimiter must be a single ASCII character or 'tab', got {value:?}"
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_csv_with_header_when_reading_then_header_skipped() {
        let data = "Path,Name,URL\nHR > Benefits,Dental,http://a\n,Google,http://google.com\n";
        let rows = read_rows_from(data.as_bytes(), b',').unwrap();
        assert_eq!(
            rows,
            vec![
                Row::new("HR > Benefits", "Dental", "http://a"),
                Row::new("", "Google", "http://google.com"),
            ]
        );
    }

    #[test]
    fn given_short_and_long_records_when_reading_then_padded_and_truncated() {
        let data = "Path,Name,URL\nTools,Only name\nA,B,http://c,extra\n";
        let rows = read_rows_from(data.as_bytes(), b',').unwrap();
        assert_eq!(rows[0], Row::new("Tools", "Only name", ""));
        assert_eq!(rows[1], Row::new("A", "B", "http://c"));
    }

    #[test]
    fn given_quoted_cell_with_delimiter_when_reading_then_kept_whole() {
        let data = "p\tn\tu\n\"A, B\"\tx\thttp://x\n";
        let rows = read_rows_from(data.as_bytes(), b'\t').unwrap();
        assert_eq!(rows[0].path, "A, B");
    }

    #[rstest]
    #[case(",", b',')]
    #[case(";", b';')]
    #[case("tab", b'\t')]
    #[case("\\t", b'\t')]
    fn given_valid_delimiter_when_parsing_then_byte(#[case] input: &str, #[case] expected: u8) {
        assert_eq!(parse_delimiter(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case(",,")]
    #[case("§")]
    fn given_invalid_delimiter_when_parsing_then_error(#[case] input: &str) {
        assert!(parse_delimiter(input).is_err());
    }
}
