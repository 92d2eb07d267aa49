//! Delimited table loading
//!
//!     A [`Table`] is the raw row/column view of one input file. Row 0 is the label row and
//!     is never interpreted; consumers start at row 1 (see [`Table::data_rows`]).
//!
//!     Parsing is deliberately dumb: one record per line, fields split on `,`, no quoting and
//!     no escaping. Rows may have different lengths; checking arity is the formatter's job,
//!     since only it knows how many columns it reads. A blank line is an empty row, so row
//!     indexes always match line positions in the file.
//!
//!     Column addressing is 1-based and row addressing is 0-based, matching how the input
//!     spreadsheets are usually described ("column 3 of the first data row" is `cell(3, 1)`).

use crate::error::TableError;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// An immutable, fully loaded table of string cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

/// Borrowed view of a single row, carrying its 0-based index for error reporting
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    index: usize,
    cells: &'a [String],
}

impl Table {
    /// Load a table from a file.
    ///
    /// Fails with [`TableError::NotFoundOrEmpty`] when the path is absent or has zero bytes.
    /// Only the byte size is checked: a file holding nothing but whitespace is parsed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        match fs::metadata(path) {
            Ok(meta) if meta.len() > 0 => {}
            Ok(_) => return Err(TableError::NotFoundOrEmpty(path.to_path_buf())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(TableError::NotFoundOrEmpty(path.to_path_buf()))
            }
            Err(source) => {
                return Err(TableError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }

        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file).map_err(|source| TableError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), data_rows = table.data_len(), "loaded table");
        Ok(table)
    }

    /// Parse a table from in-memory text
    pub fn from_string(source: &str) -> Result<Self, csv::Error> {
        let rows = source
            .lines()
            .map(parse_line)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Table { rows })
    }

    fn from_reader<R: Read>(mut reader: R) -> Result<Self, csv::Error> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Self::from_string(&source)
    }

    /// Number of rows, header included
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row { index, cells })
    }

    /// All rows after the header, with their 0-based indexes (first one is 1)
    pub fn data_rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, cells)| Row { index, cells })
    }

    /// Number of rows after the header
    pub fn data_len(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Cell at a 1-based column of a 0-based row
    pub fn cell(&self, column: usize, row: usize) -> Result<&str, TableError> {
        self.row(row)
            .ok_or(TableError::IndexOutOfRange { row, column })?
            .cell(column)
    }
}

/// Split one line into cells. The csv reader skips blank lines, so each line gets its own
/// reader and an empty line stays an empty row.
fn parse_line(line: &str) -> Result<Vec<String>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

impl<'a> Row<'a> {
    /// 0-based position of this row in its table
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of cells in this row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at a 1-based column
    pub fn cell(&self, column: usize) -> Result<&'a str, TableError> {
        column
            .checked_sub(1)
            .and_then(|i| self.cells.get(i))
            .map(String::as_str)
            .ok_or(TableError::IndexOutOfRange {
                row: self.index,
                column,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const SAMPLE: &str = "edge,exip,intip\nEdgeA,10.0.0.1,192.168.1.10\nEdgeA,10.0.0.2,192.168.1.11\n";

    #[test]
    fn parses_rows_and_cells() {
        let table = Table::from_string(SAMPLE).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.data_len(), 2);
        assert_eq!(table.cell(1, 0).unwrap(), "edge");
        assert_eq!(table.cell(2, 1).unwrap(), "10.0.0.1");
        assert_eq!(table.cell(3, 2).unwrap(), "192.168.1.11");
    }

    #[test]
    fn cell_out_of_range() {
        let table = Table::from_string(SAMPLE).unwrap();
        assert!(matches!(
            table.cell(4, 1),
            Err(TableError::IndexOutOfRange { row: 1, column: 4 })
        ));
        assert!(matches!(
            table.cell(1, 3),
            Err(TableError::IndexOutOfRange { row: 3, column: 1 })
        ));
        assert!(matches!(
            table.cell(0, 1),
            Err(TableError::IndexOutOfRange { row: 1, column: 0 })
        ));
    }

    #[test]
    fn quotes_are_plain_characters() {
        let table = Table::from_string("h\n\"a,b\"\n").unwrap();
        let row = table.row(1).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row.cell(1).unwrap(), "\"a");
        assert_eq!(row.cell(2).unwrap(), "b\"");
    }

    #[test]
    fn rows_may_differ_in_length() {
        let table = Table::from_string("a,b,c\n1,2\n1,2,3,4\n").unwrap();
        let lens: Vec<_> = table.data_rows().map(|r| r.len()).collect();
        assert_eq!(lens, vec![2, 4]);
    }

    #[test]
    fn crlf_line_endings() {
        let table = Table::from_string("a,b\r\n1,2\r\n").unwrap();
        assert_eq!(table.cell(2, 1).unwrap(), "2");
    }

    #[test]
    fn blank_lines_are_empty_rows() {
        let table = Table::from_string("h\n\nEdgeA,1.1.1.1\n").unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.row(1).unwrap().is_empty());
        assert_eq!(table.cell(1, 2).unwrap(), "EdgeA");
        assert!(matches!(
            table.cell(1, 1),
            Err(TableError::IndexOutOfRange { row: 1, column: 1 })
        ));
    }

    #[test]
    fn blank_line_between_rows_keeps_indexes() {
        let table = Table::from_string("a,b\n1,2\n\n\n3,4\n").unwrap();
        let lens: Vec<_> = table.data_rows().map(|r| (r.index(), r.len())).collect();
        assert_eq!(lens, vec![(1, 2), (2, 0), (3, 0), (4, 2)]);
    }

    #[test]
    fn data_rows_skip_the_header() {
        let table = Table::from_string(SAMPLE).unwrap();
        let indexes: Vec<_> = table.data_rows().map(|r| r.index()).collect();
        assert_eq!(indexes, vec![1, 2]);
    }

    #[test]
    fn missing_file_is_not_found_or_empty() {
        let dir = tempdir().unwrap();
        let err = Table::from_path(dir.path().join("nope.csv")).unwrap_err();
        assert!(err.is_skip());
    }

    #[test]
    fn zero_byte_file_is_not_found_or_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        File::create(&path).unwrap();
        assert!(Table::from_path(&path).unwrap_err().is_skip());
    }

    #[test]
    fn whitespace_only_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"   \n").unwrap();
        let table = Table::from_path(&path).unwrap();
        assert_eq!(table.data_len(), 0);
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("datasnat.csv");
        fs::write(&path, SAMPLE).unwrap();
        let table = Table::from_path(&path).unwrap();
        assert_eq!(table, Table::from_string(SAMPLE).unwrap());
    }
}
