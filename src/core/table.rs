//! In-memory CSV tables
//!
//! Both inputs are small exports, so they are read fully into memory before
//! any column is interpreted. Header names are matched after trimming and
//! lowercasing, the same way for every table.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::core::error::BomError;

/// One data row with the file line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// 1-based line number in the source file
    pub line: usize,
    pub cells: Vec<String>,
}

/// A delimited-text table with a single header record
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    header_map: HashMap<String, usize>,
    rows: Vec<TableRow>,
}

impl Table {
    /// Read a table from a file, taking record `header_row` (0-based) as the header
    pub fn from_path(name: &str, path: &Path, header_row: usize) -> Result<Self, BomError> {
        let file = File::open(path)?;
        Self::from_reader(name, BufReader::new(file), header_row)
    }

    /// Read a table from any reader, taking record `header_row` (0-based) as the header
    ///
    /// Records before the header are discarded. Records whose cells are all
    /// blank are dropped.
    pub fn from_reader<R: Read>(name: &str, reader: R, header_row: usize) -> Result<Self, BomError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut headers: Option<Vec<String>> = None;
        let mut rows = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|source| BomError::Csv {
                table: name.to_string(),
                source,
            })?;

            if idx < header_row {
                continue;
            }

            if headers.is_none() {
                headers = Some(header_cells(&record));
                continue;
            }

            if record.iter().all(|cell| cell.is_empty()) {
                continue;
            }

            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 1);
            rows.push(TableRow {
                line,
                cells: record.iter().map(str::to_string).collect(),
            });
        }

        let headers = headers.ok_or_else(|| BomError::EmptyInput {
            table: name.to_string(),
            header_row,
        })?;

        Ok(Self::new(name, headers, rows))
    }

    /// Build a table from already-split headers and rows
    pub fn new(name: &str, headers: Vec<String>, rows: Vec<TableRow>) -> Self {
        let header_map = build_header_map(&headers);
        Self {
            name: name.to_string(),
            headers,
            header_map,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first header matching any of `aliases`
    ///
    /// Aliases are tried in order, so the first alias has priority when a
    /// file carries several of them.
    pub fn find_column(&self, aliases: &[String]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|alias| self.header_map.get(&normalize_header(alias)).copied())
    }

    /// Like [`Table::find_column`], but a missing column is an error
    pub fn require_column(&self, aliases: &[String]) -> Result<usize, BomError> {
        self.find_column(aliases)
            .ok_or_else(|| BomError::missing_column(&self.name, aliases))
    }

    /// Cell value at `column`, empty when the row is short
    pub fn cell<'a>(&self, row: &'a TableRow, column: usize) -> &'a str {
        row.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Header cells with a leading UTF-8 byte order mark removed
fn header_cells(record: &StringRecord) -> Vec<String> {
    record
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').trim().to_string()
            } else {
                h.to_string()
            }
        })
        .collect()
}

fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase()
}

/// Build a map from normalized header name to column index
///
/// When a header repeats, the leftmost column wins.
fn build_header_map(headers: &[String]) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (i, h) in headers.iter().enumerate() {
        map.entry(normalize_header(h)).or_insert(i);
    }
    map
}
