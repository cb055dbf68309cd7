//! # Table Loaders
//!
//! Parse the two tab-separated inputs into base tables.
//!
//! ```text
//! annotation.tsv ─ AnnotationLoader ─→ AnnotationTable (+ dates, buckets)
//! segments.tsv   ─ SegmentLoader    ─→ SegmentStore    (+ participant index)
//! ```
//!
//! Both files carry a header row. Columns are located through the
//! [`config`](crate::config) mappings and validated against that header
//! before any data row is read, so a wrong layout fails on line 1 rather
//! than partway through the file.

pub mod annotation;
pub mod segment;

pub use annotation::AnnotationLoader;
pub use segment::SegmentLoader;

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::config::ColumnRef;
use crate::{Error, Result};

/// Open `path` for buffered line reading.
pub(crate) fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Line reader for a headed TSV file that tracks line numbers for errors.
pub(crate) struct TsvReader<R> {
    lines: Lines<R>,
    name: String,
    line_no: usize,
}

impl<R: BufRead> TsvReader<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            name: name.into(),
            line_no: 0,
        }
    }

    pub fn error(&self, line: usize, message: impl Into<String>) -> Error {
        Error::Format {
            file: self.name.clone(),
            line,
            message: message.into(),
        }
    }

    /// The header fields. Fails on an empty input.
    pub fn header(&mut self) -> Result<Vec<String>> {
        match self.next_line()? {
            Some((_, line)) => Ok(line.split('\t').map(|f| f.trim().to_string()).collect()),
            None => Err(self.error(0, "file is empty (no header row)")),
        }
    }

    /// Next non-blank line with its 1-based line number.
    pub fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line?;
            let line = line.trim_end_matches('\r');
            if !line.trim().is_empty() {
                return Ok(Some((self.line_no, line.to_string())));
            }
        }
        Ok(None)
    }

    /// Resolve each `(field, column)` against the header.
    pub fn resolve<const N: usize>(
        &self,
        header: &[String],
        columns: [(&str, &ColumnRef); N],
    ) -> Result<[usize; N]> {
        let header: Vec<&str> = header.iter().map(String::as_str).collect();
        let mut out = [0; N];
        for (slot, (field, col)) in out.iter_mut().zip(columns) {
            *slot = col.resolve(&header).ok_or_else(|| {
                self.error(1, format!(
                    "{field}: {col} not found (header has {} columns)",
                    header.len()
                ))
            })?;
        }
        // Index and name references are only comparable once resolved.
        for (i, slot) in out.iter().enumerate() {
            if let Some(j) = out[i + 1..].iter().position(|other| other == slot) {
                return Err(self.error(1, format!(
                    "{} and {} both resolve to column #{slot}",
                    columns[i].0,
                    columns[i + 1 + j].0
                )));
            }
        }
        Ok(out)
    }
}

/// Fields of a data row, checked to be at least `width` wide.
pub(crate) fn split_row<'l, R: BufRead>(
    reader: &TsvReader<R>,
    line_no: usize,
    line: &'l str,
    width: usize,
) -> Result<Vec<&'l str>> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() < width {
        return Err(reader.error(line_no, format!(
            "expected at least {width} columns, found {}",
            fields.len()
        )));
    }
    Ok(fields)
}
