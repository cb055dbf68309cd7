//! Annotation table loader (AADR `.anno` layout by default).

use std::io::BufRead;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::{AnnotationColumns, IbdConfig, TimeConfig};
use crate::model::{AnnotationRecord, MAX_ABS_YEAR};
use crate::storage::AnnotationTable;
use crate::Result;
use super::{TsvReader, split_row};

/// Cell values that mean "no coordinate recorded".
const MISSING_MARKERS: &[&str] = &["", "..", "NA", "NaN", "n/a"];

#[derive(Debug, Clone, Default)]
pub struct AnnotationLoader {
    columns: AnnotationColumns,
    time: TimeConfig,
}

impl AnnotationLoader {
    pub fn new(config: &IbdConfig) -> Self {
        Self {
            columns: config.annotation.clone(),
            time: config.time,
        }
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<AnnotationTable> {
        let path = path.as_ref();
        let reader = super::open(path)?;
        self.load_reader(reader, &path.display().to_string())
    }

    /// Parse an annotation table from any buffered reader; `name` labels errors.
    ///
    /// The column mapping and time settings are validated first, so a
    /// loader built from an unchecked config fails with `Error::Config`.
    pub fn load_reader<R: BufRead>(&self, reader: R, name: &str) -> Result<AnnotationTable> {
        self.time.validate()?;
        self.columns.validate()?;

        let mut tsv = TsvReader::new(reader, name);
        let header = tsv.header()?;
        let [id_col, year_col, pop_col, lat_col, lon_col] = tsv.resolve(&header, [
            ("id", &self.columns.id),
            ("raw_year", &self.columns.raw_year),
            ("population", &self.columns.population),
            ("latitude", &self.columns.latitude),
            ("longitude", &self.columns.longitude),
        ])?;
        let width = [id_col, year_col, pop_col, lat_col, lon_col].into_iter().max().unwrap_or(0) + 1;

        let mut table = AnnotationTable::new(self.time.bucket_width);
        let mut duplicates = 0usize;

        while let Some((line_no, line)) = tsv.next_line()? {
            let fields = split_row(&tsv, line_no, &line, width)?;

            let id = fields[id_col];
            if id.is_empty() {
                return Err(tsv.error(line_no, "empty individual id"));
            }
            let raw_year = parse_year(fields[year_col])
                .ok_or_else(|| tsv.error(line_no, format!("raw_year: not an integer: '{}'", fields[year_col])))?;
            // With a validated epoch_offset this also bounds the derived date.
            if raw_year.unsigned_abs() > MAX_ABS_YEAR.unsigned_abs() {
                return Err(tsv.error(line_no, format!("raw_year: {raw_year} is outside ±{MAX_ABS_YEAR}")));
            }
            let latitude = parse_coordinate(fields[lat_col])
                .map_err(|v| tsv.error(line_no, format!("latitude: not a number: '{v}'")))?;
            let longitude = parse_coordinate(fields[lon_col])
                .map_err(|v| tsv.error(line_no, format!("longitude: not a number: '{v}'")))?;

            let rec = AnnotationRecord::new(
                id,
                raw_year,
                fields[pop_col],
                latitude,
                longitude,
                self.time.epoch_offset,
                self.time.bucket_width,
            );
            if !table.insert(rec) {
                debug!(file = name, line = line_no, id, "duplicate annotation id ignored");
                duplicates += 1;
            }
        }

        let Some(edges) = table.bin_edges() else {
            return Err(tsv.error(0, "no data rows"));
        };
        if duplicates > 0 {
            warn!(file = name, duplicates, "annotation ids repeated; kept the first row of each");
        }
        info!(
            file = name,
            individuals = table.len(),
            min_edge = edges.min_edge(),
            max_edge = edges.max_edge(),
            buckets = edges.len(),
            "loaded annotation table"
        );
        Ok(table)
    }
}

/// Whole years; integral floats such as `"1200.0"` are accepted.
fn parse_year(s: &str) -> Option<i64> {
    if let Ok(year) = s.parse::<i64>() {
        return Some(year);
    }
    let year = s.parse::<f64>().ok()?;
    (year.is_finite() && year.fract() == 0.0).then_some(year as i64)
}

/// `Ok(None)` for a missing marker, `Err(raw)` for anything unparseable.
fn parse_coordinate(s: &str) -> std::result::Result<Option<f64>, &str> {
    if MISSING_MARKERS.contains(&s) {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(s),
    }
}
