//! Segment table loader (ancIBD `.ibd` output layout by default).

use std::io::BufRead;
use std::path::Path;

use tracing::info;

use crate::config::{IbdConfig, SegmentColumns};
use crate::model::SegmentRecord;
use crate::storage::SegmentStore;
use crate::Result;
use super::{TsvReader, split_row};

#[derive(Debug, Clone, Default)]
pub struct SegmentLoader {
    columns: SegmentColumns,
}

impl SegmentLoader {
    pub fn new(config: &IbdConfig) -> Self {
        Self { columns: config.segments.clone() }
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<SegmentStore> {
        let path = path.as_ref();
        let reader = super::open(path)?;
        self.load_reader(reader, &path.display().to_string())
    }

    pub fn load_reader<R: BufRead>(&self, reader: R, name: &str) -> Result<SegmentStore> {
        self.columns.validate()?;

        let mut tsv = TsvReader::new(reader, name);
        let header = tsv.header()?;
        let [a_col, b_col, len_col] = tsv.resolve(&header, [
            ("participant_a", &self.columns.participant_a),
            ("participant_b", &self.columns.participant_b),
            ("length", &self.columns.length),
        ])?;
        let width = a_col.max(b_col).max(len_col) + 1;

        let mut store = SegmentStore::new();
        while let Some((line_no, line)) = tsv.next_line()? {
            let fields = split_row(&tsv, line_no, &line, width)?;

            let (a, b) = (fields[a_col], fields[b_col]);
            if a.is_empty() || b.is_empty() {
                return Err(tsv.error(line_no, "empty participant id"));
            }
            let length = match fields[len_col].parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => v,
                _ => {
                    return Err(tsv.error(line_no, format!(
                        "length: expected a non-negative number of Morgans, got '{}'",
                        fields[len_col]
                    )));
                }
            };
            store.insert(SegmentRecord::new(a, b, length));
        }

        if store.is_empty() {
            return Err(tsv.error(0, "no data rows"));
        }
        info!(
            file = name,
            segments = store.len(),
            individuals = store.individual_count(),
            "loaded segment table"
        );
        Ok(store)
    }
}
