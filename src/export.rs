//! Query result export for the presentation layer.
//!
//! Two renderings of a [`QueryResult`]:
//!
//! ```text
//! QueryResult → write_json()  → one JSON document (matches + bin range + selected)
//!             → write_table() → TSV with the display column titles
//! ```

use std::io::Write;

use crate::model::MatchResult;
use crate::query::QueryResult;
use crate::Result;

/// Display titles of the match table, in column order.
pub const TABLE_COLUMNS: [&str; 6] = ["ID", "Shared IBD (M)", "Population", "Latitude", "Longitude", "Age"];

/// Write the whole result as a single-line JSON document.
pub fn write_json(result: &QueryResult, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer(&mut *writer, result)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the matches as a tab-separated table with a header row.
pub fn write_table(result: &QueryResult, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "{}", TABLE_COLUMNS.join("\t"))?;
    for m in &result.matches {
        writeln!(writer, "{}", format_row(m))?;
    }
    Ok(())
}

fn format_row(m: &MatchResult) -> String {
    [
        m.id.to_string(),
        format!("{}", m.summed_length),
        sanitize(&m.population),
        format_coordinate(m.latitude),
        format_coordinate(m.longitude),
        m.age_label.clone(),
    ]
    .join("\t")
}

/// Missing coordinates render as an empty cell.
fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Keep free-text cells from breaking the table layout.
fn sanitize(text: &str) -> String {
    text.replace(['\t', '\n', '\r'], " ")
}
