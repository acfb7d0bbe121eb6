//! Render — plain-text page printer for the terminal.
//!
//! Output is tab-separated: a summary line, a header of display names, then
//! one line per record on the current page.

use std::io::{self, Write};

use crate::conf::Preferences;
use crate::state::Session;

/// Notice printed when a load succeeded but yielded no columns.
pub const NO_COLUMNS_NOTICE: &str = "No columns detected";

/// Print the session's current page to `out`.
pub fn print_page<W: Write>(session: &Session, prefs: &Preferences, out: &mut W) -> io::Result<()> {
    let snapshot = session.display();

    let Some(source) = snapshot.source_name else {
        return writeln!(out, "No data loaded");
    };

    writeln!(
        out,
        "# {}: {} of {} records, page {}/{} ({} per page)",
        source,
        snapshot.page.total_filtered,
        session.records().len(),
        snapshot.page.page_number,
        snapshot.page.total_pages.max(1),
        snapshot.page.page_size
    )?;

    if snapshot.has_no_columns() {
        return writeln!(out, "{}", NO_COLUMNS_NOTICE);
    }

    writeln!(out, "{}", snapshot.headers().join("\t"))?;
    for record in &snapshot.page.items {
        let row: Vec<String> = snapshot
            .ordered_columns
            .iter()
            .map(|column| sanitize(&session.cell(record, column, prefs)))
            .collect();
        writeln!(out, "{}", row.join("\t"))?;
    }

    Ok(())
}

/// Keep one record per line: tabs and newlines inside a cell become spaces.
fn sanitize(cell: &str) -> String {
    cell.replace(['\t', '\n', '\r'], " ")
}
