// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Row sanitizer — raw headers/rows in, clean snapshot out.

use fichas_core::{CleanRow, CleanRowSet, RawCell, Row, RowSet};
use tracing::{debug, info, instrument};

use crate::cell;
use crate::date;
use crate::header::{is_date_header, is_timestamp_header};

/// How the cells of one kept column are turned into strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Date,
    Plain,
}

/// Drop the timestamp column and normalize date-like columns.
///
/// Row order and the relative order of kept columns are preserved. Total over
/// any input: a cell that is not a recognisable date is kept as text.
#[instrument(skip_all, fields(headers = headers.len(), rows = rows.len()))]
pub fn sanitize(headers: &[String], rows: &[Row]) -> CleanRowSet {
    let columns: Vec<(&String, ColumnKind)> = headers
        .iter()
        .filter(|h| !is_timestamp_header(h))
        .map(|h| {
            let kind = if is_date_header(h) {
                ColumnKind::Date
            } else {
                ColumnKind::Plain
            };
            (h, kind)
        })
        .collect();

    let dropped = headers.len() - columns.len();
    let date_columns = columns
        .iter()
        .filter(|(_, kind)| *kind == ColumnKind::Date)
        .count();
    debug!(dropped, date_columns, "Column plan ready");

    let empty = RawCell::Empty;
    let clean_rows: Vec<CleanRow> = rows
        .iter()
        .map(|row| {
            let fields = columns
                .iter()
                .map(|(header, kind)| {
                    let raw = row.get(header.as_str()).unwrap_or(&empty);
                    let value = match kind {
                        ColumnKind::Date => date::normalize(raw),
                        ColumnKind::Plain => cell::display(raw),
                    };
                    ((*header).clone(), value)
                })
                .collect();
            CleanRow::new(fields)
        })
        .collect();

    info!(
        columns = columns.len(),
        rows = clean_rows.len(),
        "Rows sanitized"
    );

    CleanRowSet {
        headers: columns.into_iter().map(|(h, _)| h.clone()).collect(),
        rows: clean_rows,
    }
}

/// Convenience wrapper over [`sanitize`] for a decoded [`RowSet`].
pub fn sanitize_row_set(set: &RowSet) -> CleanRowSet {
    sanitize(&set.headers, &set.rows)
}
