// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Display coercion for cells outside date-like columns.

use fichas_core::RawCell;

/// Coerce a raw cell to the string shown on the page, without date semantics.
pub fn display(value: &RawCell) -> String {
    match value {
        RawCell::Empty => String::new(),
        RawCell::Text(s) => s.clone(),
        RawCell::Number(n) => display_number(*n),
        RawCell::Bool(b) => b.to_string(),
        RawCell::Date { date } => date.format("%d/%m/%Y %H:%M:%S").to_string(),
    }
}

/// Integral values print without a fractional part; non-finite values use the
/// spreadsheet spellings.
pub fn display_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        // Covers -0.0 as well.
        "0".to_string()
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn numbers_drop_trailing_zero_fraction() {
        assert_eq!(display_number(45292.0), "45292");
        assert_eq!(display_number(1.5), "1.5");
        assert_eq!(display_number(-0.0), "0");
        assert_eq!(display_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn cells_coerce_to_strings() {
        assert_eq!(display(&RawCell::Empty), "");
        assert_eq!(display(&RawCell::text(" Ana ")), " Ana ");
        assert_eq!(display(&RawCell::Bool(false)), "false");
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(display(&RawCell::date(at)), "02/01/2024 03:04:05");
    }
}
