// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// fichas-sheet — Cleaning of decoded spreadsheet rows.
//
// Drops the form-submission timestamp column, normalizes date-like columns to
// `DD/MM/YYYY`, and splits each cleaned row into ordinary and
// emergency-contact field groups.

pub mod cell;
pub mod classify;
pub mod date;
pub mod header;
pub mod sanitize;

pub use classify::classify;
pub use date::normalize;
pub use sanitize::{sanitize, sanitize_row_set};
