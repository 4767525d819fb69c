// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Fichas: raw sheet cells, cleaned rows, classified
// field pairs, decoded images, and page geometry.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Points per millimetre (1 pt = 1/72 in, 1 in = 25.4 mm).
const PT_PER_MM: f32 = 72.0 / 25.4;

/// An untyped value as handed over by the external sheet reader.
///
/// In the JSON hand-off format a cell is `null`, a number, a boolean, a
/// string, or `{"date": "<RFC 3339 timestamp>"}` for cells the reader has
/// already decoded into a calendar date-time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum RawCell {
    /// A calendar date-time whose UTC fields are the intended calendar date.
    Date { date: DateTime<Utc> },
    Number(f64),
    Bool(bool),
    Text(String),
    #[default]
    Empty,
}

impl RawCell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn date(date: DateTime<Utc>) -> Self {
        Self::Date { date }
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// One sheet line keyed by header name. Missing headers read as empty.
pub type Row = HashMap<String, RawCell>;

/// The decoded first sheet of a workbook: ordered headers plus ordered rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowSet {
    /// Name of the sheet the rows came from, if the reader reported one.
    #[serde(default)]
    pub sheet: Option<String>,
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// A sanitized row: header/value strings in clean-header order.
///
/// Produced only by the sanitizer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CleanRow {
    fields: Vec<(String, String)>,
}

impl CleanRow {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Value stored under `header`, if the header exists in this row.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// Fields in column order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Snapshot of a sanitized sheet, captured once per export.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CleanRowSet {
    pub headers: Vec<String>,
    pub rows: Vec<CleanRow>,
}

impl CleanRowSet {
    /// `true` when there is nothing to export: no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.headers.is_empty()
    }
}

/// A label/value pair rendered as one block on a page. `value` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPair {
    pub label: String,
    pub value: String,
}

impl FieldPair {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The non-empty fields of one row, split into ordinary and emergency-contact
/// groups. Both groups keep header order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassifiedPairs {
    pub ordinary: Vec<FieldPair>,
    pub emergency: Vec<FieldPair>,
}

impl ClassifiedPairs {
    pub fn len(&self) -> usize {
        self.ordinary.len() + self.emergency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinary.is_empty() && self.emergency.is_empty()
    }
}

/// A decoded bitmap, shared by every page it appears on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    /// Row-major pixels, RGB8 or RGBA8 depending on `has_alpha`.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
}

impl ImageAsset {
    /// Width divided by height. Zero-height images report a ratio of 1.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        if self.has_alpha { 4 } else { 3 }
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }

    /// Dimensions in PDF points (width, height).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        (w as f32 * PT_PER_MM, h as f32 * PT_PER_MM)
    }
}

/// Fixed page size and margins, constant across a document. All values are
/// PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_x: f32,
    pub bottom_margin: f32,
}

impl PageGeometry {
    /// Horizontal span between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin_x
    }
}

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn gray(level: u8) -> Self {
        Self(level, level, level)
    }

    /// Channels scaled to 0.0..=1.0 for PDF colour operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}
