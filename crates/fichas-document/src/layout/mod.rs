// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout engine — turns one row's classified pairs into a list of
// drawing instructions.
//
// Layout runs in two passes: `measure` computes wrapped lines and the total
// content height without drawing anything, then `page` emits instructions
// using those extents. Coordinates are points from the top-left page corner;
// the drawing surface maps them to PDF space.

pub mod measure;
pub mod metrics;
pub mod page;

use fichas_core::Rgb;

pub use measure::{ContentPlan, PairExtent, measure_content};
pub use page::{PageLayout, render_page};

/// Built-in Helvetica face used for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Which of the document's shared images an instruction refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Logo,
    Watermark,
}

/// One drawing instruction. `y` values grow downwards from the page top.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Filled rectangle; (`x`, `y`) is the top-left corner.
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    /// Straight stroked line.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
        color: Rgb,
    },
    /// Single line of text; (`x`, `y`) is the left end of the baseline.
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
    },
    /// Shared image scaled into a box; (`x`, `y`) is the top-left corner.
    Image {
        slot: ImageSlot,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        opacity: f32,
    },
}

impl DrawOp {
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

/// Vertical position threaded through the render pass. Each drawing step
/// takes the cursor by value and returns the advanced one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub y: f32,
}

impl Cursor {
    pub fn at(y: f32) -> Self {
        Self { y }
    }

    #[must_use]
    pub fn advance(self, dy: f32) -> Self {
        Self { y: self.y + dy }
    }
}
