// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Drawing surface abstraction.
//
// The assembler only speaks `DrawOp`s; a surface decides what they become.
// `PdfSurface` (in `pdf::writer`) produces a real document, while
// `RecordingSurface` keeps the instructions for inspection in tests and
// benchmarks.

use fichas_core::error::Result;

use crate::layout::DrawOp;

/// A paged canvas that accepts layout instructions.
///
/// The first page exists implicitly: drawing before any `add_page` call lands
/// on page one. A surface that was never drawn on has zero pages.
pub trait DrawingSurface {
    /// Whether translucent images can be drawn. Surfaces without it composite
    /// translucent images opaque.
    fn supports_transparency(&self) -> bool;

    /// Start a new page; later instructions land on it.
    fn add_page(&mut self);

    /// Draw one instruction on the current page.
    fn draw(&mut self, op: &DrawOp) -> Result<()>;

    /// Pages started so far.
    fn page_count(&self) -> usize;
}

/// In-memory surface that records every instruction per page.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pages: Vec<Vec<DrawOp>>,
    transparency: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            transparency: true,
        }
    }

    /// A surface that reports no transparency support.
    pub fn opaque() -> Self {
        Self {
            pages: Vec::new(),
            transparency: false,
        }
    }

    pub fn pages(&self) -> &[Vec<DrawOp>] {
        &self.pages
    }

    fn current_page(&mut self) -> &mut Vec<DrawOp> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSurface for RecordingSurface {
    fn supports_transparency(&self) -> bool {
        self.transparency
    }

    fn add_page(&mut self) {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        self.pages.push(Vec::new());
    }

    fn draw(&mut self, op: &DrawOp) -> Result<()> {
        self.current_page().push(op.clone());
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fichas_core::Rgb;

    fn rect() -> DrawOp {
        DrawOp::FillRect {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            color: Rgb::gray(0),
        }
    }

    #[test]
    fn untouched_surface_has_no_pages() {
        assert_eq!(RecordingSurface::new().page_count(), 0);
    }

    #[test]
    fn first_draw_opens_page_one() {
        let mut surface = RecordingSurface::new();
        surface.draw(&rect()).unwrap();
        assert_eq!(surface.page_count(), 1);
        surface.add_page();
        surface.draw(&rect()).unwrap();
        surface.draw(&rect()).unwrap();
        assert_eq!(surface.page_count(), 2);
        assert_eq!(surface.pages()[0].len(), 1);
        assert_eq!(surface.pages()[1].len(), 2);
    }

    #[test]
    fn opaque_surface_reports_no_transparency() {
        assert!(RecordingSurface::new().supports_transparency());
        assert!(!RecordingSurface::opaque().supports_transparency());
    }
}
