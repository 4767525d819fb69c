// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembler — one page per clean row, in input order, on a single
// drawing surface.

use fichas_core::error::{FichasError, Result};
use fichas_core::{CleanRowSet, LayoutConfig};
use fichas_sheet::classify;
use tracing::{debug, info, instrument, warn};

use crate::image::PageImages;
use crate::layout::{DrawOp, render_page};
use crate::surface::DrawingSurface;

/// What was placed on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    /// 1-based.
    pub page_number: usize,
    pub ordinary_fields: usize,
    pub emergency_fields: usize,
    pub content_top: f32,
}

/// Lay out every row of `rows` onto `surface`.
///
/// The first row uses the surface's initial page; every later row starts a
/// new one. Zero rows leave the surface untouched. Image instructions that
/// the surface cannot honour are logged and skipped; any other drawing error
/// aborts the assembly.
#[instrument(skip_all, fields(rows = rows.rows.len(), headers = rows.headers.len()))]
pub fn assemble<S: DrawingSurface>(
    surface: &mut S,
    rows: &CleanRowSet,
    images: &PageImages,
    config: &LayoutConfig,
) -> Result<Vec<PageSummary>> {
    let opaque_fallback = !surface.supports_transparency();
    if opaque_fallback && images.watermark.is_some() {
        warn!(
            err = %FichasError::TransparencyUnsupported,
            "Watermark will be composited opaque"
        );
    }

    let mut summaries = Vec::with_capacity(rows.rows.len());

    for (idx, row) in rows.rows.iter().enumerate() {
        let pairs = classify(row, &rows.headers);
        if idx > 0 {
            surface.add_page();
        }
        let page_number = idx + 1;

        let layout = render_page(
            &pairs,
            images.logo.as_ref(),
            images.watermark.as_ref(),
            config,
            page_number,
        );

        for op in &layout.ops {
            let op = if opaque_fallback { make_opaque(op) } else { op.clone() };
            match surface.draw(&op) {
                Ok(()) => {}
                Err(err) if op.is_image() => {
                    warn!(page_number, %err, "Image skipped on page");
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            page_number,
            ordinary = pairs.ordinary.len(),
            emergency = pairs.emergency.len(),
            "Page assembled"
        );
        summaries.push(PageSummary {
            page_number,
            ordinary_fields: pairs.ordinary.len(),
            emergency_fields: pairs.emergency.len(),
            content_top: layout.content_top,
        });
    }

    info!(pages = surface.page_count(), "Document assembled");
    Ok(summaries)
}

fn make_opaque(op: &DrawOp) -> DrawOp {
    match op {
        DrawOp::Image {
            slot,
            x,
            y,
            width,
            height,
            ..
        } => DrawOp::Image {
            slot: *slot,
            x: *x,
            y: *y,
            width: *width,
            height: *height,
            opacity: 1.0,
        },
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ImageSlot;
    use crate::surface::RecordingSurface;
    use fichas_core::{CleanRow, ImageAsset};

    fn snapshot(names: &[&str]) -> CleanRowSet {
        CleanRowSet {
            headers: vec!["Nome".into(), "Contato de emergência".into()],
            rows: names
                .iter()
                .map(|n| {
                    CleanRow::new(vec![
                        ("Nome".into(), n.to_string()),
                        ("Contato de emergência".into(), "Maria".into()),
                    ])
                })
                .collect(),
        }
    }

    fn watermark() -> PageImages {
        PageImages {
            logo: None,
            watermark: Some(ImageAsset {
                pixels: vec![0; 2 * 2 * 3],
                width: 2,
                height: 2,
                has_alpha: false,
            }),
        }
    }

    fn page_texts(page: &[DrawOp]) -> Vec<String> {
        page.iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn one_page_per_row_in_order() {
        let mut surface = RecordingSurface::new();
        let summaries = assemble(
            &mut surface,
            &snapshot(&["Ana", "Bruno", "Carla"]),
            &PageImages::none(),
            &LayoutConfig::default(),
        )
        .unwrap();

        assert_eq!(surface.page_count(), 3);
        assert_eq!(summaries.len(), 3);
        for (i, name) in ["Ana", "Bruno", "Carla"].iter().enumerate() {
            let texts = page_texts(&surface.pages()[i]);
            assert!(texts.contains(&name.to_string()));
            assert!(texts.contains(&format!("Página {}", i + 1)));
        }
        assert_eq!(summaries[2].page_number, 3);
        assert_eq!(summaries[0].emergency_fields, 1);
    }

    /// Records everything except images, which it refuses.
    struct NoImages(RecordingSurface);

    impl DrawingSurface for NoImages {
        fn supports_transparency(&self) -> bool {
            true
        }

        fn add_page(&mut self) {
            self.0.add_page();
        }

        fn draw(&mut self, op: &DrawOp) -> Result<()> {
            if op.is_image() {
                return Err(FichasError::ImageUnavailable("refused".into()));
            }
            self.0.draw(op)
        }

        fn page_count(&self) -> usize {
            self.0.page_count()
        }
    }

    #[test]
    fn image_failures_skip_the_image_not_the_page() {
        let mut images = watermark();
        images.logo = images.watermark.clone();
        let mut surface = NoImages(RecordingSurface::new());
        let summaries = assemble(
            &mut surface,
            &snapshot(&["Ana", "Bruno", "Carla"]),
            &images,
            &LayoutConfig::default(),
        )
        .unwrap();

        assert_eq!(summaries.len(), 3);
        assert_eq!(surface.page_count(), 3);
        for (i, name) in ["Ana", "Bruno", "Carla"].iter().enumerate() {
            let page = &surface.0.pages()[i];
            assert!(!page.iter().any(DrawOp::is_image));
            let texts = page_texts(page);
            assert!(texts.contains(&name.to_string()));
            assert!(texts.contains(&"Assinatura Membro".to_string()));
        }
    }

    #[test]
    fn zero_rows_zero_pages() {
        let mut surface = RecordingSurface::new();
        let summaries = assemble(
            &mut surface,
            &snapshot(&[]),
            &PageImages::none(),
            &LayoutConfig::default(),
        )
        .unwrap();
        assert!(summaries.is_empty());
        assert_eq!(surface.page_count(), 0);
    }

    #[test]
    fn watermark_goes_opaque_without_transparency() {
        let mut surface = RecordingSurface::opaque();
        assemble(&mut surface, &snapshot(&["Ana"]), &watermark(), &LayoutConfig::default()).unwrap();
        let opacity = surface.pages()[0]
            .iter()
            .find_map(|op| match op {
                DrawOp::Image {
                    slot: ImageSlot::Watermark,
                    opacity,
                    ..
                } => Some(*opacity),
                _ => None,
            })
            .unwrap();
        assert_eq!(opacity, 1.0);
    }

    #[test]
    fn watermark_stays_translucent_with_transparency() {
        let mut surface = RecordingSurface::new();
        assemble(&mut surface, &snapshot(&["Ana"]), &watermark(), &LayoutConfig::default()).unwrap();
        assert!(surface.pages()[0].iter().any(|op| matches!(
            op,
            DrawOp::Image { slot: ImageSlot::Watermark, opacity, .. } if *opacity < 1.0
        )));
    }
}
