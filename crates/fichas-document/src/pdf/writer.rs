// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF surface — turns layout instructions into a PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: each page is a `Vec<Op>`, and the
// document is assembled from `PdfPage`s and serialised via
// `PdfDocument::save()`. Images are registered once as XObjects and
// referenced from every page.

use std::collections::HashMap;

use fichas_core::error::{FichasError, Result};
use fichas_core::{ImageAsset, LayoutConfig, PaperSize};
use printpdf::{
    BuiltinFont, Color, ExtendedGraphicsState, ExtendedGraphicsStateId, Line, LinePoint,
    Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Polygon,
    PolygonRing, Pt, RawImage, RawImageData, RawImageFormat, TextItem, WindingOrder, XObjectId,
    XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::image::PageImages;
use crate::layout::{DrawOp, FontWeight, ImageSlot};
use crate::surface::DrawingSurface;

/// An image registered with the document, plus its native pixel size.
#[derive(Debug, Clone)]
struct XObjectRef {
    id: XObjectId,
    width_px: u32,
    height_px: u32,
}

/// Drawing surface backed by a `printpdf` document.
pub struct PdfSurface {
    doc: PdfDocument,
    paper_size: PaperSize,
    /// Page height in points, for flipping top-left coordinates.
    page_height: f32,
    pages: Vec<Vec<Op>>,
    images: HashMap<ImageSlot, XObjectRef>,
    /// One graphics state per distinct opacity, keyed by the f32 bit pattern.
    alpha_states: HashMap<u32, ExtendedGraphicsStateId>,
    transparency: bool,
}

impl PdfSurface {
    /// Create an empty document and register the page images with it.
    ///
    /// An image whose pixel buffer does not match its dimensions is logged and
    /// left unregistered; instructions that reference it fail at draw time.
    #[instrument(skip_all, fields(title = %title))]
    pub fn new(title: &str, config: &LayoutConfig, images: &PageImages) -> Self {
        let mut doc = PdfDocument::new(title);
        let mut registered = HashMap::new();

        let slots = [
            (ImageSlot::Logo, images.logo.as_ref()),
            (ImageSlot::Watermark, images.watermark.as_ref()),
        ];
        for (slot, asset) in slots {
            let Some(asset) = asset else { continue };
            match register_image(&mut doc, asset) {
                Ok(xobject) => {
                    debug!(?slot, width = xobject.width_px, height = xobject.height_px, "Image registered");
                    registered.insert(slot, xobject);
                }
                Err(err) => warn!(?slot, %err, "Image could not be registered, skipped"),
            }
        }

        let (_, page_height) = config.paper_size.dimensions_pt();
        info!(paper = ?config.paper_size, images = registered.len(), "PDF surface created");

        Self {
            doc,
            paper_size: config.paper_size,
            page_height,
            pages: Vec::new(),
            images: registered,
            alpha_states: HashMap::new(),
            transparency: config.allow_transparency,
        }
    }

    /// Serialise the document.
    #[instrument(skip(self), fields(pages = self.pages.len()))]
    pub fn finish(mut self) -> Vec<u8> {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        let (page_w, page_h) = (Mm(w_mm as f32), Mm(h_mm as f32));

        let pages: Vec<PdfPage> = std::mem::take(&mut self.pages)
            .into_iter()
            .map(|ops| PdfPage::new(page_w, page_h, ops))
            .collect();
        self.doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "printpdf reported warnings while saving");
        }
        info!(bytes = output.len(), "PDF serialised");
        output
    }

    fn current_page(&mut self) -> &mut Vec<Op> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Flip a top-left based vertical coordinate into PDF space.
    fn flip(&self, y: f32) -> f32 {
        self.page_height - y
    }

    fn alpha_state(&mut self, opacity: f32) -> ExtendedGraphicsStateId {
        let doc = &mut self.doc;
        self.alpha_states
            .entry(opacity.to_bits())
            .or_insert_with(|| {
                let state = ExtendedGraphicsState::default()
                    .with_current_fill_alpha(opacity)
                    .with_current_stroke_alpha(opacity);
                doc.add_graphics_state(state)
            })
            .clone()
    }

    fn draw_image(
        &mut self,
        slot: ImageSlot,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        opacity: f32,
    ) -> Result<()> {
        let xobject = self
            .images
            .get(&slot)
            .cloned()
            .ok_or_else(|| FichasError::ImageUnavailable(format!("{:?} image is not registered", slot)))?;

        // At 72 dpi one pixel is one point, so the scale is the target size
        // over the pixel size.
        let transform = XObjectTransform {
            translate_x: Some(Pt(x)),
            translate_y: Some(Pt(self.flip(y + height))),
            scale_x: Some(width / xobject.width_px as f32),
            scale_y: Some(height / xobject.height_px as f32),
            dpi: Some(72.0),
            rotate: None,
        };
        let place = Op::UseXobject {
            id: xobject.id,
            transform,
        };

        if opacity < 1.0 {
            if !self.transparency {
                return Err(FichasError::TransparencyUnsupported);
            }
            let gs = self.alpha_state(opacity);
            let page = self.current_page();
            page.push(Op::SaveGraphicsState);
            page.push(Op::LoadGraphicsState { gs });
            page.push(place);
            page.push(Op::RestoreGraphicsState);
        } else {
            self.current_page().push(place);
        }
        Ok(())
    }
}

impl DrawingSurface for PdfSurface {
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
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let (left, right) = (*x, x + width);
                let (top, bottom) = (self.flip(*y), self.flip(y + height));
                let ring = PolygonRing {
                    points: [(left, bottom), (right, bottom), (right, top), (left, top)]
                        .into_iter()
                        .map(|(px, py)| corner(px, py))
                        .collect(),
                };
                let page = self.current_page();
                page.push(Op::SetFillColor { col: pdf_color(*color) });
                page.push(Op::DrawPolygon {
                    polygon: Polygon {
                        rings: vec![ring],
                        mode: PaintMode::Fill,
                        winding_order: WindingOrder::NonZero,
                    },
                });
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                thickness,
                color,
            } => {
                let points = vec![corner(*x1, self.flip(*y1)), corner(*x2, self.flip(*y2))];
                let page = self.current_page();
                page.push(Op::SetOutlineColor { col: pdf_color(*color) });
                page.push(Op::SetOutlineThickness { pt: Pt(*thickness) });
                page.push(Op::DrawLine {
                    line: Line {
                        points,
                        is_closed: false,
                    },
                });
            }
            DrawOp::Text {
                text,
                x,
                y,
                size,
                weight,
                color,
            } => {
                let pos = Point {
                    x: Pt(*x),
                    y: Pt(self.flip(*y)),
                };
                let page = self.current_page();
                page.push(Op::SetFillColor { col: pdf_color(*color) });
                page.push(Op::StartTextSection);
                page.push(Op::SetTextCursor { pos });
                page.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(*size),
                    font: builtin_font(*weight),
                });
                page.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(text.clone())],
                    font: builtin_font(*weight),
                });
                page.push(Op::EndTextSection);
            }
            DrawOp::Image {
                slot,
                x,
                y,
                width,
                height,
                opacity,
            } => self.draw_image(*slot, *x, *y, *width, *height, *opacity)?,
        }
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Register an asset as an XObject.
fn register_image(doc: &mut PdfDocument, asset: &ImageAsset) -> Result<XObjectRef> {
    let expected = asset.width as usize * asset.height as usize * asset.bytes_per_pixel();
    if asset.width == 0 || asset.height == 0 || asset.pixels.len() != expected {
        return Err(FichasError::ImageUnavailable(format!(
            "pixel buffer holds {} bytes, {}x{} needs {}",
            asset.pixels.len(),
            asset.width,
            asset.height,
            expected
        )));
    }

    let raw = RawImage {
        pixels: RawImageData::U8(asset.pixels.clone()),
        width: asset.width as usize,
        height: asset.height as usize,
        data_format: if asset.has_alpha {
            RawImageFormat::RGBA8
        } else {
            RawImageFormat::RGB8
        },
        tag: Vec::new(),
    };

    Ok(XObjectRef {
        id: doc.add_image(&raw),
        width_px: asset.width,
        height_px: asset.height,
    })
}

fn corner(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

fn pdf_color(color: fichas_core::Rgb) -> Color {
    let (r, g, b) = color.to_unit();
    Color::Rgb(printpdf::Rgb {
        r,
        g,
        b,
        icc_profile: None,
    })
}

fn builtin_font(weight: FontWeight) -> BuiltinFont {
    match weight {
        FontWeight::Regular => BuiltinFont::Helvetica,
        FontWeight::Bold => BuiltinFont::HelveticaBold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::PdfReader;
    use fichas_core::Rgb;

    fn asset(width: u32, height: u32) -> ImageAsset {
        ImageAsset {
            pixels: vec![128; (width * height * 3) as usize],
            width,
            height,
            has_alpha: false,
        }
    }

    fn text(s: &str) -> DrawOp {
        DrawOp::Text {
            text: s.into(),
            x: 44.0,
            y: 100.0,
            size: 11.0,
            weight: FontWeight::Regular,
            color: Rgb::gray(20),
        }
    }

    #[test]
    fn pages_are_created_lazily_and_counted() {
        let config = LayoutConfig::default();
        let mut surface = PdfSurface::new("Teste", &config, &PageImages::none());
        assert_eq!(surface.page_count(), 0);
        surface.draw(&text("um")).unwrap();
        surface.add_page();
        surface.draw(&text("dois")).unwrap();
        assert_eq!(surface.page_count(), 2);

        let bytes = surface.finish();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(PdfReader::from_bytes(&bytes).unwrap().page_count(), 2);
    }

    #[test]
    fn unregistered_image_is_an_error() {
        let config = LayoutConfig::default();
        let mut surface = PdfSurface::new("Teste", &config, &PageImages::none());
        let err = surface
            .draw(&DrawOp::Image {
                slot: ImageSlot::Logo,
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
                opacity: 1.0,
            })
            .unwrap_err();
        assert!(matches!(err, FichasError::ImageUnavailable(_)));
    }

    #[test]
    fn malformed_pixels_are_not_registered() {
        let config = LayoutConfig::default();
        let mut broken = asset(4, 4);
        broken.pixels.truncate(5);
        let images = PageImages {
            logo: Some(broken),
            watermark: Some(asset(4, 4)),
        };
        let surface = PdfSurface::new("Teste", &config, &images);
        assert!(!surface.images.contains_key(&ImageSlot::Logo));
        assert!(surface.images.contains_key(&ImageSlot::Watermark));
    }

    #[test]
    fn translucent_image_uses_one_shared_graphics_state() {
        let config = LayoutConfig::default();
        let images = PageImages {
            logo: None,
            watermark: Some(asset(8, 8)),
        };
        let mut surface = PdfSurface::new("Teste", &config, &images);
        let op = DrawOp::Image {
            slot: ImageSlot::Watermark,
            x: 100.0,
            y: 200.0,
            width: 80.0,
            height: 80.0,
            opacity: 0.07,
        };
        surface.draw(&op).unwrap();
        surface.add_page();
        surface.draw(&op).unwrap();
        assert_eq!(surface.alpha_states.len(), 1);
        assert!(matches!(surface.pages[0][1], Op::LoadGraphicsState { .. }));
    }

    #[test]
    fn translucent_watermark_serialises() {
        let config = LayoutConfig::default();
        let images = PageImages {
            logo: None,
            watermark: Some(asset(8, 8)),
        };
        let mut surface = PdfSurface::new("Teste", &config, &images);
        surface
            .draw(&DrawOp::Image {
                slot: ImageSlot::Watermark,
                x: 100.0,
                y: 200.0,
                width: 80.0,
                height: 80.0,
                opacity: 0.07,
            })
            .unwrap();
        let bytes = surface.finish();
        assert_eq!(PdfReader::from_bytes(&bytes).unwrap().page_count(), 1);
    }

    #[test]
    fn translucency_is_refused_when_disabled() {
        let config = LayoutConfig {
            allow_transparency: false,
            ..LayoutConfig::default()
        };
        let images = PageImages {
            logo: None,
            watermark: Some(asset(8, 8)),
        };
        let mut surface = PdfSurface::new("Teste", &config, &images);
        assert!(!surface.supports_transparency());
        let err = surface
            .draw(&DrawOp::Image {
                slot: ImageSlot::Watermark,
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
                opacity: 0.5,
            })
            .unwrap_err();
        assert!(matches!(err, FichasError::TransparencyUnsupported));
    }

    #[test]
    fn vertical_coordinates_are_flipped() {
        let config = LayoutConfig::default();
        let surface = PdfSurface::new("Teste", &config, &PageImages::none());
        let (_, h) = PaperSize::A4.dimensions_pt();
        assert!((surface.flip(0.0) - h).abs() < 1e-3);
        assert!((surface.flip(h)).abs() < 1e-3);
    }
}
