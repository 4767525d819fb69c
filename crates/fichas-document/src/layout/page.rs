// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render pass — emits the drawing instructions for one row's page, using the
// extents computed by the measure pass.
//
// Drawing order: header band, watermark, content block, signature, footer.

use fichas_core::{ClassifiedPairs, ImageAsset, LayoutConfig, PageGeometry};
use tracing::{debug, instrument};

use super::measure::{ContentPlan, PairExtent, content_top, measure_content};
use super::metrics::text_width;
use super::{Cursor, DrawOp, FontWeight, ImageSlot};

/// Drawing instructions for one page plus the anchor positions tests and
/// callers care about.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
    /// Baseline of the first content line.
    pub content_top: f32,
    /// Cursor position after the last content pair.
    pub content_bottom: f32,
    /// Vertical position of the signature rule.
    pub signature_y: f32,
}

/// Lay out one page.
///
/// `logo` and `watermark` are optional; a missing image is simply not drawn.
/// `page_number` is 1-based.
#[instrument(skip_all, fields(page_number = page_number, pairs = pairs.len()))]
pub fn render_page(
    pairs: &ClassifiedPairs,
    logo: Option<&ImageAsset>,
    watermark: Option<&ImageAsset>,
    config: &LayoutConfig,
    page_number: usize,
) -> PageLayout {
    let geometry = config.geometry();
    let mut ops = Vec::new();

    draw_header(&mut ops, &geometry, config, logo.is_some());
    if let Some(image) = watermark {
        draw_watermark(&mut ops, &geometry, config, image);
    }

    let plan = measure_content(pairs, config);
    let top = content_top(plan.height, &geometry, config);
    let bottom = draw_content(&mut ops, &geometry, config, &plan, Cursor::at(top));

    let signature_y = draw_signature(&mut ops, &geometry, config);
    draw_footer(&mut ops, &geometry, config, page_number);

    debug!(
        content_height = plan.height,
        content_top = top,
        content_bottom = bottom.y,
        ops = ops.len(),
        "Page laid out"
    );

    PageLayout {
        ops,
        content_top: top,
        content_bottom: bottom.y,
        signature_y,
    }
}

// -- Header band ----------------------------------------------------------------

fn draw_header(ops: &mut Vec<DrawOp>, geometry: &PageGeometry, config: &LayoutConfig, has_logo: bool) {
    let palette = &config.palette;

    ops.push(DrawOp::FillRect {
        x: 0.0,
        y: 0.0,
        width: geometry.width,
        height: config.header_height,
        color: palette.band,
    });

    if has_logo {
        ops.push(DrawOp::Image {
            slot: ImageSlot::Logo,
            x: geometry.margin_x,
            y: (config.header_height - config.logo_size) / 2.0,
            width: config.logo_size,
            height: config.logo_size,
            opacity: 1.0,
        });
    }

    push_centered_text(
        ops,
        &config.title,
        geometry.width / 2.0,
        config.header_height / 2.0 + config.title_baseline_shift,
        config.title_font_size,
        FontWeight::Bold,
        palette.on_band,
    );

    ops.push(DrawOp::FillRect {
        x: 0.0,
        y: config.header_height,
        width: geometry.width,
        height: config.accent_bar_height,
        color: palette.accent,
    });
}

// -- Watermark ------------------------------------------------------------------

/// Box (x, y, width, height) for the watermark: at most `watermark_fit` of the
/// page in each direction, aspect ratio kept, centred.
pub fn watermark_box(
    image: &ImageAsset,
    geometry: &PageGeometry,
    config: &LayoutConfig,
) -> Option<(f32, f32, f32, f32)> {
    if image.width == 0 || image.height == 0 {
        return None;
    }
    let ratio = image.aspect_ratio();
    let mut width = geometry.width * config.watermark_fit;
    let mut height = width / ratio;
    if height > geometry.height * config.watermark_fit {
        height = geometry.height * config.watermark_fit;
        width = height * ratio;
    }
    let x = (geometry.width - width) / 2.0;
    let y = (geometry.height - height) / 2.0;
    Some((x, y, width, height))
}

fn draw_watermark(
    ops: &mut Vec<DrawOp>,
    geometry: &PageGeometry,
    config: &LayoutConfig,
    image: &ImageAsset,
) {
    let Some((x, y, width, height)) = watermark_box(image, geometry, config) else {
        debug!("Watermark has no area, skipped");
        return;
    };
    ops.push(DrawOp::Image {
        slot: ImageSlot::Watermark,
        x,
        y,
        width,
        height,
        opacity: config.watermark_opacity,
    });
}

// -- Content block ----------------------------------------------------------------

fn draw_content(
    ops: &mut Vec<DrawOp>,
    geometry: &PageGeometry,
    config: &LayoutConfig,
    plan: &ContentPlan,
    cursor: Cursor,
) -> Cursor {
    let mut cursor = draw_pairs(ops, geometry, config, &plan.ordinary, cursor);

    if plan.has_emergency() {
        cursor = cursor.advance(config.section_gap);
        ops.push(DrawOp::Text {
            text: config.emergency_heading.clone(),
            x: geometry.margin_x,
            y: cursor.y,
            size: config.heading_font_size,
            weight: FontWeight::Bold,
            color: config.palette.accent,
        });
        cursor = cursor.advance(config.heading_advance);
        cursor = draw_pairs(ops, geometry, config, &plan.emergency, cursor);
    }

    cursor
}

fn draw_pairs(
    ops: &mut Vec<DrawOp>,
    geometry: &PageGeometry,
    config: &LayoutConfig,
    extents: &[PairExtent],
    cursor: Cursor,
) -> Cursor {
    extents
        .iter()
        .fold(cursor, |cursor, extent| draw_pair(ops, geometry, config, extent, cursor))
}

/// Label lines in the left column, value lines in the right column, then a
/// separator under the taller of the two.
fn draw_pair(
    ops: &mut Vec<DrawOp>,
    geometry: &PageGeometry,
    config: &LayoutConfig,
    extent: &PairExtent,
    cursor: Cursor,
) -> Cursor {
    let line_height = config.line_height();
    let value_x = geometry.margin_x + config.label_column_width;

    for (i, line) in extent.label_lines.iter().enumerate() {
        ops.push(DrawOp::Text {
            text: line.clone(),
            x: geometry.margin_x,
            y: cursor.y + i as f32 * line_height,
            size: config.font_size,
            weight: FontWeight::Bold,
            color: config.palette.label_text,
        });
    }
    for (i, line) in extent.value_lines.iter().enumerate() {
        ops.push(DrawOp::Text {
            text: line.clone(),
            x: value_x,
            y: cursor.y + i as f32 * line_height,
            size: config.font_size,
            weight: FontWeight::Regular,
            color: config.palette.value_text,
        });
    }

    let below = cursor.advance(extent.text_height(config));
    let separator_y = below.y + config.separator_offset;
    ops.push(DrawOp::Line {
        x1: geometry.margin_x,
        y1: separator_y,
        x2: geometry.width - geometry.margin_x,
        y2: separator_y,
        thickness: config.separator_thickness,
        color: config.palette.separator,
    });

    below.advance(config.pair_gap)
}

// -- Signature and footer ---------------------------------------------------------

/// Signature rule and caption, anchored to the page bottom. Returns the rule's
/// vertical position.
fn draw_signature(ops: &mut Vec<DrawOp>, geometry: &PageGeometry, config: &LayoutConfig) -> f32 {
    let y = geometry.height - geometry.bottom_margin - config.signature_offset;
    let center = geometry.width / 2.0;
    let half = config.signature_line_width / 2.0;

    ops.push(DrawOp::Line {
        x1: center - half,
        y1: y,
        x2: center + half,
        y2: y,
        thickness: config.signature_thickness,
        color: config.palette.accent,
    });
    push_centered_text(
        ops,
        &config.signature_caption,
        center,
        y + config.signature_caption_gap,
        config.font_size,
        FontWeight::Regular,
        config.palette.caption_text,
    );

    y
}

fn draw_footer(ops: &mut Vec<DrawOp>, geometry: &PageGeometry, config: &LayoutConfig, page_number: usize) {
    let text = format!("{} {}", config.footer_label, page_number);
    let width = text_width(&text, config.footer_font_size, FontWeight::Regular);
    ops.push(DrawOp::Text {
        x: geometry.width - geometry.margin_x - width,
        y: geometry.height - config.footer_offset,
        text,
        size: config.footer_font_size,
        weight: FontWeight::Regular,
        color: config.palette.footer_text,
    });
}

fn push_centered_text(
    ops: &mut Vec<DrawOp>,
    text: &str,
    center_x: f32,
    y: f32,
    size: f32,
    weight: FontWeight,
    color: fichas_core::Rgb,
) {
    let width = text_width(text, size, weight);
    ops.push(DrawOp::Text {
        text: text.to_string(),
        x: center_x - width / 2.0,
        y,
        size,
        weight,
        color,
    });
}
