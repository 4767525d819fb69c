// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout configuration. Every constant that governs page layout lives here so
// a document is rendered consistently from first page to last.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FichasError, Result};
use crate::types::{PageGeometry, PaperSize, Rgb};

/// Brand palette (black / red / white).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Header band fill.
    pub band: Rgb,
    /// Accent bar, emergency heading, and signature rule.
    pub accent: Rgb,
    /// Title text on the band.
    pub on_band: Rgb,
    /// Separator lines between pairs.
    pub separator: Rgb,
    pub label_text: Rgb,
    pub value_text: Rgb,
    pub caption_text: Rgb,
    pub footer_text: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            band: Rgb(20, 20, 20),
            accent: Rgb(220, 38, 38),
            on_band: Rgb(255, 255, 255),
            separator: Rgb(230, 230, 230),
            label_text: Rgb::gray(30),
            value_text: Rgb::gray(20),
            caption_text: Rgb::gray(60),
            footer_text: Rgb::gray(120),
        }
    }
}

/// Page layout settings. All lengths are PDF points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub paper_size: PaperSize,
    /// Left/right page margin.
    pub margin_x: f32,
    pub bottom_margin: f32,
    /// Height of the filled header band.
    pub header_height: f32,
    /// Thickness of the accent bar under the band.
    pub accent_bar_height: f32,
    /// Edge of the square logo drawn in the band.
    pub logo_size: f32,
    pub title: String,
    pub title_font_size: f32,
    /// Baseline of the title relative to the band's vertical centre.
    pub title_baseline_shift: f32,
    /// Width of the bold label column; values take the rest of the content width.
    pub label_column_width: f32,
    pub font_size: f32,
    /// Added to `font_size` to get the line height.
    pub line_padding: f32,
    /// Distance from the last text line of a pair to its separator.
    pub separator_offset: f32,
    pub separator_thickness: f32,
    /// Extra advance after each pair, separator included.
    pub pair_gap: f32,
    /// Gap before the emergency heading.
    pub section_gap: f32,
    /// Advance from the emergency heading baseline to the first emergency pair.
    pub heading_advance: f32,
    pub emergency_heading: String,
    pub heading_font_size: f32,
    /// Space kept between the header band and the centred content block.
    pub content_top_gap: f32,
    /// Space kept free above the bottom margin for the signature block.
    pub content_bottom_reserve: f32,
    /// Distance of the signature rule above the bottom margin.
    pub signature_offset: f32,
    pub signature_line_width: f32,
    pub signature_thickness: f32,
    pub signature_caption: String,
    /// Caption baseline below the signature rule.
    pub signature_caption_gap: f32,
    /// Footer baseline above the bottom page edge.
    pub footer_offset: f32,
    pub footer_font_size: f32,
    /// Prefix for the page number, e.g. `Página 3`.
    pub footer_label: String,
    pub watermark_opacity: f32,
    /// Largest share of the page width and height the watermark may cover.
    pub watermark_fit: f32,
    /// Use PDF soft transparency for the watermark. When off, the watermark
    /// is composited opaque.
    pub allow_transparency: bool,
    pub palette: Palette,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            margin_x: 44.0,
            bottom_margin: 32.0,
            header_height: 70.0,
            accent_bar_height: 4.0,
            logo_size: 40.0,
            title: "FICHA DE INSCRIÇÃO FORJADOS MC".into(),
            title_font_size: 15.0,
            title_baseline_shift: 5.0,
            label_column_width: 200.0,
            font_size: 11.0,
            line_padding: 8.0,
            separator_offset: 2.0,
            separator_thickness: 0.3,
            pair_gap: 6.0,
            section_gap: 18.0,
            heading_advance: 14.0,
            emergency_heading: "CONTATOS DE EMERGÊNCIA".into(),
            heading_font_size: 12.0,
            content_top_gap: 40.0,
            content_bottom_reserve: 140.0,
            signature_offset: 60.0,
            signature_line_width: 280.0,
            signature_thickness: 1.3,
            signature_caption: "Assinatura Membro".into(),
            signature_caption_gap: 14.0,
            footer_offset: 20.0,
            footer_font_size: 9.0,
            footer_label: "Página".into(),
            watermark_opacity: 0.07,
            watermark_fit: 0.6,
            allow_transparency: true,
            palette: Palette::default(),
        }
    }
}

impl LayoutConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a page.
    pub fn validate(&self) -> Result<()> {
        let geometry = self.geometry();
        if geometry.width <= 0.0 || geometry.height <= 0.0 {
            return Err(FichasError::Config("page size must be positive".into()));
        }
        if self.font_size <= 0.0 {
            return Err(FichasError::Config("font_size must be positive".into()));
        }
        if self.label_column_width <= 0.0 || self.value_column_width() <= 0.0 {
            return Err(FichasError::Config(format!(
                "label_column_width {} leaves no room for values inside {} pt of content",
                self.label_column_width,
                geometry.content_width()
            )));
        }
        if !(0.0..=1.0).contains(&self.watermark_opacity) {
            return Err(FichasError::Config(
                "watermark_opacity must be within 0..=1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.watermark_fit) || self.watermark_fit == 0.0 {
            return Err(FichasError::Config(
                "watermark_fit must be within (0, 1]".into(),
            ));
        }
        Ok(())
    }

    /// Page size and margins derived from the paper size.
    pub fn geometry(&self) -> PageGeometry {
        let (width, height) = self.paper_size.dimensions_pt();
        PageGeometry {
            width,
            height,
            margin_x: self.margin_x,
            bottom_margin: self.bottom_margin,
        }
    }

    pub fn line_height(&self) -> f32 {
        self.font_size + self.line_padding
    }

    pub fn value_column_width(&self) -> f32 {
        self.geometry().content_width() - self.label_column_width
    }
}
