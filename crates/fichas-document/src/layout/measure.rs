// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Measure pass — wraps every pair at the fixed column widths and sums the
// vertical extent of the content block. Pure: no drawing happens here.

use fichas_core::{ClassifiedPairs, FieldPair, LayoutConfig, PageGeometry};

use super::FontWeight;
use super::metrics::wrap_text;

/// Wrapped lines for one label/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairExtent {
    /// Bold label lines, `label:` form.
    pub label_lines: Vec<String>,
    pub value_lines: Vec<String>,
}

impl PairExtent {
    /// Number of text lines the pair occupies: the taller of the two columns.
    pub fn line_count(&self) -> usize {
        self.label_lines.len().max(self.value_lines.len())
    }

    /// Height of the text lines alone.
    pub fn text_height(&self, config: &LayoutConfig) -> f32 {
        self.line_count() as f32 * config.line_height()
    }

    /// Vertical advance of the whole pair block, separator and gap included.
    pub fn advance(&self, config: &LayoutConfig) -> f32 {
        self.text_height(config) + config.pair_gap
    }
}

/// Result of the measure pass for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPlan {
    pub ordinary: Vec<PairExtent>,
    pub emergency: Vec<PairExtent>,
    /// Total height of the content block.
    pub height: f32,
}

impl ContentPlan {
    pub fn has_emergency(&self) -> bool {
        !self.emergency.is_empty()
    }
}

/// Wrap one pair at the configured column widths.
pub fn measure_pair(pair: &FieldPair, config: &LayoutConfig) -> PairExtent {
    let label = format!("{}:", pair.label);
    PairExtent {
        label_lines: wrap_text(
            &label,
            config.label_column_width,
            config.font_size,
            FontWeight::Bold,
        ),
        value_lines: wrap_text(
            &pair.value,
            config.value_column_width(),
            config.font_size,
            FontWeight::Regular,
        ),
    }
}

/// Measure the whole content block: ordinary pairs, then (when present) the
/// emergency heading and its pairs.
pub fn measure_content(pairs: &ClassifiedPairs, config: &LayoutConfig) -> ContentPlan {
    let ordinary: Vec<PairExtent> = pairs
        .ordinary
        .iter()
        .map(|p| measure_pair(p, config))
        .collect();
    let emergency: Vec<PairExtent> = pairs
        .emergency
        .iter()
        .map(|p| measure_pair(p, config))
        .collect();

    let mut height: f32 = ordinary.iter().map(|e| e.advance(config)).sum();
    if !emergency.is_empty() {
        height += config.section_gap + config.heading_advance;
        height += emergency.iter().map(|e| e.advance(config)).sum::<f32>();
    }

    ContentPlan {
        ordinary,
        emergency,
        height,
    }
}

/// Vertical space between the header band and the signature area that the
/// content block is centred in.
pub fn available_height(geometry: &PageGeometry, config: &LayoutConfig) -> f32 {
    geometry.height
        - config.header_height
        - geometry.bottom_margin
        - (config.content_top_gap + config.content_bottom_reserve)
}

/// Offset that centres a block of `content_height` in the available space.
/// Never negative, so overlong content starts right under the header.
pub fn centering_offset(content_height: f32, geometry: &PageGeometry, config: &LayoutConfig) -> f32 {
    ((available_height(geometry, config) - content_height) / 2.0).max(0.0)
}

/// Baseline of the first content line.
pub fn content_top(content_height: f32, geometry: &PageGeometry, config: &LayoutConfig) -> f32 {
    config.header_height
        + config.content_top_gap
        + centering_offset(content_height, geometry, config)
}
