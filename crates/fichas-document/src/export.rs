// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export entry points — empty-dataset guard, PDF serialisation, and output
// file naming.

use std::path::Path;

use fichas_core::error::{FichasError, Result};
use fichas_core::{CleanRowSet, LayoutConfig};
use tracing::{info, instrument};

use crate::assemble::assemble;
use crate::image::PageImages;
use crate::pdf::PdfSurface;

/// Stem used when the input name has none.
const DEFAULT_STEM: &str = "relatorio";

/// Build the record PDF for a clean snapshot.
///
/// Fails with [`FichasError::EmptyDataset`] before any drawing when the
/// snapshot has no rows or no columns.
#[instrument(skip_all, fields(rows = snapshot.rows.len()))]
pub fn export_pdf(
    snapshot: &CleanRowSet,
    images: &PageImages,
    config: &LayoutConfig,
) -> Result<Vec<u8>> {
    if snapshot.is_empty() {
        return Err(FichasError::EmptyDataset);
    }

    let mut surface = PdfSurface::new(&config.title, config, images);
    let pages = assemble(&mut surface, snapshot, images, config)?;
    let bytes = surface.finish();

    info!(pages = pages.len(), bytes = bytes.len(), "Export complete");
    Ok(bytes)
}

/// Export and write the PDF to `path`.
pub fn write_pdf(
    path: impl AsRef<Path>,
    snapshot: &CleanRowSet,
    images: &PageImages,
    config: &LayoutConfig,
) -> Result<()> {
    let bytes = export_pdf(snapshot, images, config)?;
    std::fs::write(path.as_ref(), &bytes)?;
    info!("Wrote PDF to {}", path.as_ref().display());
    Ok(())
}

/// Output file name for an input file: the base name with its last extension
/// replaced by `.pdf`.
pub fn output_file_name(input_name: &str) -> String {
    let base = input_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(input_name);
    let stem = match base.rfind('.') {
        Some(dot) => &base[..dot],
        None => base,
    };
    if stem.is_empty() {
        format!("{}.pdf", DEFAULT_STEM)
    } else {
        format!("{}.pdf", stem)
    }
}
