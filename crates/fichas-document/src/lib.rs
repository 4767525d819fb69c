// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// fichas-document — Page layout and PDF generation for Fichas.
//
// Provides the two-pass page layout engine, logo/watermark decoding, the
// drawing-surface abstraction with its printpdf backend, and the document
// assembler that puts one record per page.

pub mod assemble;
pub mod export;
pub mod image;
pub mod layout;
pub mod pdf;
pub mod surface;

// Re-export the primary entry points so callers can use `fichas_document::export_pdf` etc.
pub use assemble::{PageSummary, assemble};
pub use export::{export_pdf, output_file_name, write_pdf};
pub use image::{ImageLoad, ImageSource, PageImages, load_images};
pub use layout::{DrawOp, PageLayout, render_page};
pub use pdf::{PdfReader, PdfSurface};
pub use surface::{DrawingSurface, RecordingSurface};
