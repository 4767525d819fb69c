// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding of the logo and watermark.

pub mod decoder;

pub use decoder::{ImageLoad, ImageSource, PageImages, load, load_images};
