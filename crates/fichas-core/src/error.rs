// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Fichas.

use thiserror::Error;

/// Top-level error type for all Fichas operations.
#[derive(Debug, Error)]
pub enum FichasError {
    // -- Dataset errors --
    #[error("nothing to export: the sheet has no rows or no columns after cleaning")]
    EmptyDataset,

    // -- Document errors --
    #[error("image unavailable: {0}")]
    ImageUnavailable(String),

    #[error("drawing surface does not support transparency")]
    TransparencyUnsupported,

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FichasError>;
