// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image decoder — turns logo/watermark bytes into shared `ImageAsset`s using
// the `image` crate.
//
// Failure never propagates out of the public loaders: a missing file or an
// undecodable payload becomes `ImageLoad::Absent` and the page is rendered
// without that image.

use std::path::PathBuf;

use fichas_core::ImageAsset;
use fichas_core::error::{FichasError, Result};
use tracing::{debug, info, instrument, warn};

/// Outcome of loading one optional image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLoad {
    Present(ImageAsset),
    /// Not configured, unreadable, or undecodable. Carries the reason.
    Absent(String),
}

impl ImageLoad {
    pub fn into_option(self) -> Option<ImageAsset> {
        match self {
            Self::Present(asset) => Some(asset),
            Self::Absent(_) => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageSource {
    #[default]
    None,
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Decode encoded bytes (PNG, JPEG, ...) into an `ImageAsset`.
///
/// Images with an alpha channel keep it (RGBA8); everything else is
/// flattened to RGB8.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn try_decode(data: &[u8]) -> Result<ImageAsset> {
    let img = ::image::load_from_memory(data)
        .map_err(|err| FichasError::ImageUnavailable(format!("failed to decode image: {}", err)))?;

    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(FichasError::ImageUnavailable(format!(
            "image has no area ({}x{})",
            width, height
        )));
    }

    let has_alpha = img.color().has_alpha();
    let pixels = if has_alpha {
        img.to_rgba8().into_raw()
    } else {
        img.to_rgb8().into_raw()
    };

    debug!(width, height, has_alpha, "Image decoded from bytes");

    Ok(ImageAsset {
        pixels,
        width,
        height,
        has_alpha,
    })
}

/// Decode bytes, folding any failure into `ImageLoad::Absent`.
pub fn decode(data: &[u8]) -> ImageLoad {
    match try_decode(data) {
        Ok(asset) => ImageLoad::Present(asset),
        Err(err) => {
            warn!(%err, "Image skipped");
            ImageLoad::Absent(err.to_string())
        }
    }
}

/// Read and decode an image source. Blocking; see [`load_images`] for the
/// concurrent variant.
#[instrument(skip_all)]
pub fn load(source: &ImageSource) -> ImageLoad {
    match source {
        ImageSource::None => ImageLoad::Absent("no image configured".into()),
        ImageSource::Bytes(data) => decode(data),
        ImageSource::Path(path) => match std::fs::read(path) {
            Ok(data) => {
                info!(path = %path.display(), bytes = data.len(), "Image read");
                decode(&data)
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "Image file unreadable, skipped");
                ImageLoad::Absent(format!("failed to read {}: {}", path.display(), err))
            }
        },
    }
}

/// The decoded images shared by every page of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageImages {
    pub logo: Option<ImageAsset>,
    pub watermark: Option<ImageAsset>,
}

impl PageImages {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Load the logo and watermark concurrently. Both resolve (present or
/// absent) before this returns.
pub async fn load_images(logo: ImageSource, watermark: ImageSource) -> PageImages {
    let (logo, watermark) = tokio::join!(load_blocking(logo), load_blocking(watermark));
    PageImages {
        logo: logo.into_option(),
        watermark: watermark.into_option(),
    }
}

async fn load_blocking(source: ImageSource) -> ImageLoad {
    match tokio::task::spawn_blocking(move || load(&source)).await {
        Ok(result) => result,
        Err(err) => {
            warn!(%err, "Image loading task failed");
            ImageLoad::Absent(format!("image loading task failed: {}", err))
        }
    }
}
