// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render surface — an in-memory RGBA canvas of declared size that renderers
// draw a page onto, and that encodes itself as JPEG or PNG using the `image`
// crate.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use lesefluss_core::error::{LeseflussError, Result};
use lesefluss_core::types::RasterFormat;
use tracing::{debug, instrument};

use crate::traits::RasterEncoder;

/// Opaque white, the background of a freshly created canvas.
pub const PAPER_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A page-sized pixel surface.
///
/// ```ignore
/// let mut canvas = Canvas::new(1240, 1754)?;
/// renderer.render(1, &mut canvas).await?;
/// let png = canvas.encode_png()?;
/// ```
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    // -- Construction ---------------------------------------------------------

    /// Create a white surface of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LeseflussError::RenderError(format!(
                "render surface must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, PAPER_WHITE),
        })
    }

    /// Decode an encoded image (JPEG, PNG, etc.) into a canvas.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_encoded(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)
            .map_err(|err| LeseflussError::ImageError(format!("failed to decode image: {}", err)))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self::from_dynamic(img))
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgba8(),
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Mutable access to the pixel buffer for renderers.
    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    // -- Drawing --------------------------------------------------------------

    /// Fill an axis-aligned rectangle; the part outside the surface is
    /// ignored.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
        let x_end = x.saturating_add(width).min(self.image.width());
        let y_end = y.saturating_add(height).min(self.image.height());
        for py in y..y_end {
            for px in x..x_end {
                self.image.put_pixel(px, py, color);
            }
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode in the given format.
    pub fn encode(&self, format: RasterFormat) -> Result<Vec<u8>> {
        match format {
            RasterFormat::Jpeg { quality } => self.encode_jpeg(quality),
            RasterFormat::Png => self.encode_png(),
        }
    }
}

impl RasterEncoder for Canvas {
    fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>> {
        let quality = quality.clamp(1, 100);
        let mut buffer = Vec::new();
        // JPEG has no alpha channel.
        let rgb = DynamicImage::ImageRgba8(self.image.clone()).to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb.write_with_encoder(encoder)
            .map_err(|err| LeseflussError::ImageError(format!("JPEG encoding failed: {}", err)))?;
        debug!(quality, bytes = buffer.len(), "JPEG encoded");
        Ok(buffer)
    }

    fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| LeseflussError::ImageError(format!("PNG encoding failed: {}", err)))?;
        debug!(bytes = buffer.len(), "PNG encoded");
        Ok(buffer)
    }
}
