//! Pixel buffers and the BGRA -> RGBA codec
//!
//! The renderer hands back raw device-independent-bitmap memory: top-down
//! rows, 4 bytes per pixel in B, G, R, A order, stride = width * 4. The codec
//! turns that into a [`PortableImage`] in canonical R, G, B, A order.

use image::RgbaImage;

use super::errors::IconError;

/// Bytes per 32-bit pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Raw top-down BGRA pixel memory, no row padding
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawPixelBuffer {
    bytes: Vec<u8>,
}

impl RawPixelBuffer {
    /// Zero-filled buffer sized for `width * height` pixels
    pub fn zeroed(width: u32, height: u32) -> Self {
        Self {
            bytes: vec![0u8; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    #[cfg(test)]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// True if at least one pixel has a non-zero alpha byte
    pub fn has_alpha(&self) -> bool {
        self.bytes
            .chunks_exact(BYTES_PER_PIXEL)
            .any(|bgra| bgra[3] > 0)
    }
}

/// Decoded image in canonical RGBA order
#[derive(Clone, Debug, PartialEq)]
pub struct PortableImage {
    pixels: RgbaImage,
}

impl PortableImage {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Pixel at (x, y) as [r, g, b, a]
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.pixels
    }

    /// True if at least one pixel has a non-zero alpha byte
    pub fn has_alpha(&self) -> bool {
        self.pixels.pixels().any(|p| p.0[3] > 0)
    }
}

/// Expected byte length for a `width * height` BGRA buffer
fn expected_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(BYTES_PER_PIXEL)
}

/// Reinterpret raw BGRA memory as an RGBA image of the same dimensions
///
/// Rejects any buffer whose length is not exactly `width * height * 4`.
pub fn decode(raw: &RawPixelBuffer, width: u32, height: u32) -> Result<PortableImage, IconError> {
    let actual = raw.len();
    let expected = expected_len(width, height).ok_or(IconError::Sizing {
        expected: usize::MAX,
        actual,
    })?;
    if actual != expected {
        return Err(IconError::Sizing { expected, actual });
    }

    let mut rgba = Vec::with_capacity(expected);
    for bgra in raw.as_bytes().chunks_exact(BYTES_PER_PIXEL) {
        rgba.extend_from_slice(&[bgra[2], bgra[1], bgra[0], bgra[3]]);
    }

    RgbaImage::from_raw(width, height, rgba)
        .map(PortableImage::from_rgba)
        .ok_or(IconError::Sizing { expected, actual })
}

/// Give a mask-only icon the alpha channel of its AND mask
///
/// `mask` is the icon's mask drawn into the same raw layout as the colour
/// image: black where the icon is visible, white where it is transparent.
/// Images that already carry alpha are returned unchanged, so colour data
/// never decides visibility.
pub fn apply_mask(
    image: PortableImage,
    mask: &RawPixelBuffer,
) -> Result<PortableImage, IconError> {
    if image.has_alpha() {
        return Ok(image);
    }

    let actual = mask.len();
    let expected = expected_len(image.width(), image.height()).ok_or(IconError::Sizing {
        expected: usize::MAX,
        actual,
    })?;
    if actual != expected {
        return Err(IconError::Sizing { expected, actual });
    }

    let mut pixels = image.into_rgba();
    for (pixel, bgra) in pixels
        .pixels_mut()
        .zip(mask.as_bytes().chunks_exact(BYTES_PER_PIXEL))
    {
        let visible = bgra[..3].iter().all(|&c| c == 0);
        pixel.0[3] = if visible { 255 } else { 0 };
    }
    Ok(PortableImage::from_rgba(pixels))
}
