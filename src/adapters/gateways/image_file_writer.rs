//! ImageFileWriter - resize and encode through the `image` crate

use std::path::Path;

use image::imageops::{self, FilterType};
use image::ImageFormat;

use crate::application::ports::ImageEncoder;
use crate::domain::{IconError, PortableImage};

/// Writes square, Lanczos-resampled images to disk
pub struct ImageFileWriter {
    filter: FilterType,
}

impl ImageFileWriter {
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageEncoder for ImageFileWriter {
    fn write_square(
        &self,
        image: &PortableImage,
        size: u32,
        output: &Path,
    ) -> Result<(), IconError> {
        if size == 0 {
            return Err(IconError::Encode("target size must be at least 1".to_string()));
        }

        // Check the format before doing any work
        let format = ImageFormat::from_path(output)?;

        let resized = if image.width() == size && image.height() == size {
            image.as_rgba().clone()
        } else {
            imageops::resize(image.as_rgba(), size, size, self.filter)
        };

        // Formats without alpha (jpeg, ...) get an RGB copy
        let result = match format {
            ImageFormat::Jpeg | ImageFormat::Pnm => {
                image::DynamicImage::ImageRgba8(resized)
                    .to_rgb8()
                    .save_with_format(output, format)
            }
            _ => resized.save_with_format(output, format),
        };
        result.map_err(IconError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn solid(width: u32, height: u32) -> PortableImage {
        PortableImage::from_rgba(RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255])))
    }

    #[test]
    fn test_write_png_resized() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("icon.png");

        ImageFileWriter::new()
            .write_square(&solid(32, 32), 64, &output)
            .unwrap();

        let written = image::open(&output).unwrap().to_rgba8();
        assert_eq!(written.dimensions(), (64, 64));
        assert_eq!(written.get_pixel(10, 10).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_format_follows_extension() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("icon.bmp");

        ImageFileWriter::new()
            .write_square(&solid(32, 32), 16, &output)
            .unwrap();

        assert_eq!(
            image::ImageFormat::from_path(&output).unwrap(),
            ImageFormat::Bmp
        );
        assert_eq!(image::image_dimensions(&output).unwrap(), (16, 16));
    }

    #[test]
    fn test_jpeg_drops_alpha() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("icon.jpg");

        ImageFileWriter::new()
            .write_square(&solid(32, 32), 32, &output)
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (32, 32));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("icon.nope");

        let result = ImageFileWriter::new().write_square(&solid(32, 32), 16, &output);

        assert!(matches!(result, Err(IconError::Encode(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_zero_size_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("icon.png");

        assert!(ImageFileWriter::new()
            .write_square(&solid(4, 4), 0, &output)
            .is_err());
        assert!(!output.exists());
    }
}
