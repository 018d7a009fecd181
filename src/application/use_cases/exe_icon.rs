//! ExeIcon - produce an image from an executable's own icon resource
//!
//! Unlike the shell path, the resource is rasterized close to the requested
//! size so large outputs are not upscaled from a 32 pixel icon.

use std::path::Path;

use super::render_icon::NATIVE_ICON_SIZE;
use crate::application::ports::{IconExtractor, ImageEncoder};
use crate::domain::IconOutcome;

/// Largest image an icon resource holds
pub const MAX_RESOURCE_ICON_SIZE: u32 = 256;

/// Raster size for a requested output size
pub fn resource_render_size(requested: u32) -> u32 {
    requested.clamp(NATIVE_ICON_SIZE, MAX_RESOURCE_ICON_SIZE)
}

/// Use case for the "exe" mode
pub struct ExeIcon<'a, X, E>
where
    X: IconExtractor,
    E: ImageEncoder,
{
    extractor: &'a X,
    encoder: &'a E,
}

impl<'a, X, E> ExeIcon<'a, X, E>
where
    X: IconExtractor,
    E: ImageEncoder,
{
    pub fn new(extractor: &'a X, encoder: &'a E) -> Self {
        Self { extractor, encoder }
    }

    /// Write icon `index` of `exe_path` to `output` at `size x size`.
    /// There is no fallback image in this mode.
    pub fn execute(&self, exe_path: &Path, index: u32, output: &Path, size: u32) -> IconOutcome {
        log_fn!(
            "ExeIcon::execute",
            "exe='{}' index={} output='{}' size={}",
            exe_path.display(),
            index,
            output.display(),
            size
        );

        let render_size = resource_render_size(size);
        let image = match self.extractor.extract(exe_path, index, render_size) {
            Ok(image) => image,
            Err(e) => {
                log!("  {}", e);
                return IconOutcome::failed(e);
            }
        };
        log!("  Extracted {}x{} icon", image.width(), image.height());

        match self.encoder.write_square(&image, size, output) {
            Ok(()) => {
                log!("  Icon saved to {}", output.display());
                IconOutcome::produced(output)
            }
            Err(e) => {
                log!("  Writing {} failed: {}", output.display(), e);
                IconOutcome::failed(e)
            }
        }
    }
}
