//! Image collaborators - extraction from executables, resize and encode

use std::path::Path;

use crate::domain::{IconError, PortableImage};

/// Pulls an icon resource straight out of an executable
pub trait IconExtractor {
    /// Decode icon number `index` of `exe_path`, rasterized at
    /// `size x size` from the best matching image in the resource
    fn extract(&self, exe_path: &Path, index: u32, size: u32)
        -> Result<PortableImage, IconError>;
}

/// Resizes an image and writes it to disk
pub trait ImageEncoder {
    /// Resample `image` to `size x size` and write it to `output`, in the
    /// format implied by the output's extension
    fn write_square(&self, image: &PortableImage, size: u32, output: &Path)
        -> Result<(), IconError>;
}
