//! Icon resources straight from an executable (SHDefExtractIconW)
//!
//! The resource is asked for at the render size, so the best matching image
//! in the icon group is used instead of the 32 pixel system icon. The handle
//! then goes through the same guarded renderer and codec as shell icons.

use std::iter;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use windows::core::PCWSTR;
use windows::Win32::UI::Shell::SHDefExtractIconW;
use windows::Win32::UI::WindowsAndMessaging::{DestroyIcon, HICON};

use super::gdi::Win32Gdi;
use crate::application::ports::IconExtractor;
use crate::application::use_cases::{rasterize, OwnedIcon};
use crate::domain::{IconError, IconHandle, PortableImage};

/// Extracts the icon at a resource index
pub struct ResourceIconExtractor {
    gdi: Win32Gdi,
    repair_alpha: bool,
}

impl ResourceIconExtractor {
    pub fn new(repair_alpha: bool) -> Self {
        Self {
            gdi: Win32Gdi::new(),
            repair_alpha,
        }
    }
}

impl IconExtractor for ResourceIconExtractor {
    fn extract(
        &self,
        exe_path: &Path,
        index: u32,
        size: u32,
    ) -> Result<PortableImage, IconError> {
        if !exe_path.is_file() {
            return Err(IconError::Extraction(format!(
                "{} does not exist",
                exe_path.display()
            )));
        }

        let path_wide: Vec<u16> = exe_path
            .as_os_str()
            .encode_wide()
            .chain(iter::once(0))
            .collect();
        let mut large = HICON::default();
        // Low word carries the large icon size
        let extracted = unsafe {
            SHDefExtractIconW(
                PCWSTR(path_wide.as_ptr()),
                index as i32,
                0,
                Some(&mut large as *mut HICON),
                None,
                size & 0xFFFF,
            )
        };

        if let Err(e) = extracted {
            return Err(IconError::Extraction(format!(
                "no icon at index {} in {}: {}",
                index,
                exe_path.display(),
                e
            )));
        }
        if large.is_invalid() {
            return Err(IconError::Extraction(format!(
                "no icon at index {} in {}",
                index,
                exe_path.display()
            )));
        }

        let Some(handle) = IconHandle::from_raw(large.0 as isize) else {
            if let Err(e) = unsafe { DestroyIcon(large) } {
                log!("  DestroyIcon({:?}) failed: {:#x}", large.0, e.code().0);
            }
            return Err(IconError::Extraction(format!(
                "invalid icon handle from {}",
                exe_path.display()
            )));
        };

        log!("  Extracted icon {} at {}x{}", index, size, size);
        rasterize(
            &self.gdi,
            OwnedIcon::new(&self.gdi, handle),
            size,
            self.repair_alpha,
        )
    }
}
