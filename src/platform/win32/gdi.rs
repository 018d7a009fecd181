//! GDI access for off-screen icon rendering
//!
//! Thin forwarding layer: each method is one Win32 call. Pairing and
//! ordering of releases is the renderer's job.

use std::ffi::c_void;

use windows::Win32::Foundation::{GetLastError, HWND};
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, DIB_RGB_COLORS,
    HBITMAP, HBRUSH, HDC,
};
use windows::Win32::UI::WindowsAndMessaging::{
    DestroyIcon, DrawIconEx, DI_FLAGS, DI_MASK, DI_NORMAL, HICON,
};

use crate::application::ports::{DrawLayer, GdiPort, PlatformCode};
use crate::domain::{Bitmap, DeviceContext, DibHeader, IconHandle};

fn hdc(dc: DeviceContext) -> HDC {
    HDC(dc.0 as *mut c_void)
}

fn hbitmap(bitmap: Bitmap) -> HBITMAP {
    HBITMAP(bitmap.0 as *mut c_void)
}

pub(crate) fn hicon(icon: IconHandle) -> HICON {
    HICON(icon.raw() as *mut c_void)
}

fn draw_flags(layer: DrawLayer) -> DI_FLAGS {
    match layer {
        DrawLayer::Image => DI_NORMAL,
        // DI_MASK alone copies the mask over the destination
        DrawLayer::Mask => DI_MASK,
    }
}

fn last_error() -> PlatformCode {
    unsafe { GetLastError().0 }
}

/// The real GDI
#[derive(Clone, Copy, Debug, Default)]
pub struct Win32Gdi;

impl Win32Gdi {
    pub fn new() -> Self {
        Self
    }
}

impl GdiPort for Win32Gdi {
    fn screen_dc(&self) -> DeviceContext {
        let dc = unsafe { GetDC(HWND::default()) };
        DeviceContext(dc.0 as isize)
    }

    fn release_screen_dc(&self, dc: DeviceContext) -> Result<(), PlatformCode> {
        // ReleaseDC returns 1 when the context was released
        match unsafe { ReleaseDC(HWND::default(), hdc(dc)) } {
            1 => Ok(()),
            _ => Err(last_error()),
        }
    }

    fn create_memory_dc(&self, dc: DeviceContext) -> DeviceContext {
        let memory = unsafe { CreateCompatibleDC(hdc(dc)) };
        DeviceContext(memory.0 as isize)
    }

    fn delete_dc(&self, dc: DeviceContext) -> Result<(), PlatformCode> {
        if unsafe { DeleteDC(hdc(dc)) }.as_bool() {
            Ok(())
        } else {
            Err(last_error())
        }
    }

    fn create_bitmap(&self, dc: DeviceContext, width: u32, height: u32) -> Bitmap {
        let bitmap = unsafe { CreateCompatibleBitmap(hdc(dc), width as i32, height as i32) };
        Bitmap(bitmap.0 as isize)
    }

    fn delete_bitmap(&self, bitmap: Bitmap) -> Result<(), PlatformCode> {
        if unsafe { DeleteObject(hbitmap(bitmap)) }.as_bool() {
            Ok(())
        } else {
            Err(last_error())
        }
    }

    fn select_bitmap(&self, dc: DeviceContext, bitmap: Bitmap) -> Bitmap {
        let previous = unsafe { SelectObject(hdc(dc), hbitmap(bitmap)) };
        Bitmap(previous.0 as isize)
    }

    fn draw_icon(
        &self,
        dc: DeviceContext,
        icon: IconHandle,
        size: u32,
        layer: DrawLayer,
    ) -> Result<(), PlatformCode> {
        unsafe {
            DrawIconEx(
                hdc(dc),
                0,
                0,
                hicon(icon),
                size as i32,
                size as i32,
                0,
                HBRUSH::default(),
                draw_flags(layer),
            )
        }
        .map_err(|_| last_error())
    }

    fn read_bits(
        &self,
        dc: DeviceContext,
        bitmap: Bitmap,
        header: &DibHeader,
        buffer: &mut [u8],
    ) -> Result<u32, PlatformCode> {
        let rows = header.rows();
        let needed = header.width.unsigned_abs() as usize * rows as usize * 4;
        if buffer.len() < needed {
            return Err(0);
        }

        let mut bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: header.size,
                biWidth: header.width,
                biHeight: header.height,
                biPlanes: header.planes,
                biBitCount: header.bit_count,
                biCompression: header.compression,
                biSizeImage: 0,
                biXPelsPerMeter: 0,
                biYPelsPerMeter: 0,
                biClrUsed: 0,
                biClrImportant: 0,
            },
            bmiColors: [Default::default()],
        };

        let lines = unsafe {
            GetDIBits(
                hdc(dc),
                hbitmap(bitmap),
                0,
                rows,
                Some(buffer.as_mut_ptr() as *mut _),
                &mut bmi,
                DIB_RGB_COLORS,
            )
        };

        if lines <= 0 {
            Err(last_error())
        } else {
            Ok(lines as u32)
        }
    }

    fn destroy_icon(&self, icon: IconHandle) -> Result<(), PlatformCode> {
        unsafe { DestroyIcon(hicon(icon)) }.map_err(|_| last_error())
    }
}
