//! Opaque native handle values
//!
//! These are plain numbers as far as the domain is concerned. They are never
//! dereferenced, only handed back to the platform that issued them.

/// Largest value the platform issues for user-object handles.
///
/// Icon handles are 32-bit significant even in 64-bit processes, so anything
/// above this (or any non-positive value) is not a handle.
pub const MAX_HANDLE_VALUE: isize = if isize::BITS > 32 {
    u32::MAX as isize
} else {
    isize::MAX
};

/// A loaded icon resource
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IconHandle(isize);

impl IconHandle {
    /// Accept a raw value only if it lies inside the valid handle range
    pub fn from_raw(raw: isize) -> Option<Self> {
        if is_valid_handle(raw) {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub fn raw(self) -> isize {
        self.0
    }
}

/// Whether a raw value lies inside the platform's valid handle range
pub fn is_valid_handle(raw: isize) -> bool {
    raw > 0 && raw <= MAX_HANDLE_VALUE
}

/// A drawing surface (screen or memory)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeviceContext(pub isize);

impl DeviceContext {
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// A GDI bitmap
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bitmap(pub isize);

impl Bitmap {
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Header describing the layout requested from a bitmap read-back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DibHeader {
    /// Size of the header structure in bytes
    pub size: u32,
    pub width: i32,
    /// Negative for top-down row order
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    /// 0 = uncompressed RGB
    pub compression: u32,
}

impl DibHeader {
    /// Size of a BITMAPINFOHEADER
    pub const HEADER_SIZE: u32 = 40;
    pub const UNCOMPRESSED: u32 = 0;

    /// 32bpp uncompressed, rows top-down
    pub fn top_down_bgra(width: u32, height: u32) -> Self {
        Self {
            size: Self::HEADER_SIZE,
            width: width as i32,
            height: -(height as i32),
            planes: 1,
            bit_count: 32,
            compression: Self::UNCOMPRESSED,
        }
    }

    /// Number of rows described by the header
    pub fn rows(&self) -> u32 {
        self.height.unsigned_abs()
    }
}
