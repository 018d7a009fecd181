//! GdiPort - interface to the drawing surfaces used for rasterizing icons
//!
//! Every acquiring call has exactly one matching release call. The renderer
//! pairs them through scoped guards; implementations only forward to the
//! platform.

use crate::domain::{Bitmap, DeviceContext, DibHeader, IconHandle};

/// Platform error code (last-error value)
pub type PlatformCode = u32;

/// Which part of an icon a draw call produces
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawLayer {
    /// Colour image composited through the mask
    Image,
    /// The AND mask alone: black where the icon is visible, white elsewhere
    Mask,
}

/// Port interface for device contexts, bitmaps and icon drawing
pub trait GdiPort {
    /// Borrow the screen device context. Must be returned with
    /// [`GdiPort::release_screen_dc`], never deleted.
    fn screen_dc(&self) -> DeviceContext;

    /// Return a borrowed screen context
    fn release_screen_dc(&self, dc: DeviceContext) -> Result<(), PlatformCode>;

    /// Create an owned memory context compatible with `dc`
    fn create_memory_dc(&self, dc: DeviceContext) -> DeviceContext;

    /// Destroy an owned memory context
    fn delete_dc(&self, dc: DeviceContext) -> Result<(), PlatformCode>;

    /// Create an owned off-screen bitmap compatible with `dc`
    fn create_bitmap(&self, dc: DeviceContext, width: u32, height: u32) -> Bitmap;

    /// Destroy an owned bitmap. It must not be selected into any context.
    fn delete_bitmap(&self, bitmap: Bitmap) -> Result<(), PlatformCode>;

    /// Select `bitmap` into `dc`, returning the previously selected one
    fn select_bitmap(&self, dc: DeviceContext, bitmap: Bitmap) -> Bitmap;

    /// Draw one layer of `icon` at the origin of `dc`, scaled to `size`
    fn draw_icon(
        &self,
        dc: DeviceContext,
        icon: IconHandle,
        size: u32,
        layer: DrawLayer,
    ) -> Result<(), PlatformCode>;

    /// Copy the bits of `bitmap` into `buffer` using the layout in `header`.
    /// Returns the number of scan lines copied.
    fn read_bits(
        &self,
        dc: DeviceContext,
        bitmap: Bitmap,
        header: &DibHeader,
        buffer: &mut [u8],
    ) -> Result<u32, PlatformCode>;

    /// Destroy an icon handle
    fn destroy_icon(&self, icon: IconHandle) -> Result<(), PlatformCode>;
}
