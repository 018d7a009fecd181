//! OffscreenRenderer - rasterize an icon handle into raw BGRA memory
//!
//! Four native resources take part in one render: the borrowed screen
//! context, an owned memory context, an owned bitmap and the bitmap
//! selection. Each lives in a guard that releases it on drop. Guards are
//! declared in acquisition order so Rust drops them in the reverse order:
//! restore selection, delete bitmap, delete memory context, release screen
//! context. This runs exactly once on every exit path.
//!
//! Icons without an alpha channel get a second pass inside the same guards
//! that draws only their mask, so transparency comes from the mask and never
//! from colour values.

use crate::application::ports::{DrawLayer, GdiPort};
use crate::domain::{
    apply_mask, decode, Bitmap, DeviceContext, DibHeader, IconError, IconHandle, PortableImage,
    RawPixelBuffer,
};

/// Native raster resolution for shell icons
pub const NATIVE_ICON_SIZE: u32 = 32;

/// Borrowed screen context, returned on drop
struct ScreenDc<'g, G: GdiPort> {
    gdi: &'g G,
    dc: DeviceContext,
}

impl<'g, G: GdiPort> ScreenDc<'g, G> {
    fn acquire(gdi: &'g G) -> Result<Self, IconError> {
        let dc = gdi.screen_dc();
        if dc.is_null() {
            return Err(IconError::render("screen device context unavailable"));
        }
        Ok(Self { gdi, dc })
    }
}

impl<G: GdiPort> Drop for ScreenDc<'_, G> {
    fn drop(&mut self) {
        if let Err(code) = self.gdi.release_screen_dc(self.dc) {
            log!("  ReleaseDC({:#x}) failed: {}", self.dc.0, code);
        }
    }
}

/// Owned memory context, deleted on drop
struct MemoryDc<'g, G: GdiPort> {
    gdi: &'g G,
    dc: DeviceContext,
}

impl<'g, G: GdiPort> MemoryDc<'g, G> {
    fn create(gdi: &'g G, screen: DeviceContext) -> Result<Self, IconError> {
        let dc = gdi.create_memory_dc(screen);
        if dc.is_null() {
            return Err(IconError::render("memory device context creation failed"));
        }
        Ok(Self { gdi, dc })
    }
}

impl<G: GdiPort> Drop for MemoryDc<'_, G> {
    fn drop(&mut self) {
        if let Err(code) = self.gdi.delete_dc(self.dc) {
            log!("  DeleteDC({:#x}) failed: {}", self.dc.0, code);
        }
    }
}

/// Owned bitmap, deleted on drop
struct OwnedBitmap<'g, G: GdiPort> {
    gdi: &'g G,
    bitmap: Bitmap,
}

impl<'g, G: GdiPort> OwnedBitmap<'g, G> {
    fn create(gdi: &'g G, screen: DeviceContext, size: u32) -> Result<Self, IconError> {
        let bitmap = gdi.create_bitmap(screen, size, size);
        if bitmap.is_null() {
            return Err(IconError::render("bitmap allocation failed"));
        }
        Ok(Self { gdi, bitmap })
    }
}

impl<G: GdiPort> Drop for OwnedBitmap<'_, G> {
    fn drop(&mut self) {
        if let Err(code) = self.gdi.delete_bitmap(self.bitmap) {
            log!("  DeleteObject({:#x}) failed: {}", self.bitmap.0, code);
        }
    }
}

/// Bitmap selected into a context; the previous selection comes back on drop
struct Selection<'g, G: GdiPort> {
    gdi: &'g G,
    dc: DeviceContext,
    previous: Bitmap,
}

impl<'g, G: GdiPort> Selection<'g, G> {
    fn select(gdi: &'g G, dc: DeviceContext, bitmap: Bitmap) -> Self {
        let previous = gdi.select_bitmap(dc, bitmap);
        Self { gdi, dc, previous }
    }
}

impl<G: GdiPort> Drop for Selection<'_, G> {
    fn drop(&mut self) {
        self.gdi.select_bitmap(self.dc, self.previous);
    }
}

/// Owned icon handle, destroyed on drop
///
/// Destruction failures are logged and swallowed: the handle is abandoned
/// either way.
pub struct OwnedIcon<'g, G: GdiPort> {
    gdi: &'g G,
    icon: IconHandle,
}

impl<'g, G: GdiPort> OwnedIcon<'g, G> {
    pub fn new(gdi: &'g G, icon: IconHandle) -> Self {
        Self { gdi, icon }
    }

    pub fn handle(&self) -> IconHandle {
        self.icon
    }
}

impl<G: GdiPort> Drop for OwnedIcon<'_, G> {
    fn drop(&mut self) {
        if let Err(code) = self.gdi.destroy_icon(self.icon) {
            log!("  DestroyIcon({:#x}) failed: {}", self.icon.raw(), code);
        }
    }
}

/// Colour pixels plus, for icons without alpha, the drawn mask
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub color: RawPixelBuffer,
    pub mask: Option<RawPixelBuffer>,
}

/// Draws icons into an off-screen bitmap and reads the pixels back
pub struct OffscreenRenderer<'g, G: GdiPort> {
    gdi: &'g G,
}

impl<'g, G: GdiPort> OffscreenRenderer<'g, G> {
    pub fn new(gdi: &'g G) -> Self {
        Self { gdi }
    }

    /// Render `icon` into a `size x size` top-down BGRA buffer.
    ///
    /// `icon` must be valid; it is neither consumed nor destroyed here.
    pub fn render(&self, icon: IconHandle, size: u32) -> Result<RawPixelBuffer, IconError> {
        self.render_layers(icon, size, false).map(|raster| raster.color)
    }

    /// Like [`render`](Self::render), and also read back the mask when the
    /// colour pass carries no alpha
    pub fn render_with_mask(&self, icon: IconHandle, size: u32) -> Result<Raster, IconError> {
        self.render_layers(icon, size, true)
    }

    fn render_layers(
        &self,
        icon: IconHandle,
        size: u32,
        with_mask: bool,
    ) -> Result<Raster, IconError> {
        log_fn!("OffscreenRenderer::render", "icon={:#x} size={}", icon.raw(), size);

        let screen = ScreenDc::acquire(self.gdi)?;
        let memory = MemoryDc::create(self.gdi, screen.dc)?;
        let bitmap = OwnedBitmap::create(self.gdi, screen.dc, size)?;
        let _selection = Selection::select(self.gdi, memory.dc, bitmap.bitmap);

        let color = self.draw_and_read(memory.dc, bitmap.bitmap, icon, size, DrawLayer::Image)?;
        let mask = if with_mask && !color.has_alpha() {
            log!("  No alpha channel, reading mask");
            Some(self.draw_and_read(memory.dc, bitmap.bitmap, icon, size, DrawLayer::Mask)?)
        } else {
            None
        };

        Ok(Raster { color, mask })
    }

    fn draw_and_read(
        &self,
        dc: DeviceContext,
        bitmap: Bitmap,
        icon: IconHandle,
        size: u32,
        layer: DrawLayer,
    ) -> Result<RawPixelBuffer, IconError> {
        self.gdi.draw_icon(dc, icon, size, layer).map_err(|code| {
            log!("  {:?} draw failed with code {}", layer, code);
            IconError::render_with_code("draw failed", code)
        })?;

        let header = DibHeader::top_down_bgra(size, size);
        let mut pixels = RawPixelBuffer::zeroed(size, size);
        let lines = self
            .gdi
            .read_bits(dc, bitmap, &header, pixels.as_mut_bytes())
            .map_err(|code| {
                log!("  Read-back failed with code {}", code);
                IconError::render_with_code("read back failed", code)
            })?;
        if lines == 0 {
            return Err(IconError::render("read back failed"));
        }

        log!("  Rendered {} scan lines ({:?})", lines, layer);
        Ok(pixels)
    }
}

/// Render an owned icon, destroy it, then decode the pixels
///
/// The icon is released as soon as rendering ends, whatever the result. With
/// `mask_alpha` set, icons without alpha take their transparency from the mask.
pub fn rasterize<G: GdiPort>(
    gdi: &G,
    icon: OwnedIcon<'_, G>,
    size: u32,
    mask_alpha: bool,
) -> Result<PortableImage, IconError> {
    let renderer = OffscreenRenderer::new(gdi);
    let rendered = if mask_alpha {
        renderer.render_with_mask(icon.handle(), size)
    } else {
        renderer
            .render(icon.handle(), size)
            .map(|color| Raster { color, mask: None })
    };
    drop(icon);

    let Raster { color, mask } = rendered?;
    let image = decode(&color, size, size)?;
    match mask {
        Some(mask) => apply_mask(image, &mask),
        None => Ok(image),
    }
}
