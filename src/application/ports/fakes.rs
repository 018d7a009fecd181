//! Scripted port implementations for tests
//!
//! The Null ports never find an icon. `ScriptedShell` replays a fixed list
//! of answers. `TrackingGdi` hands out fresh handle values, records every
//! call in order and flags releases of handles that are not live.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::path::Path;

use super::gdi_port::{DrawLayer, GdiPort, PlatformCode};
use super::image_port::IconExtractor;
use super::shell_port::{AttributeMode, ShellAnswer, ShellPort};
use crate::domain::{Bitmap, DeviceContext, DibHeader, IconError, IconHandle, PortableImage};

/// A shell that never knows any icon
pub struct NullShellPort;

impl ShellPort for NullShellPort {
    fn large_icon(&self, _path: &str, _attributes: AttributeMode) -> ShellAnswer {
        ShellAnswer::failed()
    }
}

/// An extractor that never finds anything
pub struct NullIconExtractor;

impl IconExtractor for NullIconExtractor {
    fn extract(
        &self,
        exe_path: &Path,
        index: u32,
        _size: u32,
    ) -> Result<PortableImage, IconError> {
        Err(IconError::Extraction(format!(
            "no icon {} in {}",
            index,
            exe_path.display()
        )))
    }
}

/// Shell that answers from a script, then fails forever
#[derive(Default)]
pub struct ScriptedShell {
    answers: RefCell<VecDeque<ShellAnswer>>,
    calls: RefCell<Vec<AttributeMode>>,
}

impl ScriptedShell {
    pub fn new(answers: impl IntoIterator<Item = ShellAnswer>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// A shell whose every query fails
    pub fn always_failing() -> Self {
        Self::default()
    }

    /// Modes of every query made, in order
    pub fn calls(&self) -> Vec<AttributeMode> {
        self.calls.borrow().clone()
    }
}

impl ShellPort for ScriptedShell {
    fn large_icon(&self, _path: &str, attributes: AttributeMode) -> ShellAnswer {
        self.calls.borrow_mut().push(attributes);
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(ShellAnswer::failed)
    }
}

/// Successful shell answer carrying `handle`
pub fn icon_answer(handle: isize) -> ShellAnswer {
    ShellAnswer { status: 1, handle }
}

/// Bitmap a fresh memory context starts with
pub const STOCK_BITMAP: Bitmap = Bitmap(0x0B00);

/// One recorded GDI call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GdiEvent {
    GetScreenDc(DeviceContext),
    ReleaseScreenDc(DeviceContext),
    CreateMemoryDc(DeviceContext),
    DeleteDc(DeviceContext),
    CreateBitmap(Bitmap),
    DeleteBitmap(Bitmap),
    Select { dc: DeviceContext, bitmap: Bitmap },
    Draw(IconHandle, DrawLayer),
    ReadBits(DibHeader),
    DestroyIcon(IconHandle),
    /// A release of something that was not live, or of a selected bitmap
    Violation(isize),
}

/// Resource-tracking GDI double
pub struct TrackingGdi {
    events: RefCell<Vec<GdiEvent>>,
    live: RefCell<HashMap<isize, u32>>,
    selected: Cell<Bitmap>,
    next_handle: Cell<isize>,
    fail_screen: bool,
    fail_memory_dc: bool,
    fail_bitmap: bool,
    draw_error: Option<PlatformCode>,
    read_error: Option<PlatformCode>,
    destroy_icon_error: Option<PlatformCode>,
    fill: [u8; 4],
    mask_fill: [u8; 4],
    last_layer: Cell<DrawLayer>,
}

impl Default for TrackingGdi {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingGdi {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            live: RefCell::new(HashMap::new()),
            selected: Cell::new(STOCK_BITMAP),
            next_handle: Cell::new(0x100),
            fail_screen: false,
            fail_memory_dc: false,
            fail_bitmap: false,
            draw_error: None,
            read_error: None,
            destroy_icon_error: None,
            fill: [0x00, 0x00, 0xFF, 0xFF],
            mask_fill: [0x00, 0x00, 0x00, 0x00],
            last_layer: Cell::new(DrawLayer::Image),
        }
    }

    pub fn failing_screen(mut self) -> Self {
        self.fail_screen = true;
        self
    }

    pub fn failing_memory_dc(mut self) -> Self {
        self.fail_memory_dc = true;
        self
    }

    pub fn failing_bitmap(mut self) -> Self {
        self.fail_bitmap = true;
        self
    }

    pub fn failing_draw(mut self, code: PlatformCode) -> Self {
        self.draw_error = Some(code);
        self
    }

    pub fn failing_read(mut self, code: PlatformCode) -> Self {
        self.read_error = Some(code);
        self
    }

    pub fn failing_destroy_icon(mut self, code: PlatformCode) -> Self {
        self.destroy_icon_error = Some(code);
        self
    }

    /// BGRA value written to every pixel on read-back
    pub fn with_fill(mut self, bgra: [u8; 4]) -> Self {
        self.fill = bgra;
        self
    }

    /// BGRA value read back after a mask draw
    pub fn with_mask_fill(mut self, bgra: [u8; 4]) -> Self {
        self.mask_fill = bgra;
        self
    }

    pub fn events(&self) -> Vec<GdiEvent> {
        self.events.borrow().clone()
    }

    /// Handles acquired and not yet released
    pub fn outstanding(&self) -> usize {
        self.live.borrow().values().sum::<u32>() as usize
    }

    pub fn violations(&self) -> usize {
        self.count(|e| matches!(e, GdiEvent::Violation(_)))
    }

    pub fn count(&self, pred: impl Fn(&GdiEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }

    fn record(&self, event: GdiEvent) {
        self.events.borrow_mut().push(event);
    }

    fn acquire(&self) -> isize {
        let raw = self.next_handle.get();
        self.next_handle.set(raw + 1);
        *self.live.borrow_mut().entry(raw).or_insert(0) += 1;
        raw
    }

    fn release(&self, raw: isize) {
        let released = {
            let mut live = self.live.borrow_mut();
            match live.get(&raw).copied() {
                Some(1) => {
                    live.remove(&raw);
                    true
                }
                Some(count) if count > 1 => {
                    live.insert(raw, count - 1);
                    true
                }
                _ => false,
            }
        };
        if !released {
            self.record(GdiEvent::Violation(raw));
        }
    }
}

impl GdiPort for TrackingGdi {
    fn screen_dc(&self) -> DeviceContext {
        if self.fail_screen {
            return DeviceContext(0);
        }
        let dc = DeviceContext(self.acquire());
        self.record(GdiEvent::GetScreenDc(dc));
        dc
    }

    fn release_screen_dc(&self, dc: DeviceContext) -> Result<(), PlatformCode> {
        self.record(GdiEvent::ReleaseScreenDc(dc));
        self.release(dc.0);
        Ok(())
    }

    fn create_memory_dc(&self, _dc: DeviceContext) -> DeviceContext {
        if self.fail_memory_dc {
            return DeviceContext(0);
        }
        let dc = DeviceContext(self.acquire());
        self.record(GdiEvent::CreateMemoryDc(dc));
        dc
    }

    fn delete_dc(&self, dc: DeviceContext) -> Result<(), PlatformCode> {
        self.record(GdiEvent::DeleteDc(dc));
        self.release(dc.0);
        Ok(())
    }

    fn create_bitmap(&self, _dc: DeviceContext, _width: u32, _height: u32) -> Bitmap {
        if self.fail_bitmap {
            return Bitmap(0);
        }
        let bitmap = Bitmap(self.acquire());
        self.record(GdiEvent::CreateBitmap(bitmap));
        bitmap
    }

    fn delete_bitmap(&self, bitmap: Bitmap) -> Result<(), PlatformCode> {
        self.record(GdiEvent::DeleteBitmap(bitmap));
        if self.selected.get() == bitmap {
            self.record(GdiEvent::Violation(bitmap.0));
        }
        self.release(bitmap.0);
        Ok(())
    }

    fn select_bitmap(&self, dc: DeviceContext, bitmap: Bitmap) -> Bitmap {
        self.record(GdiEvent::Select { dc, bitmap });
        self.selected.replace(bitmap)
    }

    fn draw_icon(
        &self,
        _dc: DeviceContext,
        icon: IconHandle,
        _size: u32,
        layer: DrawLayer,
    ) -> Result<(), PlatformCode> {
        self.record(GdiEvent::Draw(icon, layer));
        self.last_layer.set(layer);
        match self.draw_error {
            Some(code) => Err(code),
            None => Ok(()),
        }
    }

    fn read_bits(
        &self,
        _dc: DeviceContext,
        _bitmap: Bitmap,
        header: &DibHeader,
        buffer: &mut [u8],
    ) -> Result<u32, PlatformCode> {
        self.record(GdiEvent::ReadBits(*header));
        if let Some(code) = self.read_error {
            return Err(code);
        }
        let fill = match self.last_layer.get() {
            DrawLayer::Image => self.fill,
            DrawLayer::Mask => self.mask_fill,
        };
        for pixel in buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&fill);
        }
        Ok(header.rows())
    }

    fn destroy_icon(&self, icon: IconHandle) -> Result<(), PlatformCode> {
        self.record(GdiEvent::DestroyIcon(icon));
        match self.destroy_icon_error {
            Some(code) => Err(code),
            None => Ok(()),
        }
    }
}
