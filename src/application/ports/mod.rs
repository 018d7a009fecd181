//! Application Ports - interfaces the platform layer implements
//!
//! Ports define what the use cases need from the outside world without
//! naming the Win32 API.

pub mod gdi_port;
pub mod image_port;
pub mod shell_port;

#[cfg(test)]
pub mod fakes;

pub use gdi_port::{DrawLayer, GdiPort, PlatformCode};
pub use image_port::{IconExtractor, ImageEncoder};
pub use shell_port::{AttributeMode, ShellAnswer, ShellPort};
