//! Platform abstraction layer
//!
//! The handle-based icon path only exists on Windows (win32).

#[cfg(target_os = "windows")]
pub mod win32;

#[cfg(target_os = "windows")]
pub use win32::*;
