//! Win32 platform implementation

pub mod extract;
pub mod gdi;
pub mod shell;

pub use extract::ResourceIconExtractor;
pub use gdi::Win32Gdi;
pub use shell::Win32Shell;
