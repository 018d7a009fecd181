//! Application Use Cases - one type per user-visible operation

pub mod exe_icon;
pub mod icon_for_file;
pub mod render_icon;
pub mod resolve_icon;

pub use exe_icon::ExeIcon;
pub use icon_for_file::{IconForFile, IconForFileOptions};
pub use render_icon::{rasterize, OffscreenRenderer, OwnedIcon, Raster, NATIVE_ICON_SIZE};
pub use resolve_icon::{IconResolver, Resolution};
