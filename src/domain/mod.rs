//! Domain layer - platform independent types
//!
//! Handle values, pixel buffers, the BGRA codec, outcomes and errors.

pub mod errors;
pub mod handles;
pub mod outcome;
pub mod pixels;

pub use errors::IconError;
pub use handles::{Bitmap, DeviceContext, DibHeader, IconHandle};
pub use outcome::IconOutcome;
pub use pixels::{apply_mask, decode, PortableImage, RawPixelBuffer};
