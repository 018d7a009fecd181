//! file_to_image library
//!
//! Turns the icon of a file into a resized image. Executables can give up
//! their own icon resource; any other file gets the icon the shell associates
//! with it, rasterized off-screen. Everything outside `platform` builds and
//! tests on any host.

// Include the log module first so the log! macros work everywhere below
#[macro_use]
pub mod log;

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod platform;
pub mod shared;

pub use domain::{IconError, IconOutcome};
pub use infrastructure::{CompositionRoot, IconRequest};
