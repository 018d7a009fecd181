//! Infrastructure - wiring of concrete adapters

pub mod composition_root;

pub use composition_root::{CompositionRoot, IconRequest};
