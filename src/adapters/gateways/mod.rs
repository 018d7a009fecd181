//! Gateways - collaborators backed by third-party libraries

pub mod image_file_writer;

pub use image_file_writer::ImageFileWriter;
