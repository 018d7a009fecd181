//! Application Layer - Use Cases and Business Workflows
//!
//! This layer orchestrates the domain types and defines the icon workflows.
//! It contains:
//! - **Use Cases**: resolve, render, default-icon and exe-icon operations
//! - **Ports**: Interfaces for the shell, GDI and image collaborators
//! - **Services**: Bounded retry
//!
//! # Clean Architecture Rules
//! - Depends only on the domain layer
//! - Defines ports that the platform layer implements
//! - Contains no Win32 code

pub mod ports;
pub mod services;
pub mod use_cases;

pub use ports::*;
pub use services::*;
pub use use_cases::*;
