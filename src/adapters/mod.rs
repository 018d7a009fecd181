//! Adapters Layer - concrete implementations of application ports that do
//! not depend on the host platform

pub mod gateways;
