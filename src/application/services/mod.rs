//! Application Services - reusable coordination helpers

pub mod retry;

pub use retry::{retry, Retry, RetryPolicy};
