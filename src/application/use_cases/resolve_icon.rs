//! IconResolver - find the shell icon for a file path
//!
//! One attempt is a primary query with inferred attributes, followed by a
//! query forcing normal-file attributes if the first one came back empty.
//! Attempts repeat until a handle inside the valid range shows up or the
//! retry budget runs out.

use crate::application::ports::{AttributeMode, ShellPort};
use crate::application::services::{retry, Retry, RetryPolicy};
use crate::domain::handles::is_valid_handle;
use crate::domain::IconHandle;

/// Outcome of resolution. `NoIcon` is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Handle(IconHandle),
    NoIcon,
}

/// Resolves icon handles through the shell
pub struct IconResolver<'a, S: ShellPort> {
    shell: &'a S,
    policy: RetryPolicy,
}

impl<'a, S: ShellPort> IconResolver<'a, S> {
    pub fn new(shell: &'a S, policy: RetryPolicy) -> Self {
        Self { shell, policy }
    }

    /// Resolve the large icon for `path`. The returned handle is owned by
    /// the caller.
    pub fn resolve(&self, path: &str) -> Resolution {
        log_fn!("IconResolver::resolve", "'{}'", path);

        let result = retry(
            self.policy,
            |attempt| self.query_once(path, attempt),
            |raw| is_valid_handle(*raw),
        );

        match result {
            Retry::Found { value, attempt } => match IconHandle::from_raw(value) {
                Some(handle) => {
                    log!("  Resolved icon handle {:#x} on attempt {}", value, attempt);
                    Resolution::Handle(handle)
                }
                None => Resolution::NoIcon,
            },
            Retry::Exhausted { attempts } => {
                log!("  No icon for '{}' after {} attempts", path, attempts);
                Resolution::NoIcon
            }
        }
    }

    fn query_once(&self, path: &str, attempt: u32) -> Option<isize> {
        let mut answer = self.shell.large_icon(path, AttributeMode::Inferred);
        if answer.is_failure() {
            log!("  Attempt {}: inferred query failed, forcing normal attributes", attempt);
            answer = self.shell.large_icon(path, AttributeMode::ForceNormal);
        }

        if answer.is_failure() {
            log!("  Attempt {}: shell returned no icon", attempt);
            return None;
        }
        if !is_valid_handle(answer.handle) {
            log!(
                "  Attempt {}: handle {:#x} outside valid range",
                attempt,
                answer.handle
            );
        }
        Some(answer.handle)
    }
}
