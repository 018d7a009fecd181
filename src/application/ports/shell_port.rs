//! ShellPort - interface to the shell's icon-association query
//!
//! Given a path, the shell answers with the large icon it would show for
//! that file. The path does not have to exist when attributes are supplied
//! by the caller; the shell infers the icon from the extension.

/// How file attributes are supplied to the query
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeMode {
    /// Let the shell infer attributes from the path
    Inferred,
    /// Force "normal file" attributes
    ForceNormal,
}

/// Raw answer from one shell query
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShellAnswer {
    /// Non-zero on success
    pub status: usize,
    /// Icon handle value as returned; 0 if none
    pub handle: isize,
}

impl ShellAnswer {
    #[cfg(test)]
    pub fn failed() -> Self {
        Self::default()
    }

    /// Zero status or empty handle
    pub fn is_failure(&self) -> bool {
        self.status == 0 || self.handle == 0
    }
}

/// Port interface for the shell icon query
pub trait ShellPort {
    /// Ask for the large icon associated with `path`.
    ///
    /// A successful answer transfers ownership of the handle to the caller.
    fn large_icon(&self, path: &str, attributes: AttributeMode) -> ShellAnswer;
}
