//! Shell icon-association query (SHGetFileInfoW)

use std::iter;

use windows::core::PCWSTR;
use windows::Win32::Storage::FileSystem::{FILE_ATTRIBUTE_NORMAL, FILE_FLAGS_AND_ATTRIBUTES};
use windows::Win32::UI::Shell::{
    SHGetFileInfoW, SHFILEINFOW, SHGFI_ICON, SHGFI_LARGEICON, SHGFI_USEFILEATTRIBUTES,
};

use crate::application::ports::{AttributeMode, ShellAnswer, ShellPort};

/// The real shell
#[derive(Clone, Copy, Debug, Default)]
pub struct Win32Shell;

impl Win32Shell {
    pub fn new() -> Self {
        Self
    }
}

impl ShellPort for Win32Shell {
    fn large_icon(&self, path: &str, attributes: AttributeMode) -> ShellAnswer {
        let path_wide: Vec<u16> = path.encode_utf16().chain(iter::once(0)).collect();
        let file_attributes = match attributes {
            AttributeMode::Inferred => FILE_FLAGS_AND_ATTRIBUTES(0),
            AttributeMode::ForceNormal => FILE_ATTRIBUTE_NORMAL,
        };

        let mut file_info = SHFILEINFOW::default();
        let status = unsafe {
            SHGetFileInfoW(
                PCWSTR(path_wide.as_ptr()),
                file_attributes,
                Some(&mut file_info),
                std::mem::size_of::<SHFILEINFOW>() as u32,
                SHGFI_ICON | SHGFI_LARGEICON | SHGFI_USEFILEATTRIBUTES,
            )
        };

        ShellAnswer {
            status,
            handle: file_info.hIcon.0 as isize,
        }
    }
}
