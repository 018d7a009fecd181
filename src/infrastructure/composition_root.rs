//! CompositionRoot - Dependency wiring
//!
//! Builds the use cases with the platform adapters for one request.

use std::path::PathBuf;

use crate::adapters::gateways::ImageFileWriter;
use crate::cli::{Cli, Mode};
use crate::domain::IconOutcome;
use crate::shared::Config;

/// One icon request, independent of how it was parsed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconRequest {
    pub mode: Mode,
    pub source: PathBuf,
    pub output: PathBuf,
    pub size: u32,
    /// Icon index for exe mode
    pub index: u32,
}

impl From<&Cli> for IconRequest {
    fn from(cli: &Cli) -> Self {
        Self {
            mode: cli.mode,
            source: cli.source.clone(),
            output: cli.output.clone(),
            size: cli.size,
            index: cli.index,
        }
    }
}

/// Owns configuration and platform-independent collaborators
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
pub struct CompositionRoot {
    config: Config,
    encoder: ImageFileWriter,
}

impl CompositionRoot {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            encoder: ImageFileWriter::new(),
        }
    }

    /// Run one request to completion
    pub fn execute(&self, request: &IconRequest) -> IconOutcome {
        log!(
            "Called with arguments: mode={:?} source='{}' output='{}' size={}",
            request.mode,
            request.source.display(),
            request.output.display(),
            request.size
        );
        self.execute_on_platform(request)
    }

    #[cfg(target_os = "windows")]
    fn execute_on_platform(&self, request: &IconRequest) -> IconOutcome {
        use crate::application::use_cases::{ExeIcon, IconForFile};
        use crate::platform::win32::{ResourceIconExtractor, Win32Gdi, Win32Shell};

        match request.mode {
            Mode::Exe => {
                let extractor = ResourceIconExtractor::new(self.config.render.repair_alpha);
                ExeIcon::new(&extractor, &self.encoder).execute(
                    &request.source,
                    request.index,
                    &request.output,
                    request.size,
                )
            }
            Mode::Default => {
                let shell = Win32Shell::new();
                let gdi = Win32Gdi::new();
                let source = request.source.to_string_lossy();
                IconForFile::new(
                    &shell,
                    &gdi,
                    &self.encoder,
                    self.config.icon_for_file_options(),
                )
                .execute(&source, &request.output, request.size)
            }
        }
    }

    #[cfg(not(target_os = "windows"))]
    fn execute_on_platform(&self, request: &IconRequest) -> IconOutcome {
        use crate::domain::IconError;

        log!("  {:?} mode needs the Win32 shell and GDI", request.mode);
        IconOutcome::failed(IconError::UnsupportedPlatform)
    }
}
