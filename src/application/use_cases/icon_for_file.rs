//! IconForFile - produce an image for any file from its shell icon
//!
//! Resolve a handle, render it at the native size, decode, then resize and
//! encode to the requested size. A file without a resolvable icon maps to the
//! fallback image rather than to a failure.

use std::path::{Path, PathBuf};

use super::render_icon::{rasterize, OwnedIcon, NATIVE_ICON_SIZE};
use super::resolve_icon::{IconResolver, Resolution};
use crate::application::ports::{GdiPort, ImageEncoder, ShellPort};
use crate::application::services::RetryPolicy;
use crate::domain::IconOutcome;

/// Tunables for the default-icon path
#[derive(Clone, Debug)]
pub struct IconForFileOptions {
    pub retry: RetryPolicy,
    /// Raster resolution used before the final resize
    pub render_size: u32,
    /// Take transparency from the icon mask when the image has no alpha
    pub repair_alpha: bool,
    /// Returned verbatim when no icon resolves
    pub fallback_image: PathBuf,
}

impl Default for IconForFileOptions {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            render_size: NATIVE_ICON_SIZE,
            repair_alpha: true,
            fallback_image: PathBuf::from("assets/unknown_file.png"),
        }
    }
}

/// Use case for the "default" mode
pub struct IconForFile<'a, S, G, E>
where
    S: ShellPort,
    G: GdiPort,
    E: ImageEncoder,
{
    shell: &'a S,
    gdi: &'a G,
    encoder: &'a E,
    options: IconForFileOptions,
}

impl<'a, S, G, E> IconForFile<'a, S, G, E>
where
    S: ShellPort,
    G: GdiPort,
    E: ImageEncoder,
{
    pub fn new(shell: &'a S, gdi: &'a G, encoder: &'a E, options: IconForFileOptions) -> Self {
        Self {
            shell,
            gdi,
            encoder,
            options,
        }
    }

    /// Produce `output` at `size x size` for `file_path`, or the fallback
    pub fn execute(&self, file_path: &str, output: &Path, size: u32) -> IconOutcome {
        log_fn!(
            "IconForFile::execute",
            "file='{}' output='{}' size={}",
            file_path,
            output.display(),
            size
        );

        let resolver = IconResolver::new(self.shell, self.options.retry);
        let handle = match resolver.resolve(file_path) {
            Resolution::Handle(handle) => handle,
            Resolution::NoIcon => {
                log!(
                    "  Using fallback image {}",
                    self.options.fallback_image.display()
                );
                return IconOutcome::fallback(self.options.fallback_image.clone());
            }
        };

        let icon = OwnedIcon::new(self.gdi, handle);
        let rendered = rasterize(
            self.gdi,
            icon,
            self.options.render_size,
            self.options.repair_alpha,
        );
        let image = match rendered {
            Ok(image) => image,
            Err(e) => {
                log!("  Rasterizing '{}' failed: {}", file_path, e);
                return IconOutcome::failed(e);
            }
        };

        match self.encoder.write_square(&image, size, output) {
            Ok(()) => {
                log!("  Icon saved to {}", output.display());
                IconOutcome::produced(output)
            }
            Err(e) => {
                log!("  Writing {} failed: {}", output.display(), e);
                IconOutcome::failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::gateways::ImageFileWriter;
    use crate::application::ports::fakes::{icon_answer, GdiEvent, ScriptedShell, TrackingGdi};
    use tempfile::TempDir;

    fn options() -> IconForFileOptions {
        IconForFileOptions {
            retry: RetryPolicy::immediate(5),
            fallback_image: PathBuf::from("assets/unknown_file.png"),
            ..IconForFileOptions::default()
        }
    }

    #[test]
    fn test_no_icon_returns_fallback_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.png");
        let shell = ScriptedShell::always_failing();
        let gdi = TrackingGdi::new();
        let encoder = ImageFileWriter::new();

        let use_case = IconForFile::new(&shell, &gdi, &encoder, options());
        let outcome = use_case.execute("C:\\nonexistent\\unknown.xyz", &output, 48);

        assert_eq!(outcome, IconOutcome::fallback("assets/unknown_file.png"));
        assert!(!output.exists());
        assert!(gdi.events().is_empty());
        assert_eq!(shell.calls().len(), 10);
    }

    #[test]
    fn test_produces_resized_image() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.png");
        let shell = ScriptedShell::new([icon_answer(0x4242)]);
        let gdi = TrackingGdi::new().with_fill([0x00, 0x00, 0xFF, 0xFF]);
        let encoder = ImageFileWriter::new();

        let use_case = IconForFile::new(&shell, &gdi, &encoder, options());
        let outcome = use_case.execute("C:\\tools\\readme.txt", &output, 64);

        assert_eq!(outcome, IconOutcome::produced(&output));
        let written = image::open(&output).unwrap().to_rgba8();
        assert_eq!(written.dimensions(), (64, 64));
        assert_eq!(written.get_pixel(32, 32).0, [255, 0, 0, 255]);

        assert_eq!(gdi.outstanding(), 0);
        assert_eq!(gdi.violations(), 0);
        assert_eq!(gdi.count(|e| matches!(e, GdiEvent::DestroyIcon(_))), 1);
    }

    #[test]
    fn test_icon_released_after_render_before_encode() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.png");
        let shell = ScriptedShell::new([icon_answer(0x10)]);
        let gdi = TrackingGdi::new();
        let encoder = ImageFileWriter::new();

        IconForFile::new(&shell, &gdi, &encoder, options()).execute("a.txt", &output, 16);

        let events = gdi.events();
        let release_screen = events
            .iter()
            .position(|e| matches!(e, GdiEvent::ReleaseScreenDc(_)))
            .unwrap();
        let destroy = events
            .iter()
            .position(|e| matches!(e, GdiEvent::DestroyIcon(_)))
            .unwrap();
        assert_eq!(destroy, events.len() - 1);
        assert!(release_screen < destroy);
    }

    #[test]
    fn test_draw_failure_fails_and_releases_all_four() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.png");
        let shell = ScriptedShell::new([icon_answer(0x10)]);
        let gdi = TrackingGdi::new().failing_draw(1402);
        let encoder = ImageFileWriter::new();

        let outcome =
            IconForFile::new(&shell, &gdi, &encoder, options()).execute("a.txt", &output, 48);

        match outcome {
            IconOutcome::Failed { reason } => assert!(reason.contains("draw failed")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(!output.exists());
        assert_eq!(gdi.outstanding(), 0);
        assert_eq!(gdi.violations(), 0);
        assert_eq!(gdi.count(|e| matches!(e, GdiEvent::DeleteBitmap(_))), 1);
        assert_eq!(gdi.count(|e| matches!(e, GdiEvent::DeleteDc(_))), 1);
        assert_eq!(gdi.count(|e| matches!(e, GdiEvent::ReleaseScreenDc(_))), 1);
        assert_eq!(gdi.count(|e| matches!(e, GdiEvent::DestroyIcon(_))), 1);
    }

    #[test]
    fn test_icon_release_failure_is_swallowed() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.png");
        let shell = ScriptedShell::new([icon_answer(0x10)]);
        let gdi = TrackingGdi::new().failing_destroy_icon(1402);
        let encoder = ImageFileWriter::new();

        let outcome =
            IconForFile::new(&shell, &gdi, &encoder, options()).execute("a.txt", &output, 24);

        assert_eq!(outcome, IconOutcome::produced(&output));
        assert!(output.exists());
    }

    #[test]
    fn test_encode_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("missing").join("out.png");
        let shell = ScriptedShell::new([icon_answer(0x10)]);
        let gdi = TrackingGdi::new();
        let encoder = ImageFileWriter::new();

        let outcome =
            IconForFile::new(&shell, &gdi, &encoder, options()).execute("a.txt", &output, 24);

        assert!(matches!(outcome, IconOutcome::Failed { .. }));
        assert_eq!(gdi.count(|e| matches!(e, GdiEvent::DestroyIcon(_))), 1);
    }

    #[test]
    fn test_mask_only_icon_keeps_black_outline() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.png");
        let shell = ScriptedShell::new([icon_answer(0x10)]);
        let gdi = TrackingGdi::new()
            .with_fill([0x00, 0x00, 0x00, 0x00])
            .with_mask_fill([0x00, 0x00, 0x00, 0x00]);
        let encoder = ImageFileWriter::new();

        let outcome =
            IconForFile::new(&shell, &gdi, &encoder, options()).execute("a.txt", &output, 32);

        assert_eq!(outcome, IconOutcome::produced(&output));
        let written = image::open(&output).unwrap().to_rgba8();
        assert_eq!(written.get_pixel(16, 16).0, [0, 0, 0, 255]);
        assert_eq!(gdi.outstanding(), 0);
        assert_eq!(gdi.violations(), 0);
    }
}
