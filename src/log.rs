//! Simple line logging for diagnostics
//!
//! Nothing is written until [`init`] installs a sink, so the library stays
//! silent when embedded or under test.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

enum Sink {
    File(File),
    Stderr,
}

static LOG_SINK: Mutex<Option<Sink>> = Mutex::new(None);

/// Log to a file, truncating it
pub fn init_file(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    if let Ok(mut guard) = LOG_SINK.lock() {
        *guard = Some(Sink::File(file));
    }

    log("=== file_to_image log started ===");
    Ok(())
}

/// Log to standard error
pub fn init_stderr() {
    if let Ok(mut guard) = LOG_SINK.lock() {
        *guard = Some(Sink::Stderr);
    }
}

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

/// Log a message to the installed sink
pub fn log(msg: &str) {
    if let Ok(mut guard) = LOG_SINK.lock() {
        match guard.as_mut() {
            Some(Sink::File(file)) => {
                let _ = writeln!(file, "[{}] {}", timestamp(), msg);
                let _ = file.flush();
            }
            Some(Sink::Stderr) => {
                eprintln!("[{}] {}", timestamp(), msg);
            }
            None => {}
        }
    }
}

/// Log a formatted message
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::log::log(&format!($($arg)*))
    };
}

/// Log with function context
#[macro_export]
macro_rules! log_fn {
    ($fn_name:expr) => {
        $crate::log::log(&format!("-> {}", $fn_name))
    };
    ($fn_name:expr, $($arg:tt)*) => {
        $crate::log::log(&format!("-> {}: {}", $fn_name, format!($($arg)*)))
    };
}
