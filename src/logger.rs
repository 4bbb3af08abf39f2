//! The process-wide logger: exactly-once construction, idempotent
//! configuration, and the severity-gated write path.

use core::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};

use crate::scratch;
use crate::{format, level_name, Severity, Threshold};

static LOGGER: OnceLock<Logger> = OnceLock::new();
static PID: OnceLock<u32> = OnceLock::new();

/// Written in place of the message when the calling thread cannot
/// allocate its scratch buffers.
const ALLOC_FALLBACK: &str = "unable to allocate thread scratch buffer";

// ===== Singleton lifecycle =====

/// Builds the process-wide logger and commits its configuration.
///
/// The first caller wins: concurrent first callers race safely to build
/// exactly one instance, and exactly one of them commits `stream` (default:
/// standard error) and `threshold`. Every later call returns the same
/// instance unchanged, whatever its arguments.
pub fn init(stream: Option<Box<dyn Write + Send>>, threshold: Threshold) -> &'static Logger {
    let logger = LOGGER.get_or_init(Logger::new);
    logger.configure(stream, threshold);
    logger
}

/// Like [`init`], with the stream appended to a file at `path`.
///
/// # Errors
/// Returns an error if the file cannot be opened for appending.
pub fn init_file(path: impl AsRef<Path>, threshold: Threshold) -> io::Result<&'static Logger> {
    let f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(init(Some(Box::new(f)), threshold))
}

/// The call-site gate: `None` until the first [`init`].
#[inline]
pub fn current() -> Option<&'static Logger> {
    LOGGER.get()
}

/// Tears the logger down: flushes and drops the committed stream.
///
/// Idempotent, and a no-op if [`init`] was never called. The logger stays
/// disabled afterwards; a later `init` call does not re-arm it.
pub fn release() {
    let Some(logger) = LOGGER.get() else { return };
    logger.threshold.store(0, Ordering::Relaxed);
    if let Ok(mut slot) = logger.sink.lock() {
        if let Some(mut stream) = slot.take() {
            let _ = stream.flush();
        }
    }
}

// ===== Logger =====

/// Process-wide logger state.
///
/// One instance exists per process, handed out as `&'static Logger` by
/// [`init`] and [`current`]. The threshold and stream are immutable once
/// the first configuration commits.
pub struct Logger {
    threshold: AtomicU8,
    initialized: AtomicBool,
    commit: Mutex<()>,
    sink: Mutex<Option<Box<dyn Write + Send>>>,
}

impl Logger {
    fn new() -> Self {
        Self {
            threshold: AtomicU8::new(0),
            initialized: AtomicBool::new(false),
            commit: Mutex::new(()),
            sink: Mutex::new(None),
        }
    }

    fn configure(&self, stream: Option<Box<dyn Write + Send>>, threshold: Threshold) {
        if self.initialized.load(Ordering::Acquire) {
            return;
        }
        let Ok(_guard) = self.commit.lock() else {
            return;
        };
        // Double-check: another caller may have committed while we waited.
        if self.initialized.load(Ordering::Acquire) {
            return;
        }
        {
            let Ok(mut slot) = self.sink.lock() else { return };
            *slot = Some(stream.unwrap_or_else(|| Box::new(io::stderr())));
        }
        self.threshold.store(threshold.as_u8(), Ordering::Relaxed);
        self.initialized.store(true, Ordering::Release);
        self.log(
            Severity::Info,
            line!(),
            module_path!(),
            format_args!(
                "logging initialized, threshold {}",
                level_name(threshold.as_u8())
            ),
        );
    }

    #[inline]
    fn enabled(&self, severity: Severity) -> bool {
        (severity as u8) <= self.threshold.load(Ordering::Relaxed)
    }

    // ===== Write path =====

    /// Writes one formatted line if `severity` passes the committed
    /// threshold. `location` names the call site (function or module path);
    /// the level macros pass `module_path!()` and `line!()`.
    pub fn log(&self, severity: Severity, line: u32, location: &str, args: fmt::Arguments<'_>) {
        if !self.enabled(severity) {
            return;
        }
        let now = format::now_local();
        let rendered = scratch::with(|s| {
            format::render_timestamp(&mut s.timestamp, now);
            format::render_message(&mut s.message, args);
            self.write_line(severity, line, location, &s.timestamp, &s.message);
        });
        if rendered.is_err() {
            self.write_line(severity, line, location, "", ALLOC_FALLBACK);
        }
    }

    fn write_line(
        &self,
        severity: Severity,
        line: u32,
        location: &str,
        timestamp: &str,
        message: &str,
    ) {
        let Ok(mut slot) = self.sink.lock() else { return };
        let Some(stream) = slot.as_mut() else { return };
        let _ = writeln!(
            stream,
            "{timestamp}:{pid}(0x{tid:x}):{level}@{location}@{line}: {message}",
            pid = pid(),
            tid = thread_id(),
            level = level_name(severity as u8),
        );
        let _ = stream.flush();
    }
}

#[inline]
fn pid() -> u32 {
    *PID.get_or_init(std::process::id)
}

#[cfg(unix)]
#[allow(unsafe_code)]
#[inline]
fn thread_id() -> u64 {
    unsafe { libc::pthread_self() as u64 }
}

#[cfg(not(unix))]
#[inline]
fn thread_id() -> u64 {
    use std::cell::Cell;
    use std::sync::atomic::AtomicU64;

    static NEXT_TID: AtomicU64 = AtomicU64::new(1);
    thread_local! {
        static TID: Cell<u64> = const { Cell::new(0) };
    }
    TID.with(|cell| {
        if cell.get() == 0 {
            cell.set(NEXT_TID.fetch_add(1, Ordering::Relaxed));
        }
        cell.get()
    })
}
