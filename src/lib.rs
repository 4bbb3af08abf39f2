#![warn(missing_docs, unsafe_code)]
//! A minimal process-wide logging facility.
//!
//! One logger per process: the first [`init`] call builds and configures it,
//! every later call is a no-op. Messages pass two gates — "is a logger
//! configured at all" (checked by the call-site macros) and "does this
//! severity pass the committed threshold" — and are then rendered into
//! per-thread scratch buffers and written as one line:
//!
//! ```text
//! 2023-01-05 08:03:21,007:4182(0x7f6bb7fff700):ZOO_INFO@myapp::session@42: connected
//! ```
//!
//! The line shape is a compatibility contract with downstream log parsers;
//! there are no toggles that change it.

mod format;
mod logger;
mod scratch;

pub use logger::{current, init, init_file, release, Logger};
pub use scratch::{MESSAGE_CAPACITY, TIMESTAMP_CAPACITY};

// ===== Levels =====
/// Log severities, ordered by verbosity (`Error` is the least verbose).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[repr(u8)]
pub enum Severity {
    /// Unrecoverable failures.
    Error = 1,
    /// Suspicious conditions worth surfacing.
    Warn = 2,
    /// Normal operational messages.
    Info = 3,
    /// Verbose diagnostics.
    Debug = 4,
}

/// Verbosity threshold of the process-wide logger.
///
/// A threshold admits every severity at or below it: `Level(Debug)` admits
/// everything, `Level(Error)` only errors, `Disabled` nothing at all.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Threshold {
    /// Logging is administratively off.
    Disabled,
    /// Admit messages at this severity and below.
    Level(Severity),
}

impl Threshold {
    /// Maps a raw numeric level: 0 disables logging, values above
    /// `Severity::Debug` clamp to `Debug`.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Disabled,
            1 => Self::Level(Severity::Error),
            2 => Self::Level(Severity::Warn),
            3 => Self::Level(Severity::Info),
            _ => Self::Level(Severity::Debug),
        }
    }

    #[inline]
    pub(crate) const fn as_u8(self) -> u8 {
        match self {
            Self::Disabled => 0,
            Self::Level(severity) => severity as u8,
        }
    }
}

impl From<Severity> for Threshold {
    fn from(severity: Severity) -> Self {
        Self::Level(severity)
    }
}

/// Fixed header name for a raw severity value.
#[inline]
pub(crate) const fn level_name(raw: u8) -> &'static str {
    match raw {
        1 => "ZOO_ERROR",
        2 => "ZOO_WARN",
        3 => "ZOO_INFO",
        4 => "ZOO_DEBUG",
        _ => "ZOO_INVALID",
    }
}

// ===== Macros =====
/// Shared body of the level macros.
#[macro_export]
macro_rules! __zoolog_log {
    ($sev:expr, $($t:tt)+) => {{
        if let Some(__lg) = $crate::current() {
            __lg.log($sev, line!(), module_path!(), format_args!($($t)+));
        }
    }};
}
/// error
#[macro_export]
macro_rules! error { ($($t:tt)+) => { $crate::__zoolog_log!($crate::Severity::Error, $($t)+) } }
/// warning
#[macro_export]
macro_rules! warn  { ($($t:tt)+) => { $crate::__zoolog_log!($crate::Severity::Warn,  $($t)+) } }
/// info
#[macro_export]
macro_rules! info  { ($($t:tt)+) => { $crate::__zoolog_log!($crate::Severity::Info,  $($t)+) } }
/// debug
#[macro_export]
macro_rules! debug { ($($t:tt)+) => { $crate::__zoolog_log!($crate::Severity::Debug, $($t)+) } }
