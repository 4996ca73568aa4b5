//! Diagnostic output for the cruncher.
//!
//! The engine never prints directly. Every diagnostic goes through a
//! [`Notify`] sink handed in by the caller, using the same level scale as the
//! command-line tool:
//!
//! | level | meaning                                   |
//! |-------|-------------------------------------------|
//! | 1     | errors                                    |
//! | 2     | warnings (cost-model inconsistencies)     |
//! | 3     | informational summaries                   |
//! | 4     | verbose: one line per emitted token       |
//!
//! [`Stderr`] is gated by the process-wide [`DISPLAY_LEVEL`] that the CLI
//! adjusts with `-v`/`-q`; [`Recorder`] keeps messages in memory for tests.

use core::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};

pub const LEVEL_ERROR: u32 = 1;
pub const LEVEL_WARN: u32 = 2;
pub const LEVEL_INFO: u32 = 3;
pub const LEVEL_TRACE: u32 = 4;

// ─────────────────────────────────────────────────────────────────────────────
// Display level global
// ─────────────────────────────────────────────────────────────────────────────

/// 0 = silent, 1 = errors only, 2 = warnings (default), 3 = info, 4 = verbose.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(LEVEL_WARN);

#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Print to stderr when the global display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::notify::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}

/// Send a formatted message to a [`Notify`] sink, skipping the formatting
/// work when the sink would drop it anyway.
#[macro_export]
macro_rules! notify {
    ($sink:expr, $level:expr, $($arg:tt)*) => {
        if $sink.enabled($level) {
            $sink.notify($level, format_args!($($arg)*));
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// Notify trait
// ─────────────────────────────────────────────────────────────────────────────

/// Destination for cruncher diagnostics.
pub trait Notify {
    /// Record one message at `level`.
    fn notify(&mut self, level: u32, args: fmt::Arguments<'_>);

    /// Whether a message at `level` would be kept.
    fn enabled(&self, _level: u32) -> bool {
        true
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Notify for Silent {
    fn notify(&mut self, _level: u32, _args: fmt::Arguments<'_>) {}

    fn enabled(&self, _level: u32) -> bool {
        false
    }
}

/// Writes to stderr, filtered by [`DISPLAY_LEVEL`].
///
/// The `prefix` (usually the input file name) is prepended to every line so
/// that messages from parallel crunches stay attributable.
#[derive(Debug, Default, Clone)]
pub struct Stderr {
    prefix: Option<String>,
}

impl Stderr {
    pub fn new() -> Self {
        Self { prefix: None }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

impl Notify for Stderr {
    fn notify(&mut self, level: u32, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let stderr = std::io::stderr();
        let mut out = stderr.lock();
        // Diagnostics are best-effort; a closed stderr must not abort a crunch.
        let _ = match &self.prefix {
            Some(p) => writeln!(out, "{}: {}", p, args),
            None => writeln!(out, "{}", args),
        };
    }

    fn enabled(&self, level: u32) -> bool {
        display_level() >= level
    }
}

/// Collects messages in memory, up to a maximum level.
#[derive(Debug, Clone)]
pub struct Recorder {
    max_level: u32,
    pub entries: Vec<(u32, String)>,
}

impl Recorder {
    /// Keep messages at `max_level` and below.
    pub fn new(max_level: u32) -> Self {
        Self {
            max_level,
            entries: Vec::new(),
        }
    }

    /// Messages recorded at exactly `level`.
    pub fn at_level(&self, level: u32) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(move |(l, _)| *l == level)
            .map(|(_, m)| m.as_str())
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(LEVEL_TRACE)
    }
}

impl Notify for Recorder {
    fn notify(&mut self, level: u32, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.entries.push((level, args.to_string()));
        }
    }

    fn enabled(&self, level: u32) -> bool {
        level <= self.max_level
    }
}
