//! Command-line argument parsing for `b2`.
//!
//! ```text
//! b2 [-c ADDR | -r ADDR] [-v|-q]... [-j N] [-d] FILES...
//! ```
//!
//! [`Cli`] is the raw clap surface. [`Cli::resolve`] turns it into
//! [`ParsedArgs`], which is what the binary acts on: a validated
//! [`Options`], a display level, a worker count and the source paths.
//! [`parse_args_from`] does both steps on an explicit argument list and is the
//! entry point for tests.
//!
//! Addresses accept decimal, `0x` or `$` hexadecimal. A bad address is
//! reported as `"bad usage: ..."`.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser};

use crate::config::NB_WORKERS_DEFAULT;
use crate::crunch::{parse_address, Options};
use crate::displaylevel;
use crate::notify::{LEVEL_TRACE, LEVEL_WARN};

// ── clap surface ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "b2",
    version = crate::B2_VERSION_STRING,
    about = "ByteBoozer 2.0 cruncher for C64 PRG files",
    after_help = "Each FILE is crunched into FILE.b2; existing outputs are never overwritten."
)]
pub struct Cli {
    /// Make an executable that jumps to ADDR after decrunching.
    #[arg(short = 'c', long = "exec", value_name = "ADDR", value_parser = parse_address)]
    pub exec: Option<i64>,

    /// Relocate the crunched data to end just below ADDR.
    #[arg(short = 'r', long = "relocate", value_name = "ADDR", value_parser = parse_address)]
    pub relocate: Option<i64>,

    /// More output (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less output (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Worker threads (0 = one per CPU).
    #[arg(short = 'j', long = "threads", value_name = "N", default_value_t = NB_WORKERS_DEFAULT)]
    pub threads: usize,

    /// Treat directories as roots and crunch every .prg file below them.
    #[arg(short = 'd', long = "dir")]
    pub recursive: bool,

    /// Files (or, with --dir, directories) to crunch.
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

// ── Resolved arguments ────────────────────────────────────────────────────────

/// Everything the binary needs after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Crunch options; the address has already been range checked.
    pub options: Options,
    /// 0 = silent .. 4 = verbose; the default is 2.
    pub display_level: u32,
    /// Requested worker count (0 = auto).
    pub nb_workers: usize,
    /// Expand directory inputs with `create_file_list`.
    pub recursive: bool,
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Validate the flags and build [`ParsedArgs`].
    pub fn resolve(self) -> anyhow::Result<ParsedArgs> {
        let options = match (self.exec, self.relocate) {
            (Some(address), relocate) => {
                if relocate.is_some() {
                    displaylevel!(LEVEL_WARN, "warning: --exec overrides --relocate\n");
                }
                Options::executable(address)
            }
            (None, Some(address)) => Options::relocated(address),
            (None, None) => Options::default(),
        };
        options
            .validate()
            .map_err(|e| anyhow!("bad usage: {}", e))?;

        let display_level = (2 + self.verbose as u32)
            .saturating_sub(self.quiet as u32)
            .min(LEVEL_TRACE);

        Ok(ParsedArgs {
            options,
            display_level,
            nb_workers: self.threads,
            recursive: self.recursive,
            files: self.files,
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse an explicit argument list; `argv[0]` is the program name.
pub fn parse_args_from<I, T>(argv: I) -> anyhow::Result<ParsedArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(argv)?.resolve()
}
