//! Command-line interface for the `b2` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings and the welcome banner. |
//! | [`args`]      | `ParsedArgs`: clap-derived flags resolved into crunch [`Options`](crate::crunch::Options), a worker count and the list of sources. |
//!
//! Typical call sequence: `parse_args` → `create_file_list` (with `--dir`) →
//! one crunch per source on a rayon pool.

pub mod constants;
pub mod args;
