// byteboozer2: ByteBoozer 2.0 cruncher for C64 PRG images

pub mod config;
pub mod notify;
pub mod crunch;
pub mod decrunch;
pub mod file;
pub mod util;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
/// ByteBoozer format version implemented by this crate.
pub const B2_VERSION_STRING: &str = "2.0";

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use crunch::{crunch, crunch_with, ecrunch, rcrunch, CrunchError, Cruncher, Options, Workspace};
pub use decrunch::{decrunch, decrunch_executable, DecrunchError, Decrunched};
pub use file::{crunch_file, ecrunch_file, rcrunch_file, PrgFile};
