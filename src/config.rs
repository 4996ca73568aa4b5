// config.rs: Compile-time configuration constants for the `b2` tool.

/// Suffix appended to the source name for crunched output.
pub const B2_EXTENSION: &str = ".b2";

/// Default number of crunch worker threads (0 = one per logical CPU).
/// Overridden by the `-j#` command-line flag.
pub const NB_WORKERS_DEFAULT: usize = 0;

/// Upper bound on worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

/// Source files picked up when a directory is given with `--dir`.
pub const PRG_EXTENSION: &str = "prg";

/// Resolve a requested worker count: 0 means "all CPUs", capped at
/// [`NB_WORKERS_MAX`].
pub fn resolve_workers(requested: usize) -> usize {
    let n = if requested == 0 {
        num_cpus::get()
    } else {
        requested
    };
    n.clamp(1, NB_WORKERS_MAX)
}
