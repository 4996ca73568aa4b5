//! Binary entry point for the `b2` command-line tool.
//!
//! 1. [`Cli`] parses the command line (clap exits on `--help`, `--version`
//!    and malformed flags).
//! 2. [`Cli::resolve`] validates the address and verbosity.
//! 3. [`run`] expands `--dir` inputs and crunches every source on a rayon pool,
//!    one [`Workspace`] per worker thread.
//!
//! Each failed source is reported as `b2: <error>`; the process exits with 1
//! if any source failed.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use rayon::prelude::*;

use byteboozer2::cli::args::{Cli, ParsedArgs};
use byteboozer2::cli::constants::{welcome_message, COMPRESSOR_NAME};
use byteboozer2::config::resolve_workers;
use byteboozer2::crunch::{Options, Workspace};
use byteboozer2::displaylevel;
use byteboozer2::file::crunch_file_with;
use byteboozer2::notify::{set_display_level, Stderr};
use byteboozer2::util::create_file_list;

/// Crunch one source; returns `false` after reporting a failure.
fn crunch_one(name: &Path, options: &Options, workspace: &mut Workspace) -> bool {
    let mut notify = Stderr::with_prefix(name.display().to_string());
    match crunch_file_with(name, options, workspace, &mut notify)
        .with_context(|| format!("{}", name.display()))
    {
        Ok(out) => {
            displaylevel!(
                2,
                "{} -> {} ({} bytes)\n",
                name.display(),
                out.name.display(),
                out.data.len()
            );
            true
        }
        Err(e) => {
            displaylevel!(1, "{}: {:#}\n", COMPRESSOR_NAME, e);
            false
        }
    }
}

/// Execute the crunch jobs described by `args`; returns the number of
/// sources that failed.
fn run(args: ParsedArgs) -> anyhow::Result<usize> {
    set_display_level(args.display_level);
    displaylevel!(3, "{}", welcome_message());

    let files: Vec<PathBuf> = if args.recursive {
        let roots: Vec<&Path> = args.files.iter().map(PathBuf::as_path).collect();
        let list = create_file_list(&roots).context("cannot expand directories")?;
        for (u, p) in list.iter().enumerate() {
            displaylevel!(4, "{} {}\n", u, p.display());
        }
        list
    } else {
        args.files
    };
    if files.is_empty() {
        bail!("no input files");
    }

    let workers = resolve_workers(args.nb_workers).min(files.len());
    displaylevel!(4, "using {} worker thread(s)\n", workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("cannot start worker threads")?;

    let options = args.options;
    let failed = pool.install(|| {
        files
            .par_iter()
            .map_init(Workspace::new, |ws, name| crunch_one(name, &options, ws))
            .filter(|ok| !ok)
            .count()
    });
    Ok(failed)
}

fn main() {
    let cli = Cli::parse();
    let code = match cli.resolve().and_then(run) {
        Ok(0) => 0,
        Ok(_) => 1,
        Err(e) => {
            displaylevel!(1, "{}: {:#}\n", COMPRESSOR_NAME, e);
            1
        }
    };
    std::process::exit(code);
}
