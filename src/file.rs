//! PRG file I/O.
//!
//! The cruncher itself never touches the filesystem; this module is the thin
//! collaborator that reads a source image and writes the crunched result next
//! to it. Output files are created with `create_new`, so an existing file is
//! never truncated: the write fails with [`io::ErrorKind::AlreadyExists`].
//!
//! # Public API
//! - [`PrgFile`]: a named byte image with `load` / `save`
//! - [`crunch_file`], [`ecrunch_file`], [`rcrunch_file`]: read `name`, crunch,
//!   write `name.b2`
//! - [`output_name`]: the `.b2` naming rule

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::B2_EXTENSION;
use crate::crunch::{Options, Workspace};
use crate::notify::Notify;

// ─────────────────────────────────────────────────────────────────────────────
// PrgFile
// ─────────────────────────────────────────────────────────────────────────────

/// A file name together with its (possibly not yet loaded) contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrgFile {
    pub name: PathBuf,
    pub data: Vec<u8>,
}

impl PrgFile {
    pub fn new(name: impl Into<PathBuf>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Read `name` into a new `PrgFile`.
    pub fn load(name: impl Into<PathBuf>) -> io::Result<Self> {
        let mut file = Self::new(name, Vec::new());
        file.read()?;
        Ok(file)
    }

    /// Write `data` to a new file `name`.
    pub fn save(name: impl Into<PathBuf>, data: Vec<u8>) -> io::Result<Self> {
        let file = Self::new(name, data);
        file.write()?;
        Ok(file)
    }

    /// Replace `data` with the file's current contents.
    pub fn read(&mut self) -> io::Result<&[u8]> {
        self.data = fs::read(&self.name)?;
        Ok(&self.data)
    }

    /// Create the file and write `data`; refuses to overwrite.
    pub fn write(&self) -> io::Result<()> {
        let mut f = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.name)?;
        f.write_all(&self.data)?;
        f.flush()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Crunch helpers
// ─────────────────────────────────────────────────────────────────────────────

/// `name` with the `.b2` extension appended.
pub fn output_name(name: &Path) -> PathBuf {
    let mut s = name.as_os_str().to_owned();
    s.push(B2_EXTENSION);
    PathBuf::from(s)
}

/// Read `name`, crunch it with `options`, and save the result as `name.b2`.
///
/// The address is validated before the source is read. Returns the written
/// file.
pub fn crunch_file_with(
    name: &Path,
    options: &Options,
    workspace: &mut Workspace,
    notify: &mut dyn Notify,
) -> io::Result<PrgFile> {
    options
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let source = PrgFile::load(name)?;
    let result = workspace
        .crunch(&source.data, options, notify)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    PrgFile::save(output_name(name), result)
}

/// Plain crunch of `name` into `name.b2`.
pub fn crunch_file(name: impl AsRef<Path>) -> io::Result<PrgFile> {
    run(name.as_ref(), &Options::default())
}

/// Executable crunch of `name` into `name.b2`, jumping to `address`.
pub fn ecrunch_file(name: impl AsRef<Path>, address: i64) -> io::Result<PrgFile> {
    run(name.as_ref(), &Options::executable(address))
}

/// Relocated crunch of `name` into `name.b2`.
pub fn rcrunch_file(name: impl AsRef<Path>, address: i64) -> io::Result<PrgFile> {
    run(name.as_ref(), &Options::relocated(address))
}

fn run(name: &Path, options: &Options) -> io::Result<PrgFile> {
    let mut notify = crate::notify::Stderr::with_prefix(name.display().to_string());
    crunch_file_with(name, options, &mut Workspace::new(), &mut notify)
}
