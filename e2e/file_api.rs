//! E2E Test Suite 03: File API
//!
//! Validates the PRG file collaborator (`file.rs`): loading, the no-overwrite
//! save rule and the `crunch_file` family that writes `name.b2` next to the
//! source. All tests work in a fresh temporary directory.

use std::fs;
use std::io::ErrorKind;

use byteboozer2::crunch::{Options, Workspace};
use byteboozer2::file::{crunch_file_with, output_name};
use byteboozer2::notify::Silent;
use byteboozer2::{crunch, crunch_file, decrunch, decrunch_executable, ecrunch_file, rcrunch_file, PrgFile};
use tempfile::TempDir;

const SMALL: [u8; 3] = [0x00, 0x10, 0x60];

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: PrgFile
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_load_and_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("small.prg");

    let saved = PrgFile::save(&path, SMALL.to_vec()).unwrap();
    assert_eq!(saved.name, path);

    let loaded = PrgFile::load(&path).unwrap();
    assert_eq!(loaded.data, SMALL);
    assert_eq!(loaded, saved);
}

#[test]
fn test_read_refreshes_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("small.prg");
    fs::write(&path, SMALL).unwrap();

    let mut file = PrgFile::new(&path, vec![0x00, 0x40, 0x4C, 0x00, 0x40]);
    assert_eq!(file.read().unwrap(), &SMALL);
    assert_eq!(file.data, SMALL);
}

#[test]
fn test_save_never_overwrites() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("small.prg.b2");
    fs::write(&path, b"keep").unwrap();

    let err = PrgFile::save(&path, SMALL.to_vec()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(fs::read(&path).unwrap(), b"keep");
}

#[test]
fn test_load_missing() {
    let dir = TempDir::new().unwrap();
    let err = PrgFile::load(dir.path().join("none.prg")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: crunch_file family
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_crunch_file_writes_b2() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("small.prg");
    fs::write(&src, SMALL).unwrap();

    let out = crunch_file(&src).unwrap();
    assert_eq!(out.name, dir.path().join("small.prg.b2"));
    assert_eq!(out.data, crunch(&SMALL).unwrap());
    assert_eq!(fs::read(&out.name).unwrap(), out.data);
    // Source is untouched.
    assert_eq!(fs::read(&src).unwrap(), SMALL);
}

#[test]
fn test_crunch_file_refuses_existing_output() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("small.prg");
    fs::write(&src, SMALL).unwrap();

    crunch_file(&src).unwrap();
    let err = crunch_file(&src).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
}

#[test]
fn test_ecrunch_and_rcrunch_file() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.prg");
    let b = dir.path().join("b.prg");
    let data: Vec<u8> = [0x01, 0x08].iter().copied().chain(b"10 PRINT \"HELLO\"".iter().copied()).collect();
    fs::write(&a, &data).unwrap();
    fs::write(&b, &data).unwrap();

    let exe = ecrunch_file(&a, 0x080D).unwrap();
    let (out, jump) = decrunch_executable(&exe.data).unwrap();
    assert_eq!((out.to_prg(), jump), (data.clone(), 0x080D));

    let rel = rcrunch_file(&b, 0xC000).unwrap();
    assert_eq!(decrunch(&rel.data).unwrap().to_prg(), data);
}

#[test]
fn test_bad_address_checked_before_reading() {
    let dir = TempDir::new().unwrap();
    // The source does not exist: the address error must win.
    let err = ecrunch_file(dir.path().join("none.prg"), 65536).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(!output_name(&dir.path().join("none.prg")).exists());
}

#[test]
fn test_short_source_is_invalid_data() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("tiny.prg");
    fs::write(&src, [0x01u8]).unwrap();
    let err = crunch_file(&src).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert!(!output_name(&src).exists());
}

#[test]
fn test_shared_workspace_across_files() {
    let dir = TempDir::new().unwrap();
    let mut ws = Workspace::new();
    for (i, len) in [100usize, 3000, 17].iter().enumerate() {
        let src = dir.path().join(format!("f{}.prg", i));
        let data: Vec<u8> = (0..*len + 2).map(|j| (j % 11) as u8).collect();
        fs::write(&src, &data).unwrap();
        let out = crunch_file_with(&src, &Options::default(), &mut ws, &mut Silent).unwrap();
        assert_eq!(out.data, crunch(&data).unwrap());
    }
}
