// Integration tests for util::create_file_list as the CLI uses it.
//
// Coverage:
//   - mixed file and directory inputs keep argument order
//   - nested directories are walked in name order
//   - an empty directory contributes nothing

use std::fs;

use byteboozer2::util::create_file_list;
use tempfile::TempDir;

#[test]
fn mixed_inputs_keep_order() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("games/b")).unwrap();
    fs::write(root.join("games/z.prg"), b"\x01\x08").unwrap();
    fs::write(root.join("games/b/a.prg"), b"\x01\x08").unwrap();
    fs::write(root.join("loose.bin"), b"\x01\x08").unwrap();

    let loose = root.join("loose.bin");
    let games = root.join("games");
    let list = create_file_list(&[loose.as_path(), games.as_path()]).unwrap();
    assert_eq!(
        list,
        vec![loose.clone(), games.join("b/a.prg"), games.join("z.prg")]
    );
}

#[test]
fn empty_directory() {
    let dir = TempDir::new().unwrap();
    assert!(create_file_list(&[dir.path()]).unwrap().is_empty());
}
