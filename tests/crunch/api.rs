// Unit tests for crunch::api (options, entry points, assembly, Cruncher).
//
// Coverage:
//   - parse_address syntax forms
//   - validate_address range, Options::validate precedence
//   - split_prg size limits
//   - assemble() address arithmetic and 16-bit wrap
//   - Cruncher validation and memoization
//   - Workspace reuse

use byteboozer2::crunch::*;
use byteboozer2::notify::{Recorder, Silent, LEVEL_INFO};

#[test]
fn address_syntax() {
    assert_eq!(parse_address("4096"), Ok(4096));
    assert_eq!(parse_address("0x1000"), Ok(0x1000));
    assert_eq!(parse_address("0XC000"), Ok(0xC000));
    assert_eq!(parse_address("$080d"), Ok(0x080D));
    assert_eq!(parse_address(" 10 "), Ok(10));
    assert_eq!(parse_address("-1"), Ok(-1));
    assert_eq!(
        parse_address("test"),
        Err(CrunchError::InvalidAddressSyntax("test".into()))
    );
    assert!(parse_address("$").is_err());
    assert!(parse_address("12.5").is_err());
}

#[test]
fn address_range() {
    assert_eq!(validate_address(0), Ok(0));
    assert_eq!(validate_address(65535), Ok(0xFFFF));
    assert_eq!(validate_address(-1), Err(CrunchError::InvalidAddress(-1)));
    assert_eq!(validate_address(65536), Err(CrunchError::InvalidAddress(65536)));
}

#[test]
fn mode_selection() {
    assert_eq!(Options::default().validate(), Ok(Mode::Plain));
    assert_eq!(Options::executable(0x1000).validate(), Ok(Mode::Executable(0x1000)));
    assert_eq!(Options::relocated(0xC000).validate(), Ok(Mode::Relocated(0xC000)));

    let both = Options {
        executable: true,
        relocated: true,
        address: 0x0810,
    };
    assert_eq!(both.validate(), Ok(Mode::Executable(0x0810)));

    // Checked even when it is unused.
    let plain = Options {
        address: -5,
        ..Options::default()
    };
    assert_eq!(plain.validate(), Err(CrunchError::InvalidAddress(-5)));
}

#[test]
fn prg_split() {
    assert_eq!(split_prg(&[0x01]), Err(CrunchError::InputTooShort(1)));
    let (load, payload) = split_prg(&[0x00, 0x10]).unwrap();
    assert_eq!(load, [0x00, 0x10]);
    assert!(payload.is_empty());

    let max = vec![0u8; MAX_INPUT_SIZE + 2];
    assert!(split_prg(&max).is_ok());
    let over = vec![0u8; MAX_INPUT_SIZE + 3];
    assert_eq!(split_prg(&over), Err(CrunchError::InputTooLarge(MAX_INPUT_SIZE + 1)));
}

#[test]
fn assemble_layouts() {
    let packed = Packed {
        bytes: vec![0x3F, 0x60, 0xFF, 0x80],
        margin: 3,
    };
    let load = [0x00, 0x10];

    assert_eq!(
        assemble(load, 1, &packed, Mode::Plain),
        vec![0xFE, 0x0F, 0x00, 0x10, 0x3F, 0x60, 0xFF, 0x80]
    );
    assert_eq!(
        assemble(load, 1, &packed, Mode::Relocated(0x2000)),
        vec![0xFA, 0x1F, 0x00, 0x10, 0x3F, 0x60, 0xFF, 0x80]
    );

    let exe = assemble(load, 1, &packed, Mode::Executable(0x1000));
    assert_eq!(exe.len(), 2 + 213 + 4);
    assert_eq!(&exe[..2], &[0x01, 0x08]);
    assert_eq!(&exe[exe.len() - 4..], &packed.bytes[..]);
}

#[test]
fn assemble_wraps_load_address() {
    let packed = Packed {
        bytes: vec![0x3F, 0x60, 0xFF, 0x80],
        margin: 3,
    };
    assert_eq!(&assemble([0x00, 0x00], 1, &packed, Mode::Plain)[..2], &[0xFE, 0xFF]);
    assert_eq!(&assemble([0x00, 0x10], 1, &packed, Mode::Relocated(0))[..2], &[0xFA, 0xFF]);
}

#[test]
fn cruncher_validates_up_front() {
    let data = [0x00, 0x10, 0x60];
    assert_eq!(
        Cruncher::new(&data, Options::executable(70000)).err(),
        Some(CrunchError::InvalidAddress(70000))
    );
    assert_eq!(
        Cruncher::new(&data[..1], Options::default()).err(),
        Some(CrunchError::InputTooShort(1))
    );
}

#[test]
fn cruncher_memoizes() {
    let data = [0x00, 0x10, 0x60];
    let mut c = Cruncher::new(&data, Options::default()).unwrap();
    assert_eq!(c.options(), &Options::default());
    assert!(c.result().is_none());

    let first = c.crunch().unwrap().to_vec();
    assert_eq!(first, crunch(&data).unwrap());
    assert_eq!(c.result(), Some(&first[..]));

    // A second call returns the stored image without re-running.
    let mut rec = Recorder::new(LEVEL_INFO);
    assert_eq!(c.crunch_with(&mut rec).unwrap(), &first[..]);
    assert!(rec.entries.is_empty());
}

#[test]
fn crunch_reports_summary() {
    let mut rec = Recorder::new(LEVEL_INFO);
    crunch_with(&[0x00, 0x10, 0x60], &Options::default(), &mut rec).unwrap();
    assert_eq!(
        rec.at_level(LEVEL_INFO).collect::<Vec<_>>(),
        vec!["3 -> 8 bytes (stream 4, margin 3)"]
    );
}

#[test]
fn workspace_reuse_matches_fresh() {
    let a: Vec<u8> = [0x00, 0x20].iter().copied().chain((0..3000u32).map(|i| (i % 13) as u8)).collect();
    let b: Vec<u8> = [0x00, 0x40].iter().copied().chain(b"hello hello hello world".iter().copied()).collect();

    let mut ws = Workspace::new();
    let opts = Options::default();
    assert_eq!(ws.crunch(&a, &opts, &mut Silent).unwrap(), crunch(&a).unwrap());
    assert_eq!(ws.crunch(&b, &opts, &mut Silent).unwrap(), crunch(&b).unwrap());
    assert_eq!(ws.crunch(&a, &opts, &mut Silent).unwrap(), crunch(&a).unwrap());
}
