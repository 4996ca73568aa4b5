#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Inputs without a load address, or over the size limit, are rejected
    // before crunching; nothing to check for them.
    let Ok(image) = byteboozer2::crunch(data) else {
        return;
    };

    let out = byteboozer2::decrunch(&image).expect("crunched image must decode");
    assert_eq!(
        out.to_prg(),
        data,
        "round-trip mismatch: {} bytes crunched to {}",
        data.len(),
        image.len()
    );

    // The executable form carries the same stream behind the decruncher.
    if let Ok(exe) = byteboozer2::ecrunch(data, 0x080D) {
        let (exe_out, jump) = byteboozer2::decrunch_executable(&exe).expect("executable must decode");
        assert_eq!(jump, 0x080D);
        assert_eq!(exe_out, out);
    }
});
