#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must produce either an image or an error, never a panic.
    let _ = byteboozer2::decrunch::decrunch_stream(data);
    let _ = byteboozer2::decrunch(data);
    let _ = byteboozer2::decrunch_executable(data);
});
