#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary blobs must fail cleanly; whatever does decode must survive a fresh round-trip.
    if let Ok(out) = huffmin::decompress(data) {
        let blob = huffmin::compress(&out).unwrap();
        assert_eq!(huffmin::decompress(&blob).unwrap(), out);
    }
});
