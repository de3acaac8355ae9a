#![no_main]
use huffmin::{compress, decompress, Error};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match compress(data) {
        Ok(blob) => assert_eq!(decompress(&blob).unwrap(), data),
        Err(Error::EmptyInput) => assert!(data.is_empty()),
        Err(e) => panic!("unexpected error: {e}"),
    }
});
