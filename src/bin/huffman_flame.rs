use huffmin::{compress, decompress};

fn main() {
    let input: Vec<u8> = (0..100_000u32)
        .map(|i| b"the quick brown fox jumps over the lazy dog"[(i * 7 % 43) as usize])
        .collect();

    for _ in 0..200 {
        let blob = compress(&input).unwrap();
        let out = decompress(&blob).unwrap();
        assert_eq!(out.len(), input.len());
    }
}
