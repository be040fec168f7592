const HEX_BYTES_LOWER: &[u8; 16] = b"0123456789abcdef";

/// Lowercase hex encoding, the form digests are exported in
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut into = String::with_capacity(bytes.len() * 2);

    for b in bytes {
        let high = (b & 0xF0) >> 4;
        let low = b & 0xF;
        into.push(HEX_BYTES_LOWER[high as usize] as char);
        into.push(HEX_BYTES_LOWER[low as usize] as char);
    }
    into
}
