#![allow(dead_code)]

/// 10x4 fixture, rows listed top to bottom.
pub const FIXTURE_ROWS: [[u8; 2]; 4] = [[0xf3, 0xc0], [0x9e, 0x40], [0x0c, 0x00], [0xcc, 0xc0]];

/// Framed encoding of the bottom-up fixture: 32-byte header, 14-byte payload, trailer.
pub const FIXTURE_FRAMED: [u8; 53] = [
    0x83, 0x19, 0x00, 0x0a, 0x00, 0x04, 0x00, 0x0e, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x84, 0x80, 0x00,
    0x00, 0x0e, 0x03, 0x00, 0x06, 0x07, 0x53, 0x54, 0x42, 0x25, 0x26, 0xa9, 0xde, 0x0a, 0xe9,
    0x58, 0x85, 0x05, 0x08, 0x00, 0x00, 0x01, 0x01,
];

/// Uncompressed 1bpp BMP with a black/white palette, stored bottom-up.
pub fn fixture_bmp() -> Vec<u8> {
    let stride = 4;
    let offset: u32 = 14 + 40 + 8;

    let mut pixels = Vec::new();
    for row in FIXTURE_ROWS.iter().rev() {
        let mut padded = row.to_vec();
        padded.resize(stride, 0);
        pixels.extend_from_slice(&padded);
    }

    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(offset + pixels.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&offset.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&10i32.to_le_bytes());
    out.extend_from_slice(&4i32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(pixels.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0; 16]);
    out.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0x00]);
    out.extend_from_slice(&pixels);
    out
}
