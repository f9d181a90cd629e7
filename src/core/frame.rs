use crate::domain::bitmap::Bitmap;
use crate::utils::error::{CompareError, Result};

pub const TRAILER: [u8; 7] = [0x85, 0x05, 0x08, 0x00, 0x00, 0x01, 0x01];

/// Compression type byte for the context-model arithmetic coder.
pub const COMPRESSION_ARITHMETIC: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayout {
    /// 32 bytes, payload length as a plain big-endian word at 30..32.
    Extended,
    /// 30 bytes, payload length in 28..30 with the top bit set.
    Compact,
}

impl HeaderLayout {
    pub fn size(self) -> usize {
        match self {
            Self::Extended => 32,
            Self::Compact => 30,
        }
    }

    fn max_payload(self) -> usize {
        match self {
            Self::Extended => 0xffff,
            Self::Compact => 0x7fff,
        }
    }
}

/// Display image header wrapped around an encoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub width: i32,
    pub height: i32,
    pub compression_type: u8,
    pub two_color: bool,
    pub checksum: u16,
    pub layout: HeaderLayout,
}

impl FrameHeader {
    /// Header for an arithmetic-coded single-color image. The height keeps the
    /// sign stored in the bitmap.
    pub fn for_bitmap(bitmap: &Bitmap) -> Self {
        Self {
            width: bitmap.width() as i32,
            height: bitmap.header_height(),
            compression_type: COMPRESSION_ARITHMETIC,
            two_color: false,
            checksum: 0,
            layout: HeaderLayout::Extended,
        }
    }

    pub fn encode(&self, payload_len: usize) -> Result<Vec<u8>> {
        if payload_len > self.layout.max_payload() {
            return Err(CompareError::PayloadTooLarge {
                max: self.layout.max_payload(),
            });
        }
        let [size_lo, size_hi, ..] = (payload_len as u32).to_le_bytes();
        let [width_lo, width_hi, ..] = self.width.to_le_bytes();
        let [height_lo, height_hi, ..] = self.height.to_le_bytes();

        let mut header = vec![0u8; self.layout.size()];
        header[0] = 0x83;
        header[1] = 0x19;
        header[3] = width_lo;
        header[4] = width_hi;
        header[5] = height_lo;
        header[6] = height_hi;
        header[7] = size_lo;
        header[8] = size_hi;
        header[22] = (self.checksum as u8).wrapping_neg();
        header[23] = self.compression_type;
        header[26] = if self.two_color { 0x21 } else { 0x00 };
        header[27] = 0x84;

        match self.layout {
            HeaderLayout::Extended => {
                header[28] = 0x80;
                header[29] = 0x00;
                header[30] = size_hi;
                header[31] = size_lo;
            }
            HeaderLayout::Compact => {
                header[28] = size_hi | 0x80;
                header[29] = size_lo;
            }
        }

        Ok(header)
    }

    /// Header, payload, then the fixed trailer.
    pub fn frame(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let mut out = self.encode(payload.len())?;
        out.reserve(payload.len() + TRAILER.len());
        out.extend_from_slice(payload);
        out.extend_from_slice(&TRAILER);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: i32, height: i32) -> FrameHeader {
        FrameHeader {
            width,
            height,
            compression_type: COMPRESSION_ARITHMETIC,
            two_color: false,
            checksum: 0,
            layout: HeaderLayout::Extended,
        }
    }

    #[test]
    fn test_extended_header_bytes() {
        let bytes = header(10, 4).encode(14).unwrap();

        assert_eq!(
            bytes,
            vec![
                0x83, 0x19, 0x00, 0x0a, 0x00, 0x04, 0x00, 0x0e, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00,
                0x00, 0x84, 0x80, 0x00, 0x00, 0x0e,
            ]
        );
    }

    #[test]
    fn test_top_down_height_keeps_sign() {
        let bytes = header(10, -4).encode(14).unwrap();
        assert_eq!(bytes[5..7], [0xfc, 0xff]);
    }

    #[test]
    fn test_compact_header_and_options() {
        let header = FrameHeader {
            width: 0x0150,
            height: 0x00f0,
            compression_type: 1,
            two_color: true,
            checksum: 0x12,
            layout: HeaderLayout::Compact,
        };
        let bytes = header.encode(0x1234).unwrap();

        assert_eq!(bytes.len(), 30);
        assert_eq!(bytes[3..9], [0x50, 0x01, 0xf0, 0x00, 0x34, 0x12]);
        assert_eq!(bytes[22], 0xee);
        assert_eq!(bytes[23], 1);
        assert_eq!(bytes[26], 0x21);
        assert_eq!(bytes[28..30], [0x92, 0x34]);
    }

    #[test]
    fn test_frame_appends_trailer() {
        let framed = header(10, 4).frame(&[0xaa, 0xbb]).unwrap();

        assert_eq!(framed.len(), 32 + 2 + 7);
        assert_eq!(framed[32..34], [0xaa, 0xbb]);
        assert_eq!(framed[34..], TRAILER);
    }

    #[test]
    fn test_payload_length_must_fit_header() {
        assert!(header(1, 1).encode(0xffff).is_ok());
        assert!(matches!(
            header(1, 1).encode(0x1_0000),
            Err(CompareError::PayloadTooLarge { max: 0xffff })
        ));

        let compact = FrameHeader {
            layout: HeaderLayout::Compact,
            ..header(1, 1)
        };
        assert!(compact.encode(0x8000).is_err());
    }
}
