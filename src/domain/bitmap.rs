use crate::utils::error::{CompareError, Result};

const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_LEN: u32 = 40;
const PALETTE_OFFSET: usize = FILE_HEADER_LEN + INFO_HEADER_LEN as usize;

/// A 1bpp Windows bitmap with rows stored top to bottom.
///
/// Only the `BITMAPINFOHEADER` layout is accepted: uncompressed (`BI_RGB`),
/// one bit per pixel, and black as the first palette entry so that a set bit
/// is the second (light) color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    header_height: i32,
    stride: usize,
    rows: Vec<u8>,
}

impl Bitmap {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < PALETTE_OFFSET + 4 {
            return Err(CompareError::invalid_bitmap(format!(
                "file is {} bytes, too short for a BITMAPINFOHEADER bitmap",
                bytes.len()
            )));
        }
        if &bytes[..2] != b"BM" {
            return Err(CompareError::invalid_bitmap("missing BM signature"));
        }

        let dib_size = le_u32(bytes, 14);
        if dib_size != INFO_HEADER_LEN {
            return Err(CompareError::invalid_bitmap(format!(
                "DIB header is {} bytes, only BITMAPINFOHEADER (40) is supported",
                dib_size
            )));
        }

        let width = le_i32(bytes, 18);
        let header_height = le_i32(bytes, 22);
        let bpp = le_u16(bytes, 28);
        let compression = le_u32(bytes, 30);
        tracing::debug!("Bitmap {}x{} @ {} bpp", width, header_height, bpp);

        if bpp != 1 {
            return Err(CompareError::invalid_bitmap(format!(
                "{} bits per pixel, only 1bpp is supported",
                bpp
            )));
        }
        if compression != 0 {
            return Err(CompareError::invalid_bitmap(
                "compressed bitmaps are not supported, expected BI_RGB",
            ));
        }
        if le_u32(bytes, PALETTE_OFFSET) != 0 {
            return Err(CompareError::invalid_bitmap(
                "first palette color is not black (0x00000000)",
            ));
        }
        let width = usize::try_from(width)
            .map_err(|_| CompareError::invalid_bitmap(format!("negative width {}", width)))?;

        let height = header_height.unsigned_abs() as usize;
        let stride = Self::stride_for(width);
        let offset = le_u32(bytes, 10) as usize;
        let data_len = stride
            .checked_mul(height)
            .and_then(|len| len.checked_add(offset))
            .ok_or_else(|| CompareError::invalid_bitmap("pixel array size overflows"))?;
        if data_len > bytes.len() {
            return Err(CompareError::invalid_bitmap(format!(
                "pixel data ends at byte {} but the file has {} bytes",
                data_len,
                bytes.len()
            )));
        }
        tracing::debug!("Pixel data at offset {} with stride {}", offset, stride);

        let pixels = &bytes[offset..data_len];
        let rows = if header_height < 0 || stride == 0 {
            pixels.to_vec()
        } else {
            pixels
                .chunks(stride)
                .rev()
                .flatten()
                .copied()
                .collect()
        };

        Ok(Self {
            width,
            height,
            header_height,
            stride,
            rows,
        })
    }

    /// Bytes per row: whole bytes for `width` bits, padded to a DWORD.
    pub fn stride_for(width: usize) -> usize {
        (width.div_ceil(8) + 3) & !3
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Height as stored in the file: negative for top-down bitmaps.
    pub fn header_height(&self) -> i32 {
        self.header_height
    }

    pub fn is_top_down(&self) -> bool {
        self.header_height < 0
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Row `y`, counted from the top of the image, including padding bytes.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.rows[y * self.stride..(y + 1) * self.stride]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.rows.chunks(self.stride.max(1)).take(self.height)
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        bit_at(self.row(y), x)
    }
}

/// MSB-first bit `x` of a packed row.
pub fn bit_at(line: &[u8], x: usize) -> bool {
    line[x / 8] & (0x80 >> (x % 8)) != 0
}

fn le_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn le_i32(bytes: &[u8], at: usize) -> i32 {
    le_u32(bytes, at) as i32
}
