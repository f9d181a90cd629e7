//! Context-model arithmetic coder for 1bpp bitmaps.
//!
//! Every pixel is predicted from three already-seen neighbours:
//!
//! ```text
//! +----+----+
//! | K0 | K1 |
//! +----+----+
//! | K2 | C  |
//! +----+----+
//! ```
//!
//! For each of the eight neighbourhoods a first pass estimates the likely
//! color and a run-length weight (1..=7). The second pass codes each pixel
//! against that table and emits the bits after an 8-byte preamble carrying
//! the table.

use crate::domain::bitmap::{bit_at, Bitmap};
use crate::utils::error::{CompareError, Result};

/// Fixed first half of the preamble; the packed context table follows.
pub const PREAMBLE_TAG: [u8; 4] = [0x03, 0x00, 0x06, 0x07];
pub const PREAMBLE_LEN: usize = 8;

/// Largest payload the device frame can carry.
pub const MAX_PAYLOAD_LEN: usize = 65336 - 32 - 7;

const CONTEXTS: usize = 8;

/// Per-context prediction table derived from the image itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextModel {
    key_len: [u32; CONTEXTS],
    key_color: [bool; CONTEXTS],
}

impl ContextModel {
    pub fn from_bitmap(bitmap: &Bitmap) -> Self {
        let mut average = [0f32; CONTEXTS];
        let mut light = [0u32; CONTEXTS];
        let mut dark = [0u32; CONTEXTS];

        let mut last_context = 0usize;
        let mut last_color = false;
        let mut run = 0u32;

        for_each_pixel(bitmap, |context, color| {
            // A context change within the same color closes the run.
            if context != last_context && color == last_color {
                average[last_context] = (average[last_context] + run as f32) / 2.0;
                run = 1;
                last_context = context;
            } else {
                run += 1;
            }
            last_color = color;

            if color {
                light[context] += 1;
            } else {
                dark[context] += 1;
            }
        });

        let mut key_len = [0u32; CONTEXTS];
        let mut key_color = [false; CONTEXTS];
        for i in 0..CONTEXTS {
            key_len[i] = ((average[i] + 0.5) as u32).clamp(1, 7);
            key_color[i] = dark[i] > light[i];
        }

        Self { key_len, key_color }
    }

    pub fn key_len(&self, context: usize) -> u32 {
        self.key_len[context]
    }

    pub fn key_color(&self, context: usize) -> bool {
        self.key_color[context]
    }

    /// Two contexts per byte, `len << 1 | color` in each nibble, even context high.
    pub fn packed(&self) -> [u8; 4] {
        let nibble = |i: usize| ((self.key_len[i] << 1) | self.key_color[i] as u32) as u8;
        std::array::from_fn(|i| (nibble(i * 2) << 4) | nibble(i * 2 + 1))
    }

    pub fn preamble(&self) -> [u8; PREAMBLE_LEN] {
        let packed = self.packed();
        let mut out = [0u8; PREAMBLE_LEN];
        out[..4].copy_from_slice(&PREAMBLE_TAG);
        out[4..].copy_from_slice(&packed);
        out
    }
}

/// MSB-first bit sink that can propagate a carry into bits already written.
#[derive(Debug, Default)]
struct BitWriter {
    bytes: Vec<u8>,
    len: usize,
    max_bits: usize,
    overflowed: bool,
}

impl BitWriter {
    fn with_capacity_bytes(capacity: usize) -> Self {
        Self {
            max_bits: capacity * 8,
            ..Self::default()
        }
    }

    fn push(&mut self, bit: bool) {
        if self.len >= self.max_bits {
            self.overflowed = true;
            return;
        }
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        self.set(self.len, bit);
        self.len += 1;
    }

    /// Adds one at the last written bit: trailing ones become zeros and the
    /// first zero above them becomes one. A run of ones back to the first bit
    /// just clears.
    fn carry(&mut self) {
        let mut pos = self.len;
        while pos > 0 {
            pos -= 1;
            if !self.get(pos) {
                self.set(pos, true);
                return;
            }
            self.set(pos, false);
        }
    }

    fn get(&self, pos: usize) -> bool {
        bit_at(&self.bytes, pos)
    }

    fn set(&mut self, pos: usize, bit: bool) {
        let mask = 0x80 >> (pos % 8);
        if bit {
            self.bytes[pos / 8] |= mask;
        } else {
            self.bytes[pos / 8] &= !mask;
        }
    }
}

/// Coder state: `range` is the width of the current interval and `low` its
/// pending lower byte.
#[derive(Debug)]
struct ArithmeticEncoder {
    out: BitWriter,
    range: u32,
    low: u32,
}

impl ArithmeticEncoder {
    fn new(capacity_bytes: usize) -> Self {
        Self {
            out: BitWriter::with_capacity_bytes(capacity_bytes),
            range: 0xff,
            low: 0,
        }
    }

    fn shift(&mut self) {
        self.range = self.range.wrapping_mul(2);
        self.out.push(self.low & 0x80 != 0);
        self.low = (self.low * 2) & 0xff;
    }

    fn encode(&mut self, pixel: bool, key_len: u32, key_color: bool) {
        let trimmed = self.range >> key_len;

        if pixel == key_color {
            self.range = trimmed;
            for _ in 0..key_len {
                self.shift();
            }
        } else {
            self.low += trimmed;
            self.range -= trimmed;
            if self.low & 0x100 != 0 {
                self.low &= 0xff;
                self.out.carry();
            }
            if self.range & 0x80 == 0 {
                self.shift();
            }
        }
    }

    fn finish(mut self) -> BitWriter {
        for _ in 0..8 {
            self.shift();
        }
        self.out
    }
}

/// Visits pixels row by row from the top, passing the neighbourhood index and
/// the pixel. Neighbours outside the image read as dark.
fn for_each_pixel(bitmap: &Bitmap, mut visit: impl FnMut(usize, bool)) {
    let blank = vec![0u8; bitmap.stride()];
    let mut previous: &[u8] = &blank;

    for current in bitmap.rows() {
        for x in 0..bitmap.width() {
            let left = |line: &[u8]| x > 0 && bit_at(line, x - 1);
            let context = left(previous) as usize
                | (bit_at(previous, x) as usize) << 1
                | (left(current) as usize) << 2;
            visit(context, bit_at(current, x));
        }
        previous = current;
    }
}

pub fn encode_bitmap(bitmap: &Bitmap) -> Result<Vec<u8>> {
    encode_bitmap_with_capacity(bitmap, MAX_PAYLOAD_LEN)
}

/// Encodes into at most `capacity` bytes including the preamble. An empty
/// image encodes to an empty payload.
pub fn encode_bitmap_with_capacity(bitmap: &Bitmap, capacity: usize) -> Result<Vec<u8>> {
    if bitmap.width() == 0 || bitmap.height() == 0 {
        tracing::warn!("Bitmap has no pixels, nothing to encode");
        return Ok(Vec::new());
    }

    let model = ContextModel::from_bitmap(bitmap);
    tracing::debug!("Context model: {:02x?}", model.packed());

    let mut encoder = ArithmeticEncoder::new(capacity.saturating_sub(PREAMBLE_LEN));
    for_each_pixel(bitmap, |context, pixel| {
        encoder.encode(pixel, model.key_len(context), model.key_color(context));
    });
    let bits = encoder.finish();

    if bits.overflowed || capacity < PREAMBLE_LEN {
        return Err(CompareError::PayloadTooLarge { max: capacity });
    }

    let mut payload = Vec::with_capacity(PREAMBLE_LEN + bits.bytes.len());
    payload.extend_from_slice(&model.preamble());
    payload.extend_from_slice(&bits.bytes);
    Ok(payload)
}
