use crate::error::{DecodeError, DecodeResult};

/// Append-only bit cursor backing the encoder.
///
/// Bits are packed MSB-first into a growable byte buffer. The encoder writes
/// the three header bits, the exponent field and then whole declets; whatever
/// is left of the last byte stays zero, which is exactly the padding the
/// format calls for.
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_pos: usize,
}

impl BitWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            // Most decimals encode to just a few bytes
            // (header + short exponent field + a declet or two)
            bytes: Vec::with_capacity(8),
            bit_pos: 0,
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            bit_pos: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) {
        let byte_index = self.bit_pos / 8;
        let bit_index = 7 - (self.bit_pos % 8);

        if byte_index >= self.bytes.len() {
            self.bytes.push(0);
        }

        if bit {
            self.bytes[byte_index] |= 1 << bit_index;
        }

        self.bit_pos += 1;
    }

    /// Write the low `num_bits` bits of `value`, most significant first.
    /// `num_bits` must be in `1..=64`.
    pub fn write_bits(&mut self, value: u64, num_bits: usize) {
        debug_assert!(num_bits >= 1 && num_bits <= 64);

        // Align the bits to write at the most significant position
        let mut val = value << (64 - num_bits);
        let mut remaining = num_bits;

        while remaining > 0 {
            let byte_index = self.bit_pos / 8;
            let bit_offset = self.bit_pos % 8;

            if byte_index >= self.bytes.len() {
                self.bytes.push(0);
            }

            // How many bits fit in the current byte
            let space = 8 - bit_offset;
            let write_count = remaining.min(space);

            // Take the top `write_count` bits of val and slot them in
            #[allow(clippy::cast_possible_truncation)]
            let bits = (val >> (64 - write_count)) as u8;
            self.bytes[byte_index] |= bits << (space - write_count);

            val <<= write_count;
            remaining -= write_count;
            self.bit_pos += write_count;
        }
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[cfg(test)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowing bit cursor over an encoded byte slice.
///
/// The decoder never knows the payload length up front; it walks the exponent
/// field bit by bit and then takes declets while [`remaining_bits`] allows,
/// so running off the end is reported as [`DecodeError::UnexpectedEndOfInput`]
/// rather than a panic.
///
/// [`remaining_bits`]: BitReader::remaining_bits
pub struct BitReader<'a> {
    bytes: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, bit_pos: 0 }
    }

    pub fn read_bit(&mut self) -> DecodeResult<bool> {
        let byte_index = self.bit_pos / 8;
        if byte_index >= self.bytes.len() {
            return Err(DecodeError::UnexpectedEndOfInput);
        }

        let bit_index = 7 - (self.bit_pos % 8);
        let bit = (self.bytes[byte_index] >> bit_index) & 1 == 1;
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Read `num_bits` bits (at most 64), most significant first.
    pub fn read_bits(&mut self, num_bits: usize) -> DecodeResult<u64> {
        if num_bits > 64 {
            return Err(DecodeError::InvalidGammaCode);
        }

        let mut result: u64 = 0;
        let mut remaining = num_bits;

        while remaining > 0 {
            let byte_index = self.bit_pos / 8;
            if byte_index >= self.bytes.len() {
                return Err(DecodeError::UnexpectedEndOfInput);
            }

            let bit_offset = self.bit_pos % 8;
            let available = 8 - bit_offset;
            let read_count = remaining.min(available);

            let byte = self.bytes[byte_index];
            let shift = available - read_count;
            #[allow(clippy::cast_possible_truncation)]
            let mask = ((1u16 << read_count) - 1) as u8;
            let bits = (byte >> shift) & mask;

            result = (result << read_count) | u64::from(bits);
            remaining -= read_count;
            self.bit_pos += read_count;
        }

        Ok(result)
    }

    /// Look at the next bit without consuming it.
    pub fn peek_bit(&self) -> DecodeResult<bool> {
        let byte_index = self.bit_pos / 8;
        if byte_index >= self.bytes.len() {
            return Err(DecodeError::UnexpectedEndOfInput);
        }

        let bit_index = 7 - (self.bit_pos % 8);
        Ok((self.bytes[byte_index] >> bit_index) & 1 == 1)
    }

    #[must_use]
    pub const fn has_bits(&self) -> bool {
        self.bit_pos / 8 < self.bytes.len()
    }

    /// Bits left until the end of the buffer, padding included.
    #[must_use]
    pub const fn remaining_bits(&self) -> usize {
        let total = self.bytes.len() * 8;
        if self.bit_pos >= total {
            0
        } else {
            total - self.bit_pos
        }
    }
}
