//! Adjusted-exponent field codec.
//!
//! A modified Elias gamma code over `E + 2`, where `E` is the magnitude of
//! the adjusted exponent. Writing `N` for the bit length of `E + 2`, the
//! field is `N-1` copies of the flag `T`, the opposite bit as terminator,
//! then the low `N-1` bits of `E + 2` (the leading one is implicit). When
//! `T = 0` the whole field is complemented, so larger exponents grow the
//! field in the direction that keeps plain byte comparison consistent with
//! numeric order.

use crate::bits::{BitReader, BitWriter};
use crate::error::{DecodeError, DecodeResult};
use crate::{MAX_ADJUSTED_EXPONENT, MAX_EXPONENT_BITS};

/// Number of bits needed to represent `n` (1 for zero).
pub const fn bit_length(n: u64) -> usize {
    if n == 0 {
        1
    } else {
        (64 - n.leading_zeros()) as usize
    }
}

/// Append the exponent field for an adjusted exponent of the given magnitude.
///
/// `t` is true when the value and its adjusted exponent point the same way:
/// a positive value with `E >= 0`, or a negative value with `E < 0`.
pub fn encode_exponent(writer: &mut BitWriter, magnitude: u32, t: bool) {
    let offset = u64::from(magnitude) + 2;
    let n = bit_length(offset);

    // Unary length prefix: N-1 copies of T, then the opposite bit.
    for _ in 0..(n - 1) {
        writer.write_bit(t);
    }
    writer.write_bit(!t);

    // Low N-1 bits of E + 2, complemented along with the rest of the field
    // when T = 0.
    for i in (0..(n - 1)).rev() {
        let bit = (offset >> i) & 1 == 1;
        writer.write_bit(if t { bit } else { !bit });
    }
}

/// Read one exponent field; returns `(t, magnitude)`.
///
/// # Errors
///
/// Returns [`DecodeError::ExponentOutOfRange`] when the unary prefix is
/// longer than [`MAX_EXPONENT_BITS`] or the decoded magnitude is past
/// [`MAX_ADJUSTED_EXPONENT`], and [`DecodeError::UnexpectedEndOfInput`] when
/// the field runs off the end of the buffer.
pub fn decode_exponent(reader: &mut BitReader) -> DecodeResult<(bool, u32)> {
    // The first bit of the field is T itself.
    let t = reader.read_bit()?;

    let mut run = 1;
    while reader.has_bits() {
        if reader.peek_bit()? == t {
            reader.read_bit()?;
            run += 1;
            if run > MAX_EXPONENT_BITS {
                return Err(DecodeError::ExponentOutOfRange);
            }
        } else {
            break;
        }
    }

    // Consume the terminator (the first bit that differs from T)
    reader.read_bit()?;

    let payload = reader.read_bits(run)?;
    let payload = if t {
        payload
    } else {
        !payload & ((1u64 << run) - 1)
    };

    // Restore the implicit leading one of E + 2.
    let offset = (1u64 << run) | payload;
    let magnitude = offset - 2;
    if magnitude > MAX_ADJUSTED_EXPONENT {
        return Err(DecodeError::ExponentOutOfRange);
    }

    #[allow(clippy::cast_possible_truncation)]
    Ok((t, magnitude as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field_bits(magnitude: u32, t: bool) -> String {
        let mut writer = BitWriter::new();
        encode_exponent(&mut writer, magnitude, t);
        let all_bits: String = writer
            .as_bytes()
            .iter()
            .map(|byte| format!("{byte:08b}"))
            .collect();
        let width = 2 * bit_length(u64::from(magnitude) + 2) - 1;
        all_bits[..width].to_string()
    }

    fn decode_field(bytes: &[u8]) -> DecodeResult<(bool, u32)> {
        let mut reader = BitReader::new(bytes);
        decode_exponent(&mut reader)
    }

    #[test]
    fn test_bit_length() {
        assert_eq!(bit_length(0), 1);
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(2), 2);
        assert_eq!(bit_length(3), 2);
        assert_eq!(bit_length(4), 3);
        assert_eq!(bit_length(255), 8);
        assert_eq!(bit_length(256), 9);
        assert_eq!(bit_length(u64::MAX), 64);
    }

    #[test]
    fn test_small_fields_same_direction() {
        // E + 2 in 2..=7: every field short enough to share the first byte
        // with the header.
        assert_eq!(field_bits(0, true), "100");
        assert_eq!(field_bits(1, true), "101");
        assert_eq!(field_bits(2, true), "11000");
        assert_eq!(field_bits(3, true), "11001");
        assert_eq!(field_bits(4, true), "11010");
        assert_eq!(field_bits(5, true), "11011");
    }

    #[test]
    fn test_small_fields_complemented() {
        assert_eq!(field_bits(0, false), "011");
        assert_eq!(field_bits(1, false), "010");
        assert_eq!(field_bits(2, false), "00111");
        assert_eq!(field_bits(5, false), "00100");
    }

    #[test]
    fn test_wider_fields() {
        assert_eq!(field_bits(6, true), "1110000");
        assert_eq!(field_bits(125, true), "1111110111111");
        assert_eq!(field_bits(126, true), "111111100000000");
        assert_eq!(field_bits(126, false), "000000011111111");
    }

    #[test]
    fn test_field_ordering_matches_exponent_ordering() {
        // With T = 1 a larger exponent must give a lexicographically larger
        // field once right-padded with zeros, mirroring how fields sit in
        // front of the significand.
        let mut previous = field_bits(0, true);
        for magnitude in 1..200 {
            let current = field_bits(magnitude, true);
            assert!(
                format!("{previous:0<64}") < format!("{current:0<64}"),
                "field for {magnitude} does not sort above its predecessor"
            );
            previous = current;
        }
    }

    #[test]
    fn test_decode_rejects_overlong_run() {
        // 32 identical bits exceed the 30-bit cap on the unary prefix.
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(decode_field(&bytes), Err(DecodeError::ExponentOutOfRange));
    }

    #[test]
    fn test_decode_rejects_out_of_range_magnitude() {
        // A 30-bit run is structurally fine but encodes E + 2 = 2^30, which
        // is past the billion cap.
        let mut writer = BitWriter::new();
        for _ in 0..30 {
            writer.write_bit(true);
        }
        writer.write_bit(false);
        writer.write_bits(0, 30);
        let bytes = writer.into_bytes();
        assert_eq!(decode_field(&bytes), Err(DecodeError::ExponentOutOfRange));
    }

    #[test]
    fn test_decode_truncated_field() {
        // The run reaches the end of the buffer before its terminator.
        assert_eq!(
            decode_field(&[0xFF]),
            Err(DecodeError::UnexpectedEndOfInput)
        );
        // Terminator present, but only one of six payload bits follows.
        assert_eq!(
            decode_field(&[0xFC]),
            Err(DecodeError::UnexpectedEndOfInput)
        );
    }

    #[test]
    fn test_roundtrip_selected_values() {
        let magnitudes = [
            0, 1, 2, 5, 6, 7, 29, 30, 125, 126, 1000, 65_535, 999_999_998,
            999_999_999,
        ];
        for &magnitude in &magnitudes {
            for t in [false, true] {
                let mut writer = BitWriter::new();
                encode_exponent(&mut writer, magnitude, t);
                let bytes = writer.into_bytes();
                assert_eq!(
                    decode_field(&bytes),
                    Ok((t, magnitude)),
                    "roundtrip failed for magnitude {magnitude}, t = {t}"
                );
            }
        }
    }

    proptest! {
        #[test]
        fn prop_two_fields_back_to_back(
            first in 0u32..=999_999_999,
            second in 0u32..=999_999_999,
            t_first: bool,
            t_second: bool,
        ) {
            // Decoding the first field must consume exactly its own bits,
            // otherwise the second one comes out mangled.
            let mut writer = BitWriter::new();
            encode_exponent(&mut writer, first, t_first);
            encode_exponent(&mut writer, second, t_second);
            let bytes = writer.into_bytes();

            let mut reader = BitReader::new(&bytes);
            prop_assert_eq!(decode_exponent(&mut reader), Ok((t_first, first)));
            prop_assert_eq!(decode_exponent(&mut reader), Ok((t_second, second)));
        }
    }
}
