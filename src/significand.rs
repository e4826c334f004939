use crate::bits::{BitReader, BitWriter};
use crate::error::{DecodeError, DecodeResult};
use crate::MAX_COEFFICIENT_DIGITS;

/// Encode the coefficient directly into the provided [`BitWriter`].
///
/// Digits are packed as declets (10 bits per group of 3), most significant
/// group first, with the last group logically padded with zeros. If
/// `negative` is true the ten's complement of the coefficient is stored
/// instead, which makes larger magnitudes compare smaller byte-wise.
///
/// Writing into the caller's [`BitWriter`] keeps the declets on the bit
/// offset the header set up and avoids an intermediate allocation.
///
/// `digits` must be normalized: leading and trailing zeros already stripped.
pub fn encode_significand(writer: &mut BitWriter, digits: &[u8], negative: bool) {
    debug_assert!(!digits.is_empty());
    debug_assert!(digits.first() != Some(&0));
    debug_assert!(digits.last() != Some(&0));

    if negative {
        encode_complemented(writer, digits);
    } else {
        encode_plain(writer, digits);
    }
}

fn encode_plain(writer: &mut BitWriter, digits: &[u8]) {
    let mut pos = 0;
    while pos < digits.len() {
        let mut declet = 0u16;
        for i in 0..3 {
            declet *= 10;
            if let Some(&digit) = digits.get(pos + i) {
                declet += u16::from(digit);
            }
        }
        writer.write_bits(u64::from(declet), 10);
        pos += 3;
    }
}

/// Encode the ten's complement without materializing it.
///
/// Digit-wise rule for 10^k - C with the padding folded in: every digit
/// before the last becomes 9 - d, the last (nonzero) digit becomes 10 - d,
/// and pad positions stay zero.
fn encode_complemented(writer: &mut BitWriter, digits: &[u8]) {
    let last = digits.len() - 1;
    let mut pos = 0;
    while pos < digits.len() {
        let mut declet = 0u16;
        for i in 0..3 {
            let idx = pos + i;
            declet *= 10;
            if idx < last {
                declet += u16::from(9 - digits[idx]);
            } else if idx == last {
                declet += u16::from(10 - digits[idx]);
            }
        }
        writer.write_bits(u64::from(declet), 10);
        pos += 3;
    }
}

/// Undo the ten's complement: nines' complement every digit, then add one
/// from the least significant end.
///
/// For example: [8, 0, 0, 2, 0, 0] → [1, 9, 9, 8, 0, 0]
fn complement_in_place(digits: &mut [u8]) {
    for digit in digits.iter_mut() {
        *digit = 9 - *digit;
    }
    for digit in digits.iter_mut().rev() {
        if *digit < 9 {
            *digit += 1;
            break;
        }
        *digit = 0;
    }
}

/// Decode the coefficient from everything left in the reader.
///
/// The significand has no length marker of its own; it simply runs to the
/// end of the buffer, so every remaining full group of 10 bits is taken as a
/// declet and up to 9 leftover padding bits are ignored. If `negative` is
/// true the stored ten's complement is reversed in place.
///
/// # Errors
///
/// Returns [`DecodeError`] if no whole declet remains, a declet is above
/// 999, the coefficient would exceed [`MAX_COEFFICIENT_DIGITS`], or the
/// stored form breaks the normalization rules (a zero trailing declet, a
/// zero leading declet on a positive value, or a leading declet above 899 on
/// a multi-declet negative value).
pub fn decode_significand(reader: &mut BitReader, negative: bool) -> DecodeResult<Vec<u8>> {
    let groups = reader.remaining_bits() / 10;
    if groups == 0 {
        return Err(DecodeError::UnexpectedEndOfInput);
    }

    let digit_count = groups * 3;
    if digit_count > MAX_COEFFICIENT_DIGITS {
        return Err(DecodeError::SignificandTooLong(digit_count));
    }

    let mut digits = Vec::with_capacity(digit_count);
    let mut leading = 0u16;
    let mut trailing = 0u16;

    for group in 0..groups {
        #[allow(clippy::cast_possible_truncation)]
        let declet = reader.read_bits(10)? as u16;
        if declet > 999 {
            return Err(DecodeError::InvalidDeclet(declet));
        }

        if group == 0 {
            leading = declet;
        }
        trailing = declet;

        #[allow(clippy::cast_possible_truncation)]
        {
            digits.push((declet / 100) as u8);
            digits.push(((declet / 10) % 10) as u8);
            digits.push((declet % 10) as u8);
        }
    }

    // A normalized coefficient never ends in an all-zero group; those zeros
    // would have been folded into the exponent.
    if trailing == 0 {
        return Err(DecodeError::InvalidSignificand(
            "least significant declet is zero".to_string(),
        ));
    }

    if negative {
        // The stored complement of a multi-declet coefficient starts with
        // 999 - leading declet, and the leading declet is at least 100.
        if groups > 1 && leading > 899 {
            return Err(DecodeError::InvalidSignificand(format!(
                "leading declet {leading} out of range for a negative significand"
            )));
        }
        complement_in_place(&mut digits);
    } else if leading == 0 {
        return Err(DecodeError::InvalidSignificand(
            "most significant declet is zero".to_string(),
        ));
    }

    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_to_bytes(digits: &[u8], negative: bool) -> Vec<u8> {
        let mut writer = BitWriter::new();
        encode_significand(&mut writer, digits, negative);
        writer.into_bytes()
    }

    fn decode_from_bytes(bytes: &[u8], negative: bool) -> DecodeResult<Vec<u8>> {
        let mut reader = BitReader::new(bytes);
        decode_significand(&mut reader, negative)
    }

    #[test]
    fn test_positive_single_declet() {
        // 19 pads to the declet 190.
        let bytes = encode_to_bytes(&[1, 9], false);
        assert_eq!(bytes, vec![0b0010_1111, 0b1000_0000]);
        assert_eq!(decode_from_bytes(&bytes, false).unwrap(), vec![1, 9, 0]);
    }

    #[test]
    fn test_positive_roundtrip_keeps_padding() {
        let bytes = encode_to_bytes(&[1, 0, 3, 2], false);
        let decoded = decode_from_bytes(&bytes, false).unwrap();
        assert_eq!(decoded, vec![1, 0, 3, 2, 0, 0]);
    }

    #[test]
    fn test_negative_complement_bytes() {
        // 1998 pads to 199|800; the stored complement is 800|200.
        let bytes = encode_to_bytes(&[1, 9, 9, 8], true);
        assert_eq!(bytes, vec![0xC8, 0x0C, 0x80]);
        let decoded = decode_from_bytes(&bytes, true).unwrap();
        assert_eq!(decoded, vec![1, 9, 9, 8, 0, 0]);
    }

    #[test]
    fn test_negative_single_digit() {
        // 1 pads to 100, whose ten's complement is the stored declet 900.
        let bytes = encode_to_bytes(&[1], true);
        assert_eq!(bytes, vec![0b1110_0001, 0b0000_0000]);
        assert_eq!(decode_from_bytes(&bytes, true).unwrap(), vec![1, 0, 0]);
    }

    #[test]
    fn test_complement_in_place() {
        let mut digits = vec![8, 0, 0, 2, 0, 0];
        complement_in_place(&mut digits);
        assert_eq!(digits, vec![1, 9, 9, 8, 0, 0]);

        // Stored 999 is the complement of 1.
        let mut digits = vec![9, 9, 9];
        complement_in_place(&mut digits);
        assert_eq!(digits, vec![0, 0, 1]);
    }

    #[test]
    fn test_reject_declet_above_999() {
        // First 10 bits spell 1000.
        let bytes = [0b1111_1010, 0b0000_0000];
        assert_eq!(
            decode_from_bytes(&bytes, false),
            Err(DecodeError::InvalidDeclet(1000))
        );
    }

    #[test]
    fn test_reject_zero_trailing_declet() {
        // Declets 100 then 000.
        let bytes = [0b0001_1001, 0b0000_0000, 0b0000_0000];
        assert!(matches!(
            decode_from_bytes(&bytes, false),
            Err(DecodeError::InvalidSignificand(_))
        ));
    }

    #[test]
    fn test_reject_zero_leading_declet_positive() {
        // Declets 000 then 100.
        let bytes = [0b0000_0000, 0b0000_0110, 0b0100_0000];
        assert!(matches!(
            decode_from_bytes(&bytes, false),
            Err(DecodeError::InvalidSignificand(_))
        ));
    }

    #[test]
    fn test_reject_negative_leading_declet_above_899() {
        // Declets 900 then 500: un-complemented this would claim a leading
        // zero digit on a multi-group coefficient.
        let bytes = [0b1110_0001, 0b0001_1111, 0b0100_0000];
        assert!(matches!(
            decode_from_bytes(&bytes, true),
            Err(DecodeError::InvalidSignificand(_))
        ));
    }

    #[test]
    fn test_reject_empty_significand() {
        assert_eq!(
            decode_from_bytes(&[], false),
            Err(DecodeError::UnexpectedEndOfInput)
        );

        // Fewer than 10 bits left after the header is consumed.
        let bytes = [0x00];
        let mut reader = BitReader::new(&bytes);
        reader.read_bits(3).unwrap();
        assert_eq!(
            decode_significand(&mut reader, false),
            Err(DecodeError::UnexpectedEndOfInput)
        );
    }

    #[test]
    fn test_reject_oversized_significand() {
        let bytes = vec![0xFF; 420_000];
        assert_eq!(
            decode_from_bytes(&bytes, false),
            Err(DecodeError::SignificandTooLong(1_008_000))
        );
    }
}
