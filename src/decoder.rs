//! Decoding half of the codec.
//!
//! Single bytes are looked up against the special-value table; anything
//! longer is a finite number and is pulled apart in encoding order: header,
//! exponent field, declets. Sub-declet padding at the end of the buffer is
//! ignored, exactly as the encoder wrote it.

use crate::bits::BitReader;
use crate::decimal::{DecimalValue, Sign, ValueKind};
use crate::error::{DecodeError, DecodeResult};
use crate::gamma::decode_exponent;
use crate::significand::decode_significand;
use crate::{NAN_BYTE, NEG_INFINITY_BYTE, NEG_ZERO_BYTE, POS_INFINITY_BYTE, POS_ZERO_BYTE};

/// Decode an encoded decimal back into a semantic value.
///
/// The returned coefficient keeps the declet padding, so `1.9` comes back as
/// `190 × 10^-2`; re-encoding it yields the original bytes.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the input is empty, an unknown single
/// byte, carries bad sign or pad bits, or fails any of the exponent and
/// significand range checks.
pub fn decode(bytes: &[u8]) -> DecodeResult<DecimalValue> {
    if bytes.is_empty() {
        return Err(DecodeError::UnexpectedEndOfInput);
    }

    if bytes.len() == 1 {
        return match bytes[0] {
            NEG_INFINITY_BYTE => Ok(DecimalValue::infinity(Sign::Negative)),
            NEG_ZERO_BYTE => Ok(DecimalValue::zero(Sign::Negative)),
            POS_ZERO_BYTE => Ok(DecimalValue::zero(Sign::Positive)),
            POS_INFINITY_BYTE => Ok(DecimalValue::infinity(Sign::Positive)),
            NAN_BYTE => Ok(DecimalValue::nan()),
            _ => Err(DecodeError::InvalidSpecialValue),
        };
    }

    // Finite header: sign bits 10 or 00 and a zero pad bit.
    let sign = match bytes[0] & 0xE0 {
        0x00 => Sign::Negative,
        0x80 => Sign::Positive,
        _ => return Err(DecodeError::InvalidSign),
    };
    let positive = sign == Sign::Positive;

    let mut reader = BitReader::new(bytes);
    reader.read_bits(3)?; // header, validated above

    let (t, magnitude) = decode_exponent(&mut reader)?;
    let exponent_negative = t != positive;

    // Zero never reaches the finite layout, so a zero magnitude with a
    // negative direction (headers 100011xx and 000100xx) encodes nothing.
    if magnitude == 0 && exponent_negative {
        return Err(DecodeError::ZeroWithNegativeExponent);
    }

    let adjusted = if exponent_negative {
        -i64::from(magnitude)
    } else {
        i64::from(magnitude)
    };

    let digits = decode_significand(&mut reader, !positive)?;

    // Scale back from the adjusted exponent to the coefficient exponent.
    // |adjusted| is at most a billion and the digit count at most a million,
    // so the narrowing cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let exponent = (adjusted - digits.len() as i64 + 1) as i32;

    Ok(DecimalValue {
        sign,
        kind: ValueKind::Finite { digits, exponent },
    })
}
