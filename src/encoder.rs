//! Encoding half of the codec.
//!
//! Produces the memcmp-ordered byte form: one byte for the special values,
//! and `sign bits | pad bit | exponent field | declets` for everything else,
//! zero-padded to a whole byte.

use crate::bits::BitWriter;
use crate::decimal::{DecimalValue, Sign, ValueKind};
use crate::error::{EncodeError, EncodeResult};
use crate::gamma::{self, bit_length};
use crate::significand::encode_significand;
use crate::{
    MAX_ADJUSTED_EXPONENT, MAX_COEFFICIENT_DIGITS, NAN_BYTE, NEG_INFINITY_BYTE, NEG_ZERO_BYTE,
    POS_INFINITY_BYTE, POS_ZERO_BYTE,
};

/// Encode a decimal value into its order-preserving byte form.
///
/// Numerically equal inputs come out byte-identical: leading zeros carry no
/// information and trailing zeros fold into the exponent, so `1`, `1.0` and
/// `0.1e1` all produce the same bytes. The one exception is zero, which keeps
/// its sign (`-0` and `0` encode to distinct single bytes that compare equal
/// through [`Decimal`](crate::Decimal)).
///
/// # Errors
///
/// Returns [`EncodeError::ExponentOutOfRange`] when the adjusted exponent
/// falls outside `±`[`MAX_ADJUSTED_EXPONENT`], and
/// [`EncodeError::TooManyDigits`] when the normalized coefficient is longer
/// than [`MAX_COEFFICIENT_DIGITS`].
pub fn encode(value: &DecimalValue) -> EncodeResult<Vec<u8>> {
    let (digits, exponent) = match &value.kind {
        ValueKind::Nan => return Ok(vec![NAN_BYTE]),
        ValueKind::Infinite => {
            return Ok(vec![match value.sign {
                Sign::Negative => NEG_INFINITY_BYTE,
                Sign::Positive => POS_INFINITY_BYTE,
            }]);
        }
        ValueKind::Finite { digits, exponent } => (digits.as_slice(), *exponent),
    };

    if digits.iter().all(|&d| d == 0) {
        // Zero has a single encoding per sign; its exponent is not stored.
        return Ok(vec![match value.sign {
            Sign::Negative => NEG_ZERO_BYTE,
            Sign::Positive => POS_ZERO_BYTE,
        }]);
    }

    // Normalize: leading zeros carry no information, trailing zeros fold
    // into the exponent.
    let first = digits.iter().position(|&d| d != 0).unwrap_or(0);
    let last = digits.iter().rposition(|&d| d != 0).unwrap_or(0);
    let significant = &digits[first..=last];

    if significant.len() > MAX_COEFFICIENT_DIGITS {
        return Err(EncodeError::TooManyDigits(significant.len()));
    }

    // Adjusted exponent of the leading significant digit; unchanged by the
    // trailing-zero fold and by the later padding to a declet boundary.
    #[allow(clippy::cast_possible_wrap)]
    let adjusted = i64::from(exponent) + digits.len() as i64 - 1 - first as i64;
    if adjusted.unsigned_abs() > MAX_ADJUSTED_EXPONENT {
        return Err(EncodeError::ExponentOutOfRange(adjusted));
    }

    let positive = value.sign == Sign::Positive;
    let t = (adjusted >= 0) == positive;

    // Exact output size: 3 header bits, the 2N-1 bit exponent field, one
    // declet per started group of 3 digits.
    let field_bits = 2 * bit_length(adjusted.unsigned_abs() + 2) - 1;
    let total_bits = 3 + field_bits + 10 * significant.len().div_ceil(3);
    let mut writer = BitWriter::with_capacity(total_bits.div_ceil(8));

    // S: 10 for positive, 00 for negative, then the zero pad bit that keeps
    // every declet clear of three-byte straddles.
    writer.write_bit(positive);
    writer.write_bit(false);
    writer.write_bit(false);

    #[allow(clippy::cast_possible_truncation)]
    gamma::encode_exponent(&mut writer, adjusted.unsigned_abs() as u32, t);

    encode_significand(&mut writer, significant, !positive);

    Ok(writer.into_bytes())
}
