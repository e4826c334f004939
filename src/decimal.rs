use crate::decoder::decode;
use crate::encoder::encode;
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::{NAN_BYTE, NEG_INFINITY_BYTE, NEG_ZERO_BYTE, POS_INFINITY_BYTE, POS_ZERO_BYTE};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sign of a decimal value.
///
/// `Negative` orders before `Positive`, matching the encoded byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    Negative,
    Positive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValueKind {
    Finite { digits: Vec<u8>, exponent: i32 },
    Infinite,
    Nan,
}

/// A decimal number in semantic form: the codec's exchange type.
///
/// A finite value is `coefficient × 10^exponent`, where the coefficient is a
/// sequence of decimal digits stored most significant first. The
/// representation deliberately keeps the scale: `100 × 10^0` and `1 × 10^2`
/// are distinct values here (and [`Eq`] is structural), but they encode to
/// identical bytes.
///
/// # NaN semantics
///
/// There is exactly one NaN. Parsing `"nan"`, `"+nan"` or `"-nan"` all
/// produce it, its [`sign`](Self::sign) reports [`Sign::Positive`], and it
/// encodes to the single byte that sorts above every other value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalValue {
    pub(crate) sign: Sign,
    pub(crate) kind: ValueKind,
}

impl DecimalValue {
    /// Create a finite value from coefficient digits and an exponent.
    ///
    /// Digits are values `0..=9`, most significant first. Leading zeros are
    /// dropped on construction; an all-zero coefficient collapses to a
    /// single `0` digit and keeps both sign and exponent.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidFormat`] for an empty coefficient and
    /// [`EncodeError::InvalidDigit`] for digits above 9.
    pub fn new(sign: Sign, digits: Vec<u8>, exponent: i32) -> EncodeResult<Self> {
        if digits.is_empty() {
            return Err(EncodeError::InvalidFormat(
                "coefficient must contain at least one digit".to_string(),
            ));
        }
        if let Some(&bad) = digits.iter().find(|&&d| d > 9) {
            return Err(EncodeError::InvalidDigit(bad));
        }

        let mut digits = digits;
        match digits.iter().position(|&d| d != 0) {
            None => {
                digits.clear();
                digits.push(0);
            }
            Some(0) => {}
            Some(n) => {
                digits.drain(..n);
            }
        }

        Ok(Self {
            sign,
            kind: ValueKind::Finite { digits, exponent },
        })
    }

    /// Zero with the given sign.
    #[must_use]
    pub fn zero(sign: Sign) -> Self {
        Self {
            sign,
            kind: ValueKind::Finite {
                digits: vec![0],
                exponent: 0,
            },
        }
    }

    /// Infinity with the given sign.
    #[must_use]
    pub fn infinity(sign: Sign) -> Self {
        Self {
            sign,
            kind: ValueKind::Infinite,
        }
    }

    /// The single NaN value.
    #[must_use]
    pub fn nan() -> Self {
        Self {
            sign: Sign::Positive,
            kind: ValueKind::Nan,
        }
    }

    #[must_use]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        matches!(self.kind, ValueKind::Finite { .. })
    }

    #[must_use]
    pub fn is_infinite(&self) -> bool {
        matches!(self.kind, ValueKind::Infinite)
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self.kind, ValueKind::Nan)
    }

    /// True for both `0` and `-0`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(&self.kind, ValueKind::Finite { digits, .. } if digits.iter().all(|&d| d == 0))
    }

    /// Coefficient digits, most significant first. `None` for ±∞ and NaN.
    #[must_use]
    pub fn digits(&self) -> Option<&[u8]> {
        match &self.kind {
            ValueKind::Finite { digits, .. } => Some(digits),
            _ => None,
        }
    }

    /// Exponent of the least significant coefficient digit.
    #[must_use]
    pub fn exponent(&self) -> Option<i32> {
        match &self.kind {
            ValueKind::Finite { exponent, .. } => Some(*exponent),
            _ => None,
        }
    }

    /// Exponent of the most significant coefficient digit, as in scientific
    /// notation: `exponent + digit count - 1`.
    #[must_use]
    pub fn adjusted_exponent(&self) -> Option<i64> {
        match &self.kind {
            ValueKind::Finite { digits, exponent } => {
                #[allow(clippy::cast_possible_wrap)]
                Some(i64::from(*exponent) + digits.len() as i64 - 1)
            }
            _ => None,
        }
    }

    fn parse_str(s: &str) -> EncodeResult<Self> {
        let s = s.trim();

        // Special values, case-insensitive and without allocation.
        if s.eq_ignore_ascii_case("inf")
            || s.eq_ignore_ascii_case("+inf")
            || s.eq_ignore_ascii_case("infinity")
            || s.eq_ignore_ascii_case("+infinity")
        {
            return Ok(Self::infinity(Sign::Positive));
        }
        if s.eq_ignore_ascii_case("-inf") || s.eq_ignore_ascii_case("-infinity") {
            return Ok(Self::infinity(Sign::Negative));
        }
        // Signed NaN degrades to the one NaN value.
        if s.eq_ignore_ascii_case("nan")
            || s.eq_ignore_ascii_case("+nan")
            || s.eq_ignore_ascii_case("-nan")
        {
            return Ok(Self::nan());
        }

        #[allow(clippy::option_if_let_else)]
        let (sign, s) = if let Some(stripped) = s.strip_prefix('-') {
            (Sign::Negative, stripped)
        } else if let Some(stripped) = s.strip_prefix('+') {
            (Sign::Positive, stripped)
        } else {
            (Sign::Positive, s)
        };

        // Optional exponent suffix: e or E, then an optionally signed integer.
        let (mantissa, explicit_exponent) = match s.find(['e', 'E']) {
            Some(pos) => {
                let (mantissa, suffix) = s.split_at(pos);
                let digits = &suffix[1..];
                if digits.is_empty() {
                    return Err(EncodeError::InvalidFormat("empty exponent".to_string()));
                }
                let parsed: i32 = digits.parse().map_err(|_| {
                    EncodeError::InvalidFormat(format!("invalid exponent: {digits}"))
                })?;
                (mantissa, parsed)
            }
            None => (s, 0),
        };

        // Reject empty or digit-free mantissas (e.g. "", ".", "+", "e4").
        if !mantissa.bytes().any(|b| b.is_ascii_digit()) {
            return Err(EncodeError::InvalidFormat(
                "input contains no digits".to_string(),
            ));
        }

        let (integer_part, fractional_part) = match mantissa.find('.') {
            Some(pos) => {
                let (int, rest) = mantissa.split_at(pos);
                if rest[1..].contains('.') {
                    return Err(EncodeError::InvalidFormat(
                        "multiple decimal points".to_string(),
                    ));
                }
                (int, &rest[1..])
            }
            None => (mantissa, ""),
        };

        for b in integer_part.bytes().chain(fractional_part.bytes()) {
            if !b.is_ascii_digit() {
                return Err(EncodeError::InvalidFormat(format!(
                    "invalid digit: {}",
                    b as char
                )));
            }
        }

        // Every fractional digit shifts the coefficient exponent down one.
        #[allow(clippy::cast_possible_wrap)]
        let exponent = i64::from(explicit_exponent) - fractional_part.len() as i64;
        let exponent = i32::try_from(exponent)
            .map_err(|_| EncodeError::ExponentOutOfRange(exponent))?;

        // Coefficient: integer digits then fractional digits, leading zeros
        // dropped.
        let digits: Vec<u8> = integer_part
            .bytes()
            .chain(fractional_part.bytes())
            .skip_while(|&b| b == b'0')
            .map(|b| b - b'0')
            .collect();

        if digits.is_empty() {
            // "0", "0.00", "000" and friends: a zero that keeps its scale.
            return Ok(Self {
                sign,
                kind: ValueKind::Finite {
                    digits: vec![0],
                    exponent,
                },
            });
        }

        Ok(Self {
            sign,
            kind: ValueKind::Finite { digits, exponent },
        })
    }
}

impl FromStr for DecimalValue {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Nan => f.write_str("NaN"),
            ValueKind::Infinite => f.write_str(match self.sign {
                Sign::Negative => "-∞",
                Sign::Positive => "∞",
            }),
            ValueKind::Finite { digits, exponent } => {
                if self.sign == Sign::Negative {
                    f.write_str("-")?;
                }
                if self.is_zero() {
                    return f.write_str("0");
                }

                write!(f, "{}", digits[0])?;
                if digits.len() > 1 {
                    f.write_str(".")?;
                    for &digit in &digits[1..] {
                        write!(f, "{digit}")?;
                    }
                }

                #[allow(clippy::cast_possible_wrap)]
                let adjusted = i64::from(*exponent) + digits.len() as i64 - 1;
                write!(f, " × 10^{adjusted}")
            }
        }
    }
}

/// A decimal number stored as its encoded sort key.
///
/// This struct keeps the decimal as encoded bytes, providing:
/// - Zero-copy access via [`as_bytes`](Self::as_bytes)
/// - Direct byte comparison for [`Ord`] (order-preserving)
/// - A smaller footprint than the semantic [`DecimalValue`]
///
/// Use [`decode`](Self::decode) to get the semantic fields back.
///
/// # NaN semantics
///
/// Unlike IEEE 754 floating-point, [`Decimal`] treats NaN as a concrete
/// value: `NaN == NaN` is **true**, and NaN has a defined sort position
/// **greater than** every other value, including positive infinity. This is
/// intentional for sort keys, where every value needs a deterministic total
/// order. Code that expects IEEE 754 NaN behavior should not rely on
/// [`Decimal`]'s [`Eq`] and [`Ord`] for NaN values.
#[derive(Debug, Clone)]
pub struct Decimal {
    bytes: Vec<u8>,
}

impl Decimal {
    /// Create from pre-encoded bytes without validation
    #[must_use]
    pub const fn from_bytes_unchecked(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Create from pre-encoded bytes with validation
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the bytes do not represent a valid encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode(bytes)?;
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Encode a semantic value.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] when the value is outside the codec limits.
    pub fn from_value(value: &DecimalValue) -> EncodeResult<Self> {
        Ok(Self {
            bytes: encode(value)?,
        })
    }

    /// Get the encoded bytes (zero-copy)
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume and return the encoded bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Decode back to the semantic value.
    ///
    /// The coefficient comes back with its declet padding: parsing `"1.9"`
    /// and decoding yields `190 × 10^-2`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the stored bytes are not a valid encoding
    /// (possible only for values built with
    /// [`from_bytes_unchecked`](Self::from_bytes_unchecked)).
    pub fn decode(&self) -> DecodeResult<DecimalValue> {
        decode(&self.bytes)
    }

    /// Check if this is zero (either +0 or -0)
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.bytes.len() == 1
            && (self.bytes[0] == POS_ZERO_BYTE || self.bytes[0] == NEG_ZERO_BYTE)
    }

    /// Check if this is NaN
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.bytes.len() == 1 && self.bytes[0] == NAN_BYTE
    }

    /// Check if this is infinity (either + or -)
    #[must_use]
    pub fn is_infinity(&self) -> bool {
        self.is_pos_infinity() || self.is_neg_infinity()
    }

    /// Check if this is positive infinity
    #[must_use]
    pub fn is_pos_infinity(&self) -> bool {
        self.bytes.len() == 1 && self.bytes[0] == POS_INFINITY_BYTE
    }

    /// Check if this is negative infinity
    #[must_use]
    pub fn is_neg_infinity(&self) -> bool {
        self.bytes.len() == 1 && self.bytes[0] == NEG_INFINITY_BYTE
    }

    /// Check if this is a finite number (not infinity or NaN)
    #[must_use]
    pub fn is_finite(&self) -> bool {
        !self.is_infinity() && !self.is_nan()
    }

    /// Create positive infinity
    #[must_use]
    pub fn infinity() -> Self {
        Self {
            bytes: vec![POS_INFINITY_BYTE],
        }
    }

    /// Create negative infinity
    #[must_use]
    pub fn neg_infinity() -> Self {
        Self {
            bytes: vec![NEG_INFINITY_BYTE],
        }
    }

    /// Create NaN
    #[must_use]
    pub fn nan() -> Self {
        Self {
            bytes: vec![NAN_BYTE],
        }
    }

    /// Create zero (positive zero)
    #[must_use]
    pub fn zero() -> Self {
        Self {
            bytes: vec![POS_ZERO_BYTE],
        }
    }
}

impl FromStr for Decimal {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: DecimalValue = s.parse()?;
        Self::from_value(&value)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            Ok(value) => write!(f, "{value}"),
            Err(_) => f.write_str("<invalid>"),
        }
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        // Special case: +0 and -0 are equal
        if self.is_zero() && other.is_zero() {
            return true;
        }
        self.bytes == other.bytes
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        // Special case: +0 and -0 are equal (must be consistent with PartialEq)
        if self.is_zero() && other.is_zero() {
            return Ordering::Equal;
        }
        // Direct byte comparison for order preservation
        self.bytes.cmp(&other.bytes)
    }
}

/// Extract decimal digits from a `u128` into a stack buffer.
///
/// Returns the number of digits written. Digits are stored most-significant
/// first in `buf[0..len]`. Zero produces a single digit `0`.
fn u128_to_digits(mut value: u128, buf: &mut [u8; 39]) -> usize {
    if value == 0 {
        buf[0] = 0;
        return 1;
    }

    // Extract digits in reverse order
    let mut pos = 39;
    while value > 0 {
        pos -= 1;
        #[allow(clippy::cast_possible_truncation)]
        {
            buf[pos] = (value % 10) as u8;
        }
        value /= 10;
    }

    // Shift digits to the front of the buffer
    let len = 39 - pos;
    buf.copy_within(pos..39, 0);
    len
}

/// Core conversion: build a [`Decimal`] from an unsigned magnitude and a sign.
fn from_unsigned_with_sign(value: u128, sign: Sign) -> Decimal {
    if value == 0 {
        return Decimal::zero();
    }

    let mut buf = [0u8; 39];
    let len = u128_to_digits(value, &mut buf);

    let value = DecimalValue {
        sign,
        kind: ValueKind::Finite {
            digits: buf[..len].to_vec(),
            exponent: 0,
        },
    };
    Decimal::from_value(&value).expect("integer magnitudes are always within the codec limits")
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        from_unsigned_with_sign(u128::from(value), Sign::Positive)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        let sign = if value >= 0 {
            Sign::Positive
        } else {
            Sign::Negative
        };
        from_unsigned_with_sign(value.unsigned_abs().into(), sign)
    }
}

impl From<u128> for Decimal {
    fn from(value: u128) -> Self {
        from_unsigned_with_sign(value, Sign::Positive)
    }
}

impl From<i128> for Decimal {
    fn from(value: i128) -> Self {
        // unsigned_abs handles i128::MIN, whose magnitude is 2^127.
        let sign = if value >= 0 {
            Sign::Positive
        } else {
            Sign::Negative
        };
        from_unsigned_with_sign(value.unsigned_abs(), sign)
    }
}

// Smaller unsigned types — widen to u64
impl From<u8> for Decimal {
    fn from(value: u8) -> Self {
        Self::from(u64::from(value))
    }
}

impl From<u16> for Decimal {
    fn from(value: u16) -> Self {
        Self::from(u64::from(value))
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Self::from(u64::from(value))
    }
}

// Smaller signed types — widen to i64
impl From<i8> for Decimal {
    fn from(value: i8) -> Self {
        Self::from(i64::from(value))
    }
}

impl From<i16> for Decimal {
    fn from(value: i16) -> Self {
        Self::from(i64::from(value))
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl From<f64> for Decimal {
    /// Convert an [`f64`] via its shortest roundtrip representation.
    ///
    /// Special float values map directly: `f64::NAN` → [`Decimal::nan`],
    /// `f64::INFINITY` → [`Decimal::infinity`], and negative zero is
    /// preserved. Finite floats go through [`f64`]'s `Display`, which prints
    /// plain decimal notation at every magnitude, so `1e300` becomes a 1
    /// followed by three hundred zeros before it is parsed.
    fn from(value: f64) -> Self {
        if value.is_nan() {
            return Self::nan();
        }
        if value.is_infinite() {
            return if value.is_sign_positive() {
                Self::infinity()
            } else {
                Self::neg_infinity()
            };
        }
        if value == 0.0 {
            return if value.is_sign_positive() {
                Self::zero()
            } else {
                Self {
                    bytes: vec![NEG_ZERO_BYTE],
                }
            };
        }

        format!("{value}")
            .parse()
            .expect("f64 Display output is always a valid decimal")
    }
}

impl From<f32> for Decimal {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}
