//! # declex
//!
//! An order-preserving binary encoding for arbitrary-precision decimal
//! numbers, in the decInfinite dialect of the **decimalInfinite** scheme
//! from the paper "decimalInfinite: All Decimals In Bits. No Loss. Same
//! Order. Simple." by Ghislain Fourny.
//!
//! The encoding provides:
//!
//! - **Arbitrary precision**: no loss of information for any decimal number
//! - **Order preservation**: lexicographic comparison of encoded bytes
//!   matches numerical comparison, including ±∞ and NaN
//! - **Variable length**: the encoding grows with the number, from a single
//!   byte for the special values
//!
//! Typical uses are database sort keys, ordered key-value storage and range
//! queries over decimals without decoding.
//!
//! ## Examples
//!
//! ```rust
//! use declex::Decimal;
//!
//! let a: Decimal = "-10.5".parse().unwrap();
//! let b: Decimal = "2".parse().unwrap();
//! let c: Decimal = "10".parse().unwrap();
//! assert!(a < b && b < c);
//!
//! // Byte order is numeric order.
//! assert!(a.as_bytes() < b.as_bytes());
//!
//! // Round-trip through raw bytes.
//! let restored = Decimal::from_bytes(b.as_bytes()).unwrap();
//! assert_eq!(b, restored);
//! ```
//!
//! The semantic type and the free functions expose the codec directly:
//!
//! ```rust
//! use declex::{decode, encode, DecimalValue, Sign};
//!
//! // 1.9 as 19 × 10^-1
//! let value = DecimalValue::new(Sign::Positive, vec![1, 9], -1).unwrap();
//! let bytes = encode(&value).unwrap();
//! assert_eq!(bytes, [0x90, 0xBE]);
//!
//! // The decoded coefficient keeps its declet padding: 190 × 10^-2.
//! let back = decode(&bytes).unwrap();
//! assert_eq!(back.digits(), Some(&[1, 9, 0][..]));
//! assert_eq!(back.exponent(), Some(-2));
//! ```
//!
//! ## Format Overview
//!
//! Special values occupy one byte each, chosen so they bracket the finite
//! numbers:
//!
//! | Value | Byte   |
//! |-------|--------|
//! | -∞    | `0x00` |
//! | -0    | `0x40` |
//! | +0    | `0x80` |
//! | +∞    | `0xC0` |
//! | NaN   | `0xE0` |
//!
//! A finite nonzero number is laid out MSB-first as:
//!
//! - **S** (2 bits): `00` negative, `10` positive
//! - **pad** (1 bit): always `0`, keeps declets off three-byte straddles
//! - **E** (odd number of bits): adjusted exponent as a modified Elias
//!   gamma code, complemented as needed so byte order survives
//! - **M** (10 bits per 3 digits): coefficient declets, ten's complemented
//!   for negative numbers, zero-padded to the byte boundary

#![deny(unsafe_code)]

pub(crate) mod bits;
pub(crate) mod decimal;
pub(crate) mod decoder;
pub(crate) mod encoder;
pub(crate) mod error;
pub(crate) mod gamma;
pub(crate) mod significand;

// Re-export main types and functions
pub use decimal::{Decimal, DecimalValue, Sign};
pub use decoder::decode;
pub use encoder::encode;
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};

/// Encoded byte for negative infinity; sorts below every number.
pub const NEG_INFINITY_BYTE: u8 = 0x00;

/// Encoded byte for negative zero. Compares equal to [`POS_ZERO_BYTE`]
/// through [`Decimal`], but the bytes stay distinct.
pub const NEG_ZERO_BYTE: u8 = 0x40;

/// Encoded byte for positive zero.
pub const POS_ZERO_BYTE: u8 = 0x80;

/// Encoded byte for positive infinity; sorts above every finite number.
pub const POS_INFINITY_BYTE: u8 = 0xC0;

/// Encoded byte for NaN; sorts above everything else.
pub const NAN_BYTE: u8 = 0xE0;

/// Maximum number of coefficient digits the codec accepts, a multiple of 3
/// so the cap lands on a declet boundary.
pub const MAX_COEFFICIENT_DIGITS: usize = 999_999;

/// Cap on the unary prefix of the exponent field. 30 bits cover the full
/// [`MAX_ADJUSTED_EXPONENT`] range.
pub const MAX_EXPONENT_BITS: usize = 30;

/// Largest adjusted exponent magnitude, mirroring the conventional
/// nine-nines limit of decimal arithmetic libraries.
pub const MAX_ADJUSTED_EXPONENT: u64 = 999_999_999;

/// Size in bytes of the largest possible encoding: sign and pad bits, a
/// maximal exponent field and a maximal run of declets, rounded up to whole
/// bytes.
pub const MAX_ENCODED_SIZE: usize =
    1 + (2 + 1 + (2 * MAX_EXPONENT_BITS - 1) + MAX_COEFFICIENT_DIGITS / 3 * 10 - 1) / 8;
