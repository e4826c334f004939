use thiserror::Error;

/// Errors that can occur while decoding an encoded decimal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid header: expected sign bits 00 or 10 followed by a zero pad bit")]
    InvalidSign,

    #[error(
        "Invalid encoding: zero encoded with a negative adjusted exponent (headers 100011xx and 000100xx are reserved out)"
    )]
    ZeroWithNegativeExponent,

    #[error("Invalid declet: value {0} is outside valid range [0, 999]")]
    InvalidDeclet(u16),

    #[error("Invalid significand: {0}")]
    InvalidSignificand(String),

    #[error("Significand has {0} digits, more than the configured maximum")]
    SignificandTooLong(usize),

    #[error("Unexpected end of input while decoding")]
    UnexpectedEndOfInput,

    #[error("Invalid gamma code: malformed exponent field")]
    InvalidGammaCode,

    #[error("Adjusted exponent is outside the configured limits")]
    ExponentOutOfRange,

    #[error("Invalid special value encoding")]
    InvalidSpecialValue,
}

/// Errors that can occur while building or encoding a decimal value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Adjusted exponent {0} is outside the supported range")]
    ExponentOutOfRange(i64),

    #[error("Coefficient has {0} digits, more than the configured maximum")]
    TooManyDigits(usize),

    #[error("Invalid coefficient digit: {0} is not in [0, 9]")]
    InvalidDigit(u8),

    #[error("Invalid decimal format: {0}")]
    InvalidFormat(String),
}

/// Result type for decoding operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encoding operations
pub type EncodeResult<T> = Result<T, EncodeError>;
