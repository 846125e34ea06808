//! Pure header value transformation
//!
//! Maps a configuration and an inbound header value to the outbound value.
//! Each step's output feeds the next:
//!
//! 1. substitutions, applied in configured order
//! 2. numeric conversion, skipped for an empty value or `ConversionKind::None`
//! 3. prefix and postfix
//!
//! Values are raw header bytes. Only the numeric conversion looks at them as
//! digits; every other byte, including obs-text, is carried through as-is.
//! Nothing here touches a request; see `middleware` for the header plumbing.

use crate::convert::types::*;

/// Computes the outbound header value for `input`
pub fn transform(config: &ConvertConfig, input: &[u8]) -> ConversionResult<Vec<u8>> {
    let substituted = apply_substitutions(config.substitutions(), input);
    let converted = convert_value(config.conversion(), substituted)?;
    Ok(wrap(config.prefix(), config.postfix(), converted))
}

/// Applies every substitution in sequence; later rules see earlier results
pub fn apply_substitutions(substitutions: &[Substitution], input: &[u8]) -> Vec<u8> {
    substitutions
        .iter()
        .fold(input.to_vec(), |value, substitution| substitution.apply(value))
}

/// Reinterprets `value` according to `kind`
///
/// An empty value is returned untouched whatever the kind.
pub fn convert_value(kind: ConversionKind, value: Vec<u8>) -> ConversionResult<Vec<u8>> {
    if value.is_empty() {
        return Ok(value);
    }

    match kind {
        ConversionKind::None => Ok(value),
        ConversionKind::Uint64ToHex => {
            parse_unsigned(&value).map(|n| format!("{n:x}").into_bytes())
        }
        // Two's complement reinterpretation: values >= 2^63 become negative
        ConversionKind::Uint64ToInt64 => {
            parse_unsigned(&value).map(|n| (n as i64).to_string().into_bytes())
        }
    }
}

/// Parses a base-10 unsigned 64-bit integer made of ASCII digits only
///
/// Signs, whitespace, digit separators and non-ASCII bytes are rejected.
pub fn parse_unsigned(value: &[u8]) -> ConversionResult<u64> {
    let failed = |reason| ConversionError::ParseFailed {
        value: String::from_utf8_lossy(value).into_owned(),
        reason,
    };

    if value.is_empty() || !value.iter().all(u8::is_ascii_digit) {
        return Err(failed(ParseFailure::InvalidDigit));
    }

    value
        .iter()
        .try_fold(0u64, |n, digit| {
            n.checked_mul(10)?.checked_add(u64::from(digit - b'0'))
        })
        .ok_or_else(|| failed(ParseFailure::OutOfRange))
}

fn wrap(prefix: &HeaderAffix, postfix: &HeaderAffix, value: Vec<u8>) -> Vec<u8> {
    if prefix.is_empty() && postfix.is_empty() {
        return value;
    }

    let (prefix, postfix) = (prefix.as_ref().as_bytes(), postfix.as_ref().as_bytes());
    let mut wrapped = Vec::with_capacity(prefix.len() + value.len() + postfix.len());
    wrapped.extend_from_slice(prefix);
    wrapped.extend_from_slice(&value);
    wrapped.extend_from_slice(postfix);
    wrapped
}
