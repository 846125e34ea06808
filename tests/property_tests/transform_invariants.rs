//! Property-based tests for the header transformation
//!
//! These tests verify the transformation invariants across generated
//! header values and configurations.

use axum::http::{HeaderMap, HeaderValue};
use convert_header::convert::transform::{apply_substitutions, transform};
use convert_header::convert::types::*;
use convert_header::convert::ConvertHeader;
use proptest::prelude::*;

// Property test generators
mod generators {
    use super::*;
    use proptest::string::string_regex;

    /// Header-safe text, including the empty string
    pub fn header_text() -> impl Strategy<Value = String> {
        string_regex("[a-zA-Z0-9%=;/_ -]{0,24}").unwrap()
    }

    /// Any byte sequence a header value may carry, obs-text included
    pub fn header_bytes() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(
            prop_oneof![Just(b'\t'), 0x20u8..0x7f, 0x80u8..=0xff],
            0..24,
        )
    }

    /// Ordered substitution rules
    pub fn replace_values() -> impl Strategy<Value = Vec<ReplaceValue>> {
        proptest::collection::vec(
            (header_text(), header_text()).prop_map(|(old, new)| ReplaceValue::new(old, new)),
            0..4,
        )
    }

    /// Strings containing at least one non-digit character
    pub fn non_numeric() -> impl Strategy<Value = String> {
        string_regex("[0-9]{0,5}[a-zA-Z+ _-][0-9a-z]{0,5}").unwrap()
    }
}

fn raw(
    convert_type: &str,
    replace_values: Vec<ReplaceValue>,
    prefix: &str,
    postfix: &str,
) -> RawConvertConfig {
    RawConvertConfig {
        from_header: "x-source".to_string(),
        create_header: "x-target".to_string(),
        convert_type: convert_type.to_string(),
        replace_values,
        prefix: prefix.to_string(),
        postfix: postfix.to_string(),
    }
}

fn build(
    convert_type: &str,
    replace_values: Vec<ReplaceValue>,
    prefix: &str,
    postfix: &str,
) -> ConvertConfig {
    ConvertConfig::try_from(raw(convert_type, replace_values, prefix, postfix))
        .expect("generated configuration should be valid")
}

/// Sequential literal replacement over text, skipping empty patterns
fn expected_substitution(input: &str, replace_values: &[ReplaceValue]) -> String {
    replace_values.iter().fold(input.to_string(), |value, rv| {
        if rv.old_value.is_empty() {
            value
        } else {
            value.replace(&rv.old_value, &rv.new_value)
        }
    })
}

fn wrapped(prefix: &str, middle: &[u8], postfix: &str) -> Vec<u8> {
    [prefix.as_bytes(), middle, postfix.as_bytes()].concat()
}

proptest! {
    #[test]
    fn prop_no_conversion_is_prefix_substituted_postfix(
        input in generators::header_text(),
        replace_values in generators::replace_values(),
        prefix in generators::header_text(),
        postfix in generators::header_text(),
    ) {
        let expected = format!(
            "{prefix}{}{postfix}",
            expected_substitution(&input, &replace_values)
        );
        let config = build("", replace_values, &prefix, &postfix);

        prop_assert_eq!(transform(&config, input.as_bytes()).unwrap(), expected.into_bytes());
    }

    #[test]
    fn prop_raw_header_bytes_are_carried_through(
        input in generators::header_bytes(),
        prefix in generators::header_text(),
        postfix in generators::header_text(),
    ) {
        let config = build("", vec![], &prefix, &postfix);

        prop_assert_eq!(
            transform(&config, &input).unwrap(),
            wrapped(&prefix, &input, &postfix)
        );
    }

    #[test]
    fn prop_rewritten_header_keeps_exact_bytes(
        input in generators::header_bytes(),
        replace_values in generators::replace_values(),
        prefix in generators::header_text(),
        postfix in generators::header_text(),
    ) {
        let convert = ConvertHeader::new(
            MiddlewareName::default(),
            raw("", replace_values, &prefix, &postfix),
        )
        .unwrap();
        let expected = wrapped(
            &prefix,
            &apply_substitutions(convert.config().substitutions(), &input),
            &postfix,
        );

        let mut headers = HeaderMap::new();
        headers.insert("x-source", HeaderValue::from_bytes(&input).unwrap());
        convert.apply(&mut headers).unwrap();

        prop_assert_eq!(headers.get("x-target").unwrap().as_bytes(), expected.as_slice());
    }

    #[test]
    fn prop_hex_output_is_lowercase_hex_of_input(n in any::<u64>()) {
        let config = build(UINT64_TO_HEX, vec![], "", "");
        let output = String::from_utf8(transform(&config, n.to_string().as_bytes()).unwrap()).unwrap();

        prop_assert!(!output.starts_with("0x"));
        prop_assert!(output.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        prop_assert_eq!(u64::from_str_radix(&output, 16).unwrap(), n);
        prop_assert_eq!(output, format!("{n:x}"));
    }

    #[test]
    fn prop_int64_output_round_trips_through_twos_complement(n in any::<u64>()) {
        let config = build(UINT64_TO_INT64, vec![], "", "");
        let output = String::from_utf8(transform(&config, n.to_string().as_bytes()).unwrap()).unwrap();

        let signed: i64 = output.parse().unwrap();
        prop_assert_eq!(signed as u64, n);
        prop_assert_eq!(signed < 0, n >= 1u64 << 63);
    }

    #[test]
    fn prop_values_beyond_u64_fail(n in (u64::MAX as u128 + 1)..=u128::MAX) {
        for convert_type in [UINT64_TO_HEX, UINT64_TO_INT64] {
            let config = build(convert_type, vec![], "", "");
            let result = transform(&config, n.to_string().as_bytes());
            let is_out_of_range = matches!(
                result,
                Err(ConversionError::ParseFailed { reason: ParseFailure::OutOfRange, .. })
            );
            prop_assert!(is_out_of_range);
        }
    }

    #[test]
    fn prop_non_numeric_values_fail(input in generators::non_numeric()) {
        let config = build(UINT64_TO_HEX, vec![], "", "");
        let result = transform(&config, input.as_bytes());
        let is_invalid_digit = matches!(
            result,
            Err(ConversionError::ParseFailed { reason: ParseFailure::InvalidDigit, .. })
        );
        prop_assert!(is_invalid_digit);
    }

    #[test]
    fn prop_empty_input_skips_conversion(
        prefix in generators::header_text(),
        postfix in generators::header_text(),
    ) {
        for convert_type in [UINT64_TO_HEX, UINT64_TO_INT64] {
            let config = build(convert_type, vec![], &prefix, &postfix);
            prop_assert_eq!(transform(&config, b"").unwrap(), wrapped(&prefix, b"", &postfix));
        }
    }

    #[test]
    fn prop_substitution_only_config_matches_apply_substitutions(
        input in generators::header_bytes(),
        replace_values in generators::replace_values(),
    ) {
        let config = build("", replace_values, "", "");
        prop_assert_eq!(
            apply_substitutions(config.substitutions(), &input),
            transform(&config, &input).unwrap()
        );
    }
}

#[test]
fn test_swapping_overlapping_rules_changes_result() {
    let first = ReplaceValue::new("SerialNumber", "SN");
    let second = ReplaceValue::new("SN%3D", "");

    let forward = build("", vec![first.clone(), second.clone()], "", "");
    let reversed = build("", vec![second, first], "", "");

    let input = b"SerialNumber%3D42";
    assert_eq!(transform(&forward, input).unwrap(), b"42");
    assert_eq!(transform(&reversed, input).unwrap(), b"SN%3D42");
}
