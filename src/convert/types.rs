//! Type definitions for the header conversion middleware

use http::{HeaderName, HeaderValue};
use nutype::nutype;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ========== Constants ==========

/// Conversion token: parse as u64, render as lowercase hex
pub const UINT64_TO_HEX: &str = "uint64tohex";

/// Conversion token: parse as u64, reinterpret as i64, render as decimal
pub const UINT64_TO_INT64: &str = "uint64toint64";

/// Instance name used when none is configured
pub const DEFAULT_MIDDLEWARE_NAME: &str = "convert-header";

/// Configuration field names, as they appear in configuration documents
pub mod fields {
    pub const FROM_HEADER: &str = "fromHeader";
    pub const CREATE_HEADER: &str = "createHeader";
    pub const REPLACE_VALUES: &str = "replaceValues";
    pub const PREFIX: &str = "prefix";
    pub const POSTFIX: &str = "postfix";
}

/// Returns true when `s` can be stored in an HTTP header value as-is
pub fn is_header_value_safe(s: &str) -> bool {
    HeaderValue::from_str(s).is_ok()
}

// ========== Errors ==========

/// Errors raised while validating a middleware configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid conversion kind {value:?}: expected \"uint64tohex\" or \"uint64toint64\"")]
    InvalidConversionKind { value: String },

    #[error("Invalid header name in {field}: {value:?}")]
    InvalidHeaderName { field: &'static str, value: String },

    #[error("Invalid header value in {field}")]
    InvalidHeaderValue { field: &'static str },
}

/// Why a header value could not be read as an unsigned 64-bit integer
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("invalid digit found in string")]
    InvalidDigit,

    #[error("number too large to fit in an unsigned 64-bit integer")]
    OutOfRange,
}

/// Errors raised while converting a single request's header
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Failed to parse {value:?} as an unsigned 64-bit integer: {reason}")]
    ParseFailed {
        value: String,
        #[source]
        reason: ParseFailure,
    },
}

/// Result type for per-request conversion
pub type ConversionResult<T> = Result<T, ConversionError>;

// ========== Validated Values ==========

/// Name of a middleware instance, attached to its log lines
#[nutype(
    validate(not_empty, len_char_max = 100),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Serialize,
        Deserialize,
        AsRef,
        Display
    )
)]
pub struct MiddlewareName(String);

impl Default for MiddlewareName {
    fn default() -> Self {
        Self::try_new(DEFAULT_MIDDLEWARE_NAME.to_string())
            .expect("Default middleware name is valid")
    }
}

/// Text placed before or after the converted value
#[nutype(
    validate(predicate = |s| is_header_value_safe(s)),
    derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRef, Display)
)]
pub struct HeaderAffix(String);

impl HeaderAffix {
    pub fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }
}

impl Default for HeaderAffix {
    fn default() -> Self {
        Self::try_new(String::new()).expect("Empty affix is valid")
    }
}

/// Numeric reinterpretation applied after substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConversionKind {
    #[default]
    None,
    Uint64ToHex,
    Uint64ToInt64,
}

impl ConversionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionKind::None => "",
            ConversionKind::Uint64ToHex => UINT64_TO_HEX,
            ConversionKind::Uint64ToInt64 => UINT64_TO_INT64,
        }
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionKind::None => write!(f, "none"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl FromStr for ConversionKind {
    type Err = ConfigError;

    /// Tokens are matched exactly; the empty token selects no conversion.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(ConversionKind::None),
            UINT64_TO_HEX => Ok(ConversionKind::Uint64ToHex),
            UINT64_TO_INT64 => Ok(ConversionKind::Uint64ToInt64),
            _ => Err(ConfigError::InvalidConversionKind {
                value: s.to_string(),
            }),
        }
    }
}

/// A literal (old, new) replacement applied to the raw header bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    old: String,
    new: String,
}

impl Substitution {
    pub fn try_new(old: impl Into<String>, new: impl Into<String>) -> Result<Self, ConfigError> {
        let new = new.into();
        if !is_header_value_safe(&new) {
            return Err(ConfigError::InvalidHeaderValue {
                field: fields::REPLACE_VALUES,
            });
        }
        Ok(Self {
            old: old.into(),
            new,
        })
    }

    pub fn old(&self) -> &str {
        &self.old
    }

    pub fn new_value(&self) -> &str {
        &self.new
    }

    /// Replaces every non-overlapping occurrence of the old text, scanning
    /// left to right.
    ///
    /// Matching is bytewise, so bytes outside UTF-8 pass through untouched.
    /// An empty old text matches nothing.
    pub fn apply(&self, value: Vec<u8>) -> Vec<u8> {
        let old = self.old.as_bytes();
        if old.is_empty() || find(&value, old).is_none() {
            return value;
        }

        let mut replaced = Vec::with_capacity(value.len());
        let mut rest = value.as_slice();
        while let Some(at) = find(rest, old) {
            replaced.extend_from_slice(&rest[..at]);
            replaced.extend_from_slice(self.new.as_bytes());
            rest = &rest[at + old.len()..];
        }
        replaced.extend_from_slice(rest);
        replaced
    }
}

/// Offset of the first occurrence of a non-empty `needle`
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

// ========== Raw Configuration ==========

/// A single `{oldValue, newValue}` entry of a raw configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplaceValue {
    pub old_value: String,
    pub new_value: String,
}

impl ReplaceValue {
    pub fn new(old_value: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self {
            old_value: old_value.into(),
            new_value: new_value.into(),
        }
    }
}

/// Unvalidated middleware configuration, as read from a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawConvertConfig {
    pub from_header: String,
    pub create_header: String,
    pub convert_type: String,
    pub replace_values: Vec<ReplaceValue>,
    pub prefix: String,
    pub postfix: String,
}

// ========== Validated Configuration ==========

/// Validated, read-only description of one header conversion
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    from_header: HeaderName,
    to_header: HeaderName,
    conversion: ConversionKind,
    substitutions: Vec<Substitution>,
    prefix: HeaderAffix,
    postfix: HeaderAffix,
}

impl ConvertConfig {
    pub fn from_header(&self) -> &HeaderName {
        &self.from_header
    }

    pub fn to_header(&self) -> &HeaderName {
        &self.to_header
    }

    pub fn conversion(&self) -> ConversionKind {
        self.conversion
    }

    pub fn substitutions(&self) -> &[Substitution] {
        &self.substitutions
    }

    pub fn prefix(&self) -> &HeaderAffix {
        &self.prefix
    }

    pub fn postfix(&self) -> &HeaderAffix {
        &self.postfix
    }
}

impl TryFrom<RawConvertConfig> for ConvertConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConvertConfig) -> Result<Self, Self::Error> {
        if raw.from_header.is_empty() {
            return Err(ConfigError::MissingField {
                field: fields::FROM_HEADER,
            });
        }
        if raw.create_header.is_empty() {
            return Err(ConfigError::MissingField {
                field: fields::CREATE_HEADER,
            });
        }

        let conversion = raw.convert_type.parse::<ConversionKind>()?;
        let from_header = parse_header_name(fields::FROM_HEADER, &raw.from_header)?;
        let to_header = parse_header_name(fields::CREATE_HEADER, &raw.create_header)?;

        let substitutions = raw
            .replace_values
            .into_iter()
            .map(|rv| Substitution::try_new(rv.old_value, rv.new_value))
            .collect::<Result<Vec<_>, _>>()?;

        let prefix = HeaderAffix::try_new(raw.prefix).map_err(|_| {
            ConfigError::InvalidHeaderValue {
                field: fields::PREFIX,
            }
        })?;
        let postfix = HeaderAffix::try_new(raw.postfix).map_err(|_| {
            ConfigError::InvalidHeaderValue {
                field: fields::POSTFIX,
            }
        })?;

        Ok(Self {
            from_header,
            to_header,
            conversion,
            substitutions,
            prefix,
            postfix,
        })
    }
}

fn parse_header_name(field: &'static str, value: &str) -> Result<HeaderName, ConfigError> {
    HeaderName::from_bytes(value.as_bytes()).map_err(|_| ConfigError::InvalidHeaderName {
        field,
        value: value.to_string(),
    })
}
