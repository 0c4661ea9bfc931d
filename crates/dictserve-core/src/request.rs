//! # Request Module
//!
//! Parsing of inbound invocation payloads shaped `{"data": <key>}`.

use crate::content::require_json_content_type;
use crate::error::{AdapterError, AdapterResult};
use serde_json::Value;
use std::borrow::Cow;

/// Name of the field carrying the lookup key.
pub const DATA_FIELD: &str = "data";

/// The value of the request's `data` field.
///
/// Kept as the raw JSON value so the response can echo exactly what the
/// caller sent. Only string keys can ever match an artifact entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupKey(Value);

impl LookupKey {
    /// Wrap a JSON value, rejecting arrays and objects.
    pub fn new(value: Value) -> AdapterResult<Self> {
        match value {
            Value::Array(_) => Err(AdapterError::InvalidKey("arrays cannot be lookup keys")),
            Value::Object(_) => Err(AdapterError::InvalidKey("objects cannot be lookup keys")),
            scalar => Ok(Self(scalar)),
        }
    }

    /// The key as a string, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// Consume into the raw JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<&str> for LookupKey {
    fn from(key: &str) -> Self {
        Self(Value::String(key.to_string()))
    }
}

// =============================================================================
// BODY DECODING
// =============================================================================

/// Text encoding of a JSON body, detected from its first bytes (RFC 4627 §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyEncoding {
    Utf8,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
}

/// Detect the encoding and return the body with any byte-order mark removed.
///
/// JSON text starts with two ASCII characters, so the zero-byte pattern of the
/// first four bytes identifies the encoding when there is no BOM.
fn detect_encoding(body: &[u8]) -> (BodyEncoding, &[u8]) {
    match body {
        [0x00, 0x00, 0xFE, 0xFF, rest @ ..] => (BodyEncoding::Utf32Be, rest),
        [0xFF, 0xFE, 0x00, 0x00, rest @ ..] => (BodyEncoding::Utf32Le, rest),
        [0xFE, 0xFF, rest @ ..] => (BodyEncoding::Utf16Be, rest),
        [0xFF, 0xFE, rest @ ..] => (BodyEncoding::Utf16Le, rest),
        [0xEF, 0xBB, 0xBF, rest @ ..] => (BodyEncoding::Utf8, rest),
        [0x00, 0x00, _, _, ..] => (BodyEncoding::Utf32Be, body),
        [0x00, _, _, _, ..] => (BodyEncoding::Utf16Be, body),
        [_, 0x00, 0x00, 0x00, ..] => (BodyEncoding::Utf32Le, body),
        [_, 0x00, _, _, ..] => (BodyEncoding::Utf16Le, body),
        [0x00, _] => (BodyEncoding::Utf16Be, body),
        [_, 0x00] => (BodyEncoding::Utf16Le, body),
        _ => (BodyEncoding::Utf8, body),
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> AdapterResult<String> {
    if bytes.len() % 2 != 0 {
        return Err(AdapterError::InvalidEncoding("truncated UTF-16 body"));
    }
    let units = bytes.chunks_exact(2).map(|c| to_unit([c[0], c[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|_| AdapterError::InvalidEncoding("invalid UTF-16 body"))
}

fn decode_utf32(bytes: &[u8], to_unit: fn([u8; 4]) -> u32) -> AdapterResult<String> {
    if bytes.len() % 4 != 0 {
        return Err(AdapterError::InvalidEncoding("truncated UTF-32 body"));
    }
    bytes
        .chunks_exact(4)
        .map(|c| char::from_u32(to_unit([c[0], c[1], c[2], c[3]])))
        .collect::<Option<String>>()
        .ok_or(AdapterError::InvalidEncoding("invalid UTF-32 body"))
}

/// Decode a request body to text. UTF-8 bodies are borrowed, not copied.
fn decode_body(body: &[u8]) -> AdapterResult<Cow<'_, str>> {
    let (encoding, bytes) = detect_encoding(body);
    match encoding {
        BodyEncoding::Utf8 => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|_| AdapterError::InvalidEncoding("invalid UTF-8 body")),
        BodyEncoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes).map(Cow::Owned),
        BodyEncoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes).map(Cow::Owned),
        BodyEncoding::Utf32Be => decode_utf32(bytes, u32::from_be_bytes).map(Cow::Owned),
        BodyEncoding::Utf32Le => decode_utf32(bytes, u32::from_le_bytes).map(Cow::Owned),
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse a request body into its lookup key.
///
/// Fails with [`AdapterError::UnsupportedContentType`] before touching the body
/// when the content type is not JSON. The body may be UTF-8 (with or without a
/// BOM), UTF-16 or UTF-32.
pub fn parse_request(body: &[u8], content_type: &str) -> AdapterResult<LookupKey> {
    require_json_content_type(content_type)?;

    let text = decode_body(body)?;
    let parsed: Value = serde_json::from_str(&text)?;
    let data = match parsed {
        Value::Object(mut fields) => fields.remove(DATA_FIELD).ok_or(AdapterError::MissingData)?,
        _ => return Err(AdapterError::MissingData),
    };

    LookupKey::new(data)
}

// =============================================================================
// TESTS
// =============================================================================
