//! # Content Module
//!
//! Media type matching for request `Content-Type` and response `Accept`.
//!
//! Only `application/json` is supported in either direction. Matching is on the
//! essence (`type/subtype`), case-insensitive, with parameters ignored.

use crate::error::{AdapterError, AdapterResult};

/// The one media type this adapter speaks.
pub const APPLICATION_JSON: &str = "application/json";

/// Strip parameters and whitespace from a media type, lowercased.
fn essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Check a request content type.
pub fn require_json_content_type(content_type: &str) -> AdapterResult<()> {
    if essence(content_type) == APPLICATION_JSON {
        Ok(())
    } else {
        Err(AdapterError::UnsupportedContentType(content_type.to_string()))
    }
}

/// Resolve an `Accept` value to the media type the response will use.
///
/// Empty, `*/*` and `application/*` all resolve to JSON. A list resolves when
/// any of its entries does.
pub fn negotiate_accept(accept: &str) -> AdapterResult<&'static str> {
    if accept.trim().is_empty() {
        return Ok(APPLICATION_JSON);
    }

    let acceptable = accept.split(',').map(essence).any(|candidate| {
        matches!(candidate.as_str(), APPLICATION_JSON | "*/*" | "application/*")
    });

    if acceptable {
        Ok(APPLICATION_JSON)
    } else {
        Err(AdapterError::UnsupportedAccept(accept.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json_is_accepted() {
        assert!(require_json_content_type("application/json").is_ok());
    }

    #[test]
    fn charset_parameter_is_ignored() {
        assert!(require_json_content_type("application/json; charset=utf-8").is_ok());
        assert!(require_json_content_type("Application/JSON").is_ok());
    }

    #[test]
    fn text_plain_is_rejected() {
        assert!(matches!(
            require_json_content_type("text/plain"),
            Err(AdapterError::UnsupportedContentType(ct)) if ct == "text/plain"
        ));
    }

    #[test]
    fn empty_content_type_is_rejected() {
        assert!(require_json_content_type("").is_err());
    }

    #[test]
    fn wildcards_resolve_to_json() {
        assert_eq!(negotiate_accept("*/*").ok(), Some(APPLICATION_JSON));
        assert_eq!(negotiate_accept("application/*").ok(), Some(APPLICATION_JSON));
        assert_eq!(negotiate_accept("").ok(), Some(APPLICATION_JSON));
    }

    #[test]
    fn accept_list_with_json_entry_resolves() {
        assert_eq!(
            negotiate_accept("text/html, application/json;q=0.9").ok(),
            Some(APPLICATION_JSON)
        );
    }

    #[test]
    fn csv_accept_is_rejected() {
        assert!(matches!(
            negotiate_accept("text/csv"),
            Err(AdapterError::UnsupportedAccept(_))
        ));
    }
}
