//! Header filtering for both legs of a forwarded request

use http::header::{CONTENT_TYPE, HeaderName};
use http::{HeaderMap, HeaderValue};

/// Header carrying the matched rule's reason downstream
pub const REASON_HEADER: &str = "x-grd-reason";

/// Inbound headers that describe the inbound request only
pub const REQUEST_SCOPED_HEADERS: [&str; 4] =
    ["content-length", "content-type", "host", "x-grd-signature"];

/// Headers meaningful for a single transport leg
pub const HOP_BY_HOP_HEADERS: [&str; 7] = [
    "connection",
    "keep-alive",
    "transfer-encoding",
    "content-encoding",
    "te",
    "trailers",
    "upgrade",
];

/// Build the outbound header set from the inbound one
///
/// Drops [`REQUEST_SCOPED_HEADERS`], then sets `content-type:
/// application/json` and `x-grd-reason`. Returns `None` if the reason is not
/// a valid header value.
pub fn outbound_headers(inbound: &HeaderMap, reason: &str) -> Option<HeaderMap> {
    let reason = HeaderValue::from_bytes(reason.as_bytes()).ok()?;

    let mut headers = inbound.clone();
    for name in REQUEST_SCOPED_HEADERS {
        headers.remove(name);
    }

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(HeaderName::from_static(REASON_HEADER), reason);
    Some(headers)
}

/// Drop hop-by-hop headers from a downstream response
pub fn filter_response_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = headers.clone();
    for name in HOP_BY_HOP_HEADERS {
        filtered.remove(name);
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbound() -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert("content-length", HeaderValue::from_static("42"));
        h.insert("content-type", HeaderValue::from_static("application/octet-stream"));
        h.insert("host", HeaderValue::from_static("proxy:8000"));
        h.insert("x-grd-signature", HeaderValue::from_static("abc123"));
        h.insert("x-request-id", HeaderValue::from_static("req-1"));
        h.append("x-trace", HeaderValue::from_static("a"));
        h.append("x-trace", HeaderValue::from_static("b"));
        h.insert("user-agent", HeaderValue::from_static("guardio/1.0"));
        h
    }

    #[test]
    fn test_outbound_strips_request_scoped_headers() {
        let out = outbound_headers(&inbound(), "Legendary Pokemon").unwrap();

        assert!(out.get("content-length").is_none());
        assert!(out.get("host").is_none());
        assert!(out.get("x-grd-signature").is_none());
        assert_eq!(out["content-type"], "application/json");
        assert_eq!(out["x-grd-reason"], "Legendary Pokemon");
    }

    #[test]
    fn test_outbound_keeps_other_headers() {
        let out = outbound_headers(&inbound(), "r").unwrap();

        assert_eq!(out["x-request-id"], "req-1");
        assert_eq!(out["user-agent"], "guardio/1.0");
        let traces: Vec<&str> = out
            .get_all("x-trace")
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(traces, ["a", "b"]);
    }

    #[test]
    fn test_outbound_reason_overrides_inbound_reason() {
        let mut h = inbound();
        h.insert("x-grd-reason", HeaderValue::from_static("spoofed"));

        let out = outbound_headers(&h, "real").unwrap();
        assert_eq!(out.get_all("x-grd-reason").iter().count(), 1);
        assert_eq!(out["x-grd-reason"], "real");
    }

    #[test]
    fn test_outbound_non_ascii_reason() {
        let out = outbound_headers(&inbound(), "Pokémon").unwrap();
        assert_eq!(out["x-grd-reason"].as_bytes(), "Pokémon".as_bytes());
    }

    #[test]
    fn test_outbound_invalid_reason() {
        assert!(outbound_headers(&inbound(), "bad\r\nreason").is_none());
    }

    #[test]
    fn test_response_hop_by_hop_stripped() {
        let mut h = HeaderMap::new();
        for name in HOP_BY_HOP_HEADERS {
            h.insert(name, HeaderValue::from_static("x"));
        }
        h.insert("content-type", HeaderValue::from_static("application/json"));
        h.insert("x-downstream", HeaderValue::from_static("legendary"));

        let filtered = filter_response_headers(&h);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered["content-type"], "application/json");
        assert_eq!(filtered["x-downstream"], "legendary");
    }
}
