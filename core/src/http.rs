//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! `ApiClient` builds `HttpRequest` values and parses `HttpResponse` values as
//! plain data; only a `Transport` touches the network. Keeping the request and
//! response as owned data makes both halves of the pipeline testable without
//! a server, and lets tests swap the transport for a fake.

use std::borrow::Cow;
use std::fmt;

use reqwest::Url;

/// HTTP method token.
///
/// Methods form an open set compared by value: the well-known verbs are
/// associated constants, and any other token can be built with
/// [`HttpMethod::new`] without touching this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HttpMethod(Cow<'static, str>);

impl HttpMethod {
    pub const CONNECT: HttpMethod = HttpMethod(Cow::Borrowed("CONNECT"));
    pub const DELETE: HttpMethod = HttpMethod(Cow::Borrowed("DELETE"));
    pub const GET: HttpMethod = HttpMethod(Cow::Borrowed("GET"));
    pub const HEAD: HttpMethod = HttpMethod(Cow::Borrowed("HEAD"));
    pub const OPTIONS: HttpMethod = HttpMethod(Cow::Borrowed("OPTIONS"));
    pub const PATCH: HttpMethod = HttpMethod(Cow::Borrowed("PATCH"));
    pub const POST: HttpMethod = HttpMethod(Cow::Borrowed("POST"));
    pub const PUT: HttpMethod = HttpMethod(Cow::Borrowed("PUT"));
    pub const QUERY: HttpMethod = HttpMethod(Cow::Borrowed("QUERY"));
    pub const TRACE: HttpMethod = HttpMethod(Cow::Borrowed("TRACE"));

    pub fn new(token: impl Into<String>) -> Self {
        Self(Cow::Owned(token.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An HTTP request described as plain data.
///
/// Built by `ApiClient::build_request`; the URL is already validated and the
/// headers are already merged in send order.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Case-insensitive header lookup. Returns the first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport`, then passed to `ApiClient::parse_response`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
