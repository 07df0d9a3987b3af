//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! The core crate builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. A host-supplied `Transport` executes
//! the round-trip. GraphQL over HTTP always uses POST, so requests carry no
//! method field.
//!
//! A `Transport` reports only failures to complete the exchange (connection
//! refused, DNS, timeouts). Any response that arrives, including 4xx / 5xx,
//! is returned as data so the GraphQL layer classifies it.

use thiserror::Error;

/// An HTTP POST request described as plain data.
///
/// Built by `GraphqlClient::build_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// Executes `HttpRequest` values on behalf of the core.
pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}
