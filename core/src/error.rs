//! Error types for the GraphQL client and the sessions built on top of it.
//!
//! # Design
//! `ApiError` is the detailed failure of one request/response exchange and
//! keeps the raw material useful for debugging. Sessions never look at it
//! directly: it is folded into a `ClassifiedError`, the three buckets the
//! user-facing messages are chosen from.

use thiserror::Error;

use crate::http::TransportError;

/// Connectivity message shared by every screen.
pub const NETWORK_MESSAGE: &str = "Problema de rede. Verifique sua conexão com a internet.";

/// Shown when a form submission fails for an unclassifiable reason.
pub const FORM_UNKNOWN_MESSAGE: &str = "Ocorreu um erro inesperado. Tente novamente.";

/// Shown when a query was rejected by the server.
pub const QUERY_MESSAGE: &str = "Erro ao buscar dados. Tente novamente mais tarde.";

/// Errors returned by `GraphqlClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a GraphQL `errors` array. Messages are kept
    /// in server order.
    #[error("graphql error: {}", .messages.first().map(String::as_str).unwrap_or("<empty>"))]
    Graphql { messages: Vec<String> },

    /// Non-2xx status without a GraphQL error payload.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response decoded but the expected field was null or absent.
    #[error("response is missing `{0}`")]
    MissingData(&'static str),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport(err.0)
    }
}

/// A remote failure bucketed for user messaging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifiedError {
    #[error("network error")]
    Network,

    /// Server-side rejection; the message is user-facing and kept verbatim.
    #[error("application error: {0}")]
    Application(String),

    #[error("unknown error")]
    Unknown,
}

impl ClassifiedError {
    /// Message for the `server` slot of a form's ErrorSet.
    pub fn form_message(&self) -> &str {
        match self {
            ClassifiedError::Network => NETWORK_MESSAGE,
            ClassifiedError::Application(message) => message,
            ClassifiedError::Unknown => FORM_UNKNOWN_MESSAGE,
        }
    }

    /// Message for a failed query, with `generic` as the unknown fallback.
    pub fn query_message(&self, generic: &'static str) -> &'static str {
        match self {
            ClassifiedError::Network => NETWORK_MESSAGE,
            ClassifiedError::Application(_) => QUERY_MESSAGE,
            ClassifiedError::Unknown => generic,
        }
    }
}

impl From<ApiError> for ClassifiedError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(_) | ApiError::HttpError { .. } => ClassifiedError::Network,
            ApiError::Graphql { messages } => match messages.into_iter().next() {
                Some(first) => ClassifiedError::Application(first),
                None => ClassifiedError::Unknown,
            },
            ApiError::MissingData(_)
            | ApiError::DeserializationError(_)
            | ApiError::SerializationError(_) => ClassifiedError::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_graphql_message_wins() {
        let err = ApiError::Graphql {
            messages: vec!["Email already in use".to_string(), "second".to_string()],
        };
        let classified = ClassifiedError::from(err);
        assert_eq!(classified, ClassifiedError::Application("Email already in use".to_string()));
        assert_eq!(classified.form_message(), "Email already in use");
    }

    #[test]
    fn transport_and_status_failures_are_network() {
        assert_eq!(
            ClassifiedError::from(ApiError::Transport("refused".to_string())),
            ClassifiedError::Network
        );
        let err = ApiError::HttpError {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(ClassifiedError::from(err), ClassifiedError::Network);
        assert_eq!(ClassifiedError::Network.form_message(), NETWORK_MESSAGE);
    }

    #[test]
    fn empty_error_array_is_unknown() {
        let err = ApiError::Graphql { messages: Vec::new() };
        assert_eq!(ClassifiedError::from(err), ClassifiedError::Unknown);
    }

    #[test]
    fn decode_failures_are_unknown() {
        assert_eq!(
            ClassifiedError::from(ApiError::DeserializationError("eof".to_string())),
            ClassifiedError::Unknown
        );
        assert_eq!(ClassifiedError::from(ApiError::MissingData("login")), ClassifiedError::Unknown);
        assert_eq!(ClassifiedError::Unknown.form_message(), FORM_UNKNOWN_MESSAGE);
    }

    #[test]
    fn query_messages_hide_server_text() {
        let err = ClassifiedError::Application("internal detail".to_string());
        assert_eq!(err.query_message("generic"), QUERY_MESSAGE);
        assert_eq!(ClassifiedError::Unknown.query_message("generic"), "generic");
        assert_eq!(ClassifiedError::Network.query_message("generic"), NETWORK_MESSAGE);
    }
}
