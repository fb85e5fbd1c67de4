//! Error types for the players API client.
//!
//! `NotFound` gets its own variant because deleting or fetching a player
//! that is already gone is a routine outcome. Other non-2xx responses land
//! in `HttpError` with the raw status and body.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The host could not complete the round-trip (DNS, connection, TLS...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The server answered 2xx but the envelope reported `success: false`.
    #[error("request rejected: {message}")]
    Rejected { message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
