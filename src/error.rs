use thiserror::Error;

/// Errors that can occur while talking to the control surface
#[derive(Error, Debug)]
pub enum Error {
    /// Wire text failed to parse or violates the message schema
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// Decoded node name is not part of the node catalogue
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// Value cannot be expressed on the wire (NaN)
    #[error("unrepresentable value: {0}")]
    UnrepresentableValue(String),

    /// Reply did not have the shape the request expected
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// Another request is already awaiting its reply
    #[error("another request is already in flight")]
    RequestInFlight,

    /// Request timed out waiting for its reply
    #[error("request timed out")]
    Timeout,

    /// Transport refused or failed to deliver a frame
    #[error("transport error: {0}")]
    Transport(String),

    /// Connection closed before the operation could complete
    #[error("connection closed")]
    ConnectionClosed,
}

impl Error {
    /// True for errors caused by bad inbound wire text.
    ///
    /// An unknown node name is a schema violation like any other.
    pub fn is_malformed(&self) -> bool {
        // ---
        matches!(self, Error::MalformedMessage(_) | Error::UnknownNode(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        // ---
        Error::MalformedMessage(err.to_string())
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;
