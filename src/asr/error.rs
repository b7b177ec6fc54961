use std::time::Duration;
use thiserror::Error;

/// Failure taxonomy for a transcription request.
///
/// `UnsupportedAudioFormat` and `AuthenticationConfigMissing` indicate a
/// caller or deployment defect and are never retried. The remaining variants
/// are transient: the session runs one more attempt on a fresh connection
/// before surfacing them.
#[derive(Debug, Error)]
pub enum AsrError {
    /// Input audio the normalizer cannot handle (wrong sample width,
    /// unsupported channel layout, or an unreadable container).
    #[error("unsupported audio format: {0}")]
    UnsupportedAudioFormat(String),

    /// A required recognition credential is absent from configuration.
    #[error("missing recognition credential: {0}")]
    AuthenticationConfigMissing(&'static str),

    /// Transport-level failure: connect, read, write, or a protocol
    /// violation on the socket.
    #[error("connection error: {0}")]
    ConnectionError(String),

    /// The recognition service reported a non-zero response code.
    #[error("recognition service error {code}: {message}")]
    VendorError { code: i32, message: String },

    /// No terminal message arrived within the session bound.
    #[error("no final result within {0:?}")]
    Timeout(Duration),

    /// The service finished cleanly but produced no text.
    #[error("recognition finished without producing any text")]
    EmptyResult,
}
