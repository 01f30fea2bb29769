use thiserror::Error;

/// Unified error type for the account display library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    #[error("connect error: {0}")]
    Connect(#[from] ConnectError),

    #[error("clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("registry error: {0}")]
    Registry(String),
}

/// Errors during address normalization and resolution.
///
/// `Missing` is not a fault — the caller renders a loading placeholder.
/// `InvalidChecksum` is terminal: the address must not be linked or copied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("no address supplied")]
    Missing,

    #[error("invalid checksum address: {input}")]
    InvalidChecksum { input: String },
}

/// Errors during wallet connector actions.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("connector not found: {id}")]
    ConnectorNotFound { id: String },

    #[error("connect failed: {0}")]
    Failed(String),
}

/// Clipboard write failure. Callers log and swallow this — it never
/// surfaces as a blocking UI state.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable")]
    Unavailable,

    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Errors from the persistent key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(String),
}
