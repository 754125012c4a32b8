use std::fmt;

// === ImportError ===

/// Errors raised while parsing an import payload.
///
/// A failed import never mutates the collection: the whole file is rejected.
#[derive(Debug)]
pub enum ImportError {
    /// The file extension is not one of the supported formats.
    UnsupportedFormat(String),
    /// The payload is not syntactically valid JSON.
    Parse(String),
    /// The payload parsed but does not have the required shape.
    InvalidShape(String),
    /// The file parsed but contained no usable bookmarks.
    Empty,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnsupportedFormat(name) => {
                write!(f, "Unsupported file type: {}. Expected .json or .html", name)
            }
            ImportError::Parse(msg) => write!(f, "Invalid JSON: {}", msg),
            ImportError::InvalidShape(msg) => write!(f, "Invalid format: {}", msg),
            ImportError::Empty => write!(f, "No valid bookmarks found in the file"),
        }
    }
}

impl std::error::Error for ImportError {}

// === PersistenceError ===

/// Errors from the load/save boundary.
///
/// These are logged and never roll back in-memory state; the collection in
/// memory stays authoritative.
#[derive(Debug)]
pub enum PersistenceError {
    /// Failed to serialize or deserialize a snapshot.
    Encode(String),
    /// The local blob store rejected a read or write.
    Blob(String),
    /// The remote store could not be reached.
    Network(String),
    /// The remote store answered with an error.
    Remote(String),
    /// A remote operation was attempted without a session token.
    NotAuthenticated,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Encode(msg) => write!(f, "Snapshot encoding error: {}", msg),
            PersistenceError::Blob(msg) => write!(f, "Blob store error: {}", msg),
            PersistenceError::Network(msg) => write!(f, "Remote store network error: {}", msg),
            PersistenceError::Remote(msg) => write!(f, "Remote store error: {}", msg),
            PersistenceError::NotAuthenticated => {
                write!(f, "Not signed in to the remote store")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

// === SessionError ===

/// Errors surfaced by the sync session state machine.
#[derive(Debug)]
pub enum SessionError {
    /// The identity client failed to initialize. Terminal for the session
    /// until an external retry.
    InitFailed(String),
    /// Sign-in was requested from a state that does not allow it.
    NotReady(String),
    /// The identity provider refused to issue a token.
    TokenDenied(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InitFailed(msg) => {
                write!(f, "Sign-in client failed to initialize: {}", msg)
            }
            SessionError::NotReady(msg) => write!(f, "Cannot sign in: {}", msg),
            SessionError::TokenDenied(msg) => write!(f, "Sign-in error: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

// === ShareError ===

/// Errors from sharing a bookmark as a generated document.
///
/// Only document creation is fatal; per-recipient permission failures are
/// collected in the share report instead.
#[derive(Debug)]
pub enum ShareError {
    /// The bookmark or group to share was not found.
    NotFound(String),
    /// Creating or filling the shared document failed.
    DocumentCreation(String),
    /// A network error occurred before any document was created.
    Network(String),
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareError::NotFound(what) => write!(f, "Nothing to share: {}", what),
            ShareError::DocumentCreation(msg) => {
                write!(f, "Shared document creation failed: {}", msg)
            }
            ShareError::Network(msg) => write!(f, "Share network error: {}", msg),
        }
    }
}

impl std::error::Error for ShareError {}
