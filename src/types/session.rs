/// Lifecycle state of the remote sync session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The identity client failed to initialize (or was never initialized).
    /// Terminal until an external retry.
    Unauthenticated,
    /// Client initialized, not signed in. Sign-in is possible.
    Ready,
    /// A token request is in flight.
    SigningIn,
    /// Signed in; remote persistence is active.
    Authenticated,
}
