//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum used to classify failures at the UI
//! boundary. The client consumes HTTP statuses from the hosted identity
//! provider, so the mapping runs status -> kind, never the other way.

use serde::Serialize;

/// Failure classification for the client core.
///
/// Every error surfaced to the UI boundary carries one of these kinds so the
/// presentation layer can pick tone and wording without inspecting message
/// strings.
///
/// ## Notes
/// * `non_exhaustive` - more kinds may be added as provider surfaces grow
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::from_status(429);
/// assert_eq!(kind, ErrorKind::RateLimited);
/// assert_eq!(kind.as_str(), "Rate Limited");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Input failed local or provider-side validation
    Validation,
    /// Credentials or session were rejected
    Unauthorized,
    /// The account exists but may not perform the operation
    Forbidden,
    /// The referenced resource does not exist
    NotFound,
    /// The request conflicts with existing state (e.g. email already taken)
    Conflict,
    /// A precondition is unmet (e.g. email not confirmed yet)
    Precondition,
    /// Too many attempts inside the current window
    RateLimited,
    /// The operation gave up waiting
    Timeout,
    /// The provider is unreachable or failing
    Unavailable,
    /// Anything we cannot classify further
    Internal,
}

impl ErrorKind {
    /// Classify a provider HTTP status code.
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::from_status(401), ErrorKind::Unauthorized);
    /// assert_eq!(ErrorKind::from_status(503), ErrorKind::Unavailable);
    /// ```
    #[inline]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ErrorKind::Validation,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 | 410 => ErrorKind::NotFound,
            408 => ErrorKind::Timeout,
            409 => ErrorKind::Conflict,
            412 | 428 => ErrorKind::Precondition,
            429 => ErrorKind::RateLimited,
            500..=599 => ErrorKind::Unavailable,
            _ => ErrorKind::Internal,
        }
    }

    /// User-facing label for this kind.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation Failed",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Precondition => "Precondition Required",
            ErrorKind::RateLimited => "Rate Limited",
            ErrorKind::Timeout => "Timed Out",
            ErrorKind::Unavailable => "Service Unavailable",
            ErrorKind::Internal => "Internal Error",
        }
    }

    /// Whether retrying the same call may succeed without user action.
    ///
    /// Used by the HTTP adapter to decide if an idempotent call is worth
    /// another attempt.
    #[inline]
    pub const fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::Timeout | ErrorKind::Unavailable)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(409), ErrorKind::Conflict);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(429), ErrorKind::RateLimited);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Unavailable);
        assert_eq!(ErrorKind::from_status(502), ErrorKind::Unavailable);
        assert_eq!(ErrorKind::from_status(200), ErrorKind::Internal);
    }

    #[test]
    fn test_is_transient() {
        assert!(ErrorKind::Timeout.is_transient());
        assert!(ErrorKind::Unavailable.is_transient());
        assert!(!ErrorKind::Unauthorized.is_transient());
        assert!(!ErrorKind::RateLimited.is_transient());
    }
}
