//! Password Policy and Breach Checking
//!
//! NIST SP 800-63B compliant password handling for the client side:
//! - Policy validation (length, control characters, NFKC normalization)
//! - Zeroization of sensitive data
//! - Optional HIBP (Have I Been Pwned) breach checking
//!
//! Credential verification and hashing are the hosted identity provider's
//! job; the client only vets what it is about to send.

use std::fmt;

use sha1::{Digest, Sha1};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants (NIST SP 800-63B compliant)
// ============================================================================

/// Minimum password length (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (NIST: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// HIBP API endpoint (k-Anonymity model)
const HIBP_API_URL: &str = "https://api.pwnedpasswords.com/range/";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password has been compromised in a data breach
    #[error("This password has been compromised in a data breach")]
    Compromised,

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Breach-check transport errors (non-fatal, logged by callers)
#[derive(Debug, Error)]
pub enum BreachCheckError {
    #[error("Breach check request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Breach check returned unexpected status {0}")]
    UnexpectedStatus(u16),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// This type ensures that password data is securely erased from memory
/// when the value is dropped, preventing memory inspection attacks.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// Validates against NIST SP 800-63B requirements:
    /// - Minimum 8 characters
    /// - Maximum 128 characters
    /// - No control characters
    /// - Not empty/whitespace only
    ///
    /// Unicode is normalized using NFKC before validation.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        // NIST: Unicode NFKC normalization before processing
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // NIST: count Unicode code points, not bytes
        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized.chars().any(char::is_control) {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Create without validation (tests and provider echoes only)
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    /// Expose the normalized password for submission to the provider
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this password appears in known breaches.
    ///
    /// Uses the HIBP k-anonymity API: only the first five hex characters of
    /// the SHA-1 hash leave the process. Transport failures are returned for
    /// the caller to log and ignore; unreachability never blocks a flow.
    pub async fn check_breach(&self, client: &reqwest::Client) -> Result<bool, BreachCheckError> {
        let (prefix, suffix) = hash_prefix_parts(&self.0);
        let url = format!("{HIBP_API_URL}{prefix}");

        let response = client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BreachCheckError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(suffix_in_range(&body, &suffix))
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword(***)")
    }
}

/// Split the SHA-1 hex digest into the 5-char range prefix and the suffix
/// compared against the API response.
fn hash_prefix_parts(password: &str) -> (String, String) {
    let digest = Sha1::digest(password.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02X}")).collect();
    (hex[..5].to_string(), hex[5..].to_string())
}

/// The range API returns `SUFFIX:COUNT` lines for the requested prefix.
fn suffix_in_range(body: &str, suffix: &str) -> bool {
    body.lines().any(|line| {
        line.split(':')
            .next()
            .is_some_and(|candidate| candidate.trim().eq_ignore_ascii_case(suffix))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_length_bounds() {
        assert!(matches!(
            ClearTextPassword::new("short".to_string()),
            Err(PasswordPolicyError::TooShort { actual: 5, .. })
        ));
        assert!(matches!(
            ClearTextPassword::new("x".repeat(129)),
            Err(PasswordPolicyError::TooLong { actual: 129, .. })
        ));
        assert!(ClearTextPassword::new("long enough password".to_string()).is_ok());
    }

    #[test]
    fn test_policy_rejects_whitespace_and_control() {
        assert!(matches!(
            ClearTextPassword::new("        ".to_string()),
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
        assert!(matches!(
            ClearTextPassword::new("pass\u{0000}word!".to_string()),
            Err(PasswordPolicyError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_nfkc_normalization_applied() {
        // Fullwidth letters normalize to ASCII under NFKC.
        let password = ClearTextPassword::new("ｐａｓｓｗｏｒｄ１".to_string()).unwrap();
        assert_eq!(password.as_str(), "password1");
    }

    #[test]
    fn test_hash_prefix_parts_known_value() {
        // SHA-1("password") = 5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8
        let (prefix, suffix) = hash_prefix_parts("password");
        assert_eq!(prefix, "5BAA6");
        assert_eq!(suffix, "1E4C9B93F3F0682250B6CF8331B7EE68FD8");
    }

    #[test]
    fn test_suffix_in_range_parsing() {
        let body = "0018A45C4D1DEF81644B54AB7F969B88D65:1\r\n\
                    1E4C9B93F3F0682250B6CF8331B7EE68FD8:9545824\r\n\
                    011053FD0102E94D6AE2F8B83D76FAF94F6:1";
        assert!(suffix_in_range(body, "1E4C9B93F3F0682250B6CF8331B7EE68FD8"));
        assert!(!suffix_in_range(body, "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = ClearTextPassword::new("super secret pw".to_string()).unwrap();
        assert_eq!(format!("{password:?}"), "ClearTextPassword(***)");
    }
}
