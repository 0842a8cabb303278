//! Client environment discovery
//!
//! Where the backend reads client identity off request headers, this side of
//! the boundary has to discover its own: the public IP comes from an echo
//! service, the platform label from the build target. Both feed device
//! registration and are strictly best-effort.

use std::net::IpAddr;

use thiserror::Error;

/// Public IP echo endpoint (plain-text body)
pub const IP_ECHO_URL: &str = "https://api.ipify.org";

/// Error when discovering client information
#[derive(Debug, Error)]
pub enum ClientInfoError {
    #[error("IP lookup request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IP echo returned an unparseable body: {0:?}")]
    InvalidAddress(String),
}

/// Discover the client's public IP address.
///
/// One-time at startup; callers treat failures as "IP unknown", never as a
/// blocking error.
pub async fn detect_public_ip(client: &reqwest::Client) -> Result<IpAddr, ClientInfoError> {
    detect_public_ip_from(client, IP_ECHO_URL).await
}

/// Same as [`detect_public_ip`] with an injectable endpoint.
pub async fn detect_public_ip_from(
    client: &reqwest::Client,
    url: &str,
) -> Result<IpAddr, ClientInfoError> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    parse_ip_body(&body)
}

/// Coarse platform label for device registration display.
pub fn platform_label() -> String {
    format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH)
}

fn parse_ip_body(body: &str) -> Result<IpAddr, ClientInfoError> {
    let trimmed = body.trim();
    trimmed.parse().map_err(|_| {
        ClientInfoError::InvalidAddress(trimmed.chars().take(64).collect())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ip_v4() {
        let ip = parse_ip_body("203.0.113.7\n").unwrap();
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_parse_ip_v6() {
        let ip = parse_ip_body("2001:db8::1").unwrap();
        assert_eq!(ip, "2001:db8::1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_parse_ip_garbage() {
        let result = parse_ip_body("<html>not an ip</html>");
        assert!(matches!(result, Err(ClientInfoError::InvalidAddress(_))));
    }

    #[test]
    fn test_platform_label_is_populated() {
        let label = platform_label();
        assert!(label.contains('/'));
    }
}
