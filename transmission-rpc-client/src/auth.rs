//! HTTP Basic credentials

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::HeaderValue;
use std::fmt;
use transmission_rpc_core::{Error, Result};

/// Username and password sent with every request
///
/// `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The username
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// `Basic base64(username:password)`
    pub fn basic_auth(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", encoded)
    }

    /// The `Authorization` header value, marked sensitive
    pub(crate) fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.basic_auth())
            .map_err(|e| Error::InvalidConfig(format!("authorization header: {}", e)))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_encoding() {
        let credentials = Credentials::new("admin", "admin");
        // base64("admin:admin")
        assert_eq!(credentials.basic_auth(), "Basic YWRtaW46YWRtaW4=");
    }

    #[test]
    fn test_empty_credentials() {
        // base64(":")
        assert_eq!(Credentials::default().basic_auth(), "Basic Og==");
    }

    #[test]
    fn test_header_value_is_sensitive() {
        let value = Credentials::new("user", "secret").header_value().unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "Basic dXNlcjpzZWNyZXQ=");
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("admin", "hunter2"));
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_non_ascii_credentials_encode() {
        let credentials = Credentials::new("usér", "pässword");
        assert!(credentials.header_value().is_ok());
    }
}
