//! Bearer-token guard.
//!
//! Every route of the gateway is protected by one static shared secret. The
//! inbound `Authorization` header is split at its first space into
//! `<scheme> <token>`; the request is allowed only when the scheme is `Bearer`
//! (any case) and the token equals the secret exactly.
//!
//! There is no per-token identity, expiry, or rate limiting.

use tracing::debug;

use crate::error::AuthError;

/// Static shared-secret guard.
#[derive(Clone)]
pub struct BearerAuth {
    /// The only accepted token
    token: String,
}

impl BearerAuth {
    /// Create a guard accepting exactly `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Check an `Authorization` header value.
    ///
    /// # Errors
    ///
    /// - `AuthError::MissingHeader` if no header was sent
    /// - `AuthError::InvalidScheme` if the scheme is not `Bearer`
    /// - `AuthError::InvalidToken` if the token does not match
    pub fn verify(&self, header: Option<&str>) -> Result<(), AuthError> {
        let header = header.ok_or(AuthError::MissingHeader)?;
        let (scheme, token) = split_authorization(header);

        if !scheme.eq_ignore_ascii_case("bearer") {
            debug!(scheme, "Rejecting non-bearer authorization scheme");
            return Err(AuthError::InvalidScheme(scheme.to_string()));
        }

        if token != self.token {
            debug!("Rejecting mismatched bearer token");
            return Err(AuthError::InvalidToken);
        }

        Ok(())
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Split a header value at its first space.
///
/// A header without a space is all scheme and an empty token.
fn split_authorization(header: &str) -> (&str, &str) {
    header.split_once(' ').unwrap_or((header, ""))
}
