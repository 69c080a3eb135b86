//! Property-based tests for error module.
//!
//! These tests check that error messages carry enough context to debug a
//! failed provider call from the logs alone.

use proptest::prelude::*;

use crate::error::{AuthError, ConfigError, Error};

/// Generate HTTP status codes (100-599)
fn http_status_strategy() -> impl Strategy<Value = u16> {
    100u16..600u16
}

/// Generate Workers AI style endpoint URLs
fn endpoint_strategy() -> impl Strategy<Value = String> {
    ("[a-f0-9]{32}", "@cf/[a-z]+/[a-z0-9-]{3,20}").prop_map(|(account, model)| {
        format!(
            "https://api.cloudflare.com/client/v4/accounts/{}/ai/run/{}",
            account, model
        )
    })
}

/// Generate error messages
fn message_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ]{1,100}"
}

/// Generate environment variable names
fn env_var_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{2,30}"
}

proptest! {
    /// *For any* API error, the message includes the endpoint that failed,
    /// the HTTP status code and the provider's message.
    #[test]
    fn api_error_includes_endpoint_and_status(
        endpoint in endpoint_strategy(),
        status_code in http_status_strategy(),
        message in message_strategy()
    ) {
        let err = Error::api(&endpoint, status_code, &message);
        let err_string = err.to_string();

        prop_assert!(
            err_string.contains(&endpoint),
            "API error should include endpoint '{}' in message: {}",
            endpoint,
            err_string
        );

        prop_assert!(
            err_string.contains(&status_code.to_string()),
            "API error should include status code '{}' in message: {}",
            status_code,
            err_string
        );

        prop_assert!(err_string.contains(&message));
    }

    /// *For any* missing variable, the config error names it, including
    /// after conversion into the unified error.
    #[test]
    fn config_error_names_variable(name in env_var_strategy()) {
        let err: Error = ConfigError::missing_env_var(&name).into();
        let err_string = err.to_string();
        prop_assert!(
            err_string.contains(&name),
            "Config error should include '{}' in message: {}",
            name,
            err_string
        );
    }

    /// *For any* rejected scheme, the auth error message names the scheme.
    #[test]
    fn auth_error_names_rejected_scheme(scheme in "[A-Za-z]{1,12}") {
        let err = AuthError::InvalidScheme(scheme.clone());
        prop_assert!(err.to_string().contains(&scheme));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn api_error_format_is_readable() {
        let err = Error::api(
            "https://api.cloudflare.com/client/v4/accounts/abc/ai/run/@cf/deepgram/aura-1",
            503,
            "Service temporarily unavailable"
        );
        let msg = err.to_string();

        assert!(msg.contains("API error"), "Should indicate it's an API error");
        assert!(msg.contains("HTTP"), "Should mention HTTP");
        assert!(msg.contains("503"), "Should include status code");
        assert!(msg.contains("api.cloudflare.com"), "Should include endpoint");
    }

    #[test]
    fn all_auth_errors_have_distinct_display() {
        let errors = [
            AuthError::MissingHeader,
            AuthError::InvalidScheme("Basic".to_string()),
            AuthError::InvalidToken,
        ];

        let displays: Vec<String> = errors.iter().map(|e| e.to_string()).collect();

        for (i, d1) in displays.iter().enumerate() {
            for (j, d2) in displays.iter().enumerate() {
                if i != j {
                    assert_ne!(d1, d2, "Auth errors should have distinct display strings");
                }
            }
        }
    }

    #[test]
    fn error_conversion_preserves_context() {
        let config_err = ConfigError::invalid_value("TTS_TALK_COMMAND", "command cannot be empty");
        let unified_err: Error = config_err.into();
        let msg = unified_err.to_string();

        assert!(msg.contains("TTS_TALK_COMMAND"), "Should preserve variable name");
        assert!(msg.contains("command cannot be empty"), "Should preserve reason");
    }
}
