//! Error types for the MWS API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and credential validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use mws_api::{AwsAccessKeyId, ConfigError};
//!
//! let result = AwsAccessKeyId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessKeyId)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// AWS access key id cannot be empty.
    #[error("AWS access key id cannot be empty. Please provide a valid MWS access key id.")]
    EmptyAccessKeyId,

    /// Secret key cannot be empty.
    #[error("Secret key cannot be empty. Please provide a valid MWS secret key.")]
    EmptySecretKey,

    /// Seller id cannot be empty.
    #[error("Seller id cannot be empty. Please provide the merchant identifier of the account.")]
    EmptySellerId,

    /// A credential contains characters that cannot be sent on the wire.
    #[error("Invalid {field}: credentials may not contain whitespace or control characters.")]
    InvalidCredential {
        /// The name of the offending credential.
        field: &'static str,
    },

    /// Marketplace lookup failed.
    #[error("Unknown marketplace '{marketplace}'. Expected a two-letter country code or an MWS marketplace id.")]
    UnknownMarketplace {
        /// The identifier that was looked up.
        marketplace: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://mws.amazonservices.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Retry policy is invalid.
    #[error("Invalid retry policy: {reason}")]
    InvalidRetryPolicy {
        /// The reason the policy was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_access_key_error_message() {
        let error = ConfigError::EmptyAccessKeyId;
        let message = error.to_string();
        assert!(message.contains("access key id cannot be empty"));
    }

    #[test]
    fn test_invalid_credential_names_field() {
        let error = ConfigError::InvalidCredential { field: "seller_id" };
        assert!(error.to_string().contains("seller_id"));
    }

    #[test]
    fn test_unknown_marketplace_error_message() {
        let error = ConfigError::UnknownMarketplace {
            marketplace: "XX".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("XX"));
        assert!(message.contains("country code"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "secret_key",
        };
        let message = error.to_string();
        assert!(message.contains("secret_key"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptySecretKey;
        let _: &dyn std::error::Error = &error;
    }
}
