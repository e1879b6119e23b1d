//! Long-lived MWS credentials.

use crate::config::{AwsAccessKeyId, MwsAuthToken, MwsConfig, SecretKey, SellerId};

/// The identity every request is signed with.
///
/// Built once at client construction and reused for every call. The secret
/// key and auth token keep their masked `Debug` output.
#[derive(Clone, Debug)]
pub struct Credentials {
    aws_access_key_id: AwsAccessKeyId,
    secret_key: SecretKey,
    seller_id: SellerId,
    mws_auth_token: Option<MwsAuthToken>,
}

impl Credentials {
    /// Creates credentials from validated parts.
    #[must_use]
    pub const fn new(
        aws_access_key_id: AwsAccessKeyId,
        secret_key: SecretKey,
        seller_id: SellerId,
        mws_auth_token: Option<MwsAuthToken>,
    ) -> Self {
        Self {
            aws_access_key_id,
            secret_key,
            seller_id,
            mws_auth_token,
        }
    }

    /// Copies the credentials out of a configuration.
    #[must_use]
    pub fn from_config(config: &MwsConfig) -> Self {
        Self::new(
            config.aws_access_key_id().clone(),
            config.secret_key().clone(),
            config.seller_id().clone(),
            config.mws_auth_token().cloned(),
        )
    }

    /// Returns the access key id.
    #[must_use]
    pub const fn aws_access_key_id(&self) -> &AwsAccessKeyId {
        &self.aws_access_key_id
    }

    /// Returns the secret key.
    #[must_use]
    pub const fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Returns the seller id.
    #[must_use]
    pub const fn seller_id(&self) -> &SellerId {
        &self.seller_id
    }

    /// Returns the delegated auth token, if any.
    #[must_use]
    pub const fn mws_auth_token(&self) -> Option<&MwsAuthToken> {
        self.mws_auth_token.as_ref()
    }
}
