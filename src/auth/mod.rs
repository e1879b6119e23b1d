//! Request authentication for the MWS API SDK.
//!
//! MWS authenticates every call with Signature Version 2: the request's
//! parameters, together with injected credential fields and a timestamp, are
//! serialized canonically and signed with HmacSHA256 using the secret key.
//!
//! # Overview
//!
//! - [`Credentials`]: The long-lived identity used for every signed request
//! - [`Clock`]: Source of the `Timestamp` parameter ([`SystemClock`], [`FixedClock`])
//! - [`Signer`]: Produces a [`SignedRequest`] from canonical parameters
//! - [`SigningError`]: Fatal, never-retried signing failures
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::{TimeZone, Utc};
//! use mws_api::auth::{Credentials, FixedClock, Signer};
//! use mws_api::clients::{canonicalize, HttpMethod, Parameters, RequestSpec, Resource};
//! use mws_api::{AwsAccessKeyId, SecretKey, SellerId};
//!
//! let credentials = Credentials::new(
//!     AwsAccessKeyId::new("AKIAEXAMPLE").unwrap(),
//!     SecretKey::new("secret").unwrap(),
//!     SellerId::new("A1SELLER").unwrap(),
//!     None,
//! );
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2020, 5, 6, 9, 22, 23).unwrap());
//! let signer = Signer::new(credentials, Arc::new(clock));
//!
//! let spec = RequestSpec::new(Resource::Sellers, "2011-07-01", "ListMarketplaceParticipations");
//! let canonical = canonicalize(spec.parameters()).unwrap();
//! let signed = signer
//!     .sign(HttpMethod::Post, "mws.amazonservices.com", &spec, canonical)
//!     .unwrap();
//!
//! assert_eq!(signed.parameters().get("Timestamp"), Some(&"2020-05-06T09:22:23.000Z".to_string()));
//! assert!(signed.parameters().contains_key("Signature"));
//! ```

mod clock;
mod credentials;
mod signature;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::Credentials;
pub use signature::{
    compute_signature_base64, percent_encode, SignedRequest, Signer, SigningError,
    SIGNATURE_METHOD, SIGNATURE_VERSION,
};
