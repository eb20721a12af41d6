//! `otpauth://` provisioning URL builder
//!
//! Serializes the parameters an authenticator app needs into the de-facto
//! `otpauth://totp/Issuer:Account?secret=...` convention understood by
//! Google Authenticator, Authy and friends.

use crate::Algorithm;

/// Parameters for a provisioning URL
///
/// `algorithm`, `digits` and `period` are optional; omitted fields simply do
/// not appear in the query string and the authenticator falls back to its
/// own defaults (SHA1, 6 digits, 30 seconds).
#[derive(Debug, Clone)]
pub struct AuthUrlParams {
    /// Account label shown in the authenticator, usually an e-mail address
    pub account_name: String,
    /// Service or company issuing the secret
    pub issuer: String,
    /// Base32-encoded shared secret
    pub secret: String,
    /// Hash algorithm, when it should be pinned explicitly
    pub algorithm: Option<Algorithm>,
    /// Code length, when it should be pinned explicitly
    pub digits: Option<u32>,
    /// Time step in seconds, when it should be pinned explicitly
    pub period: Option<u64>,
}

/// Build an `otpauth://totp/...` provisioning URL
///
/// The path carries `<issuer>:<account>` with both segments percent-encoded.
/// The query lists every supplied field in declaration order; values are
/// stringified, stripped of literal hyphens (authenticators expect `SHA1`,
/// not `SHA-1`), and percent-encoded. Field content is not validated beyond
/// that; empty strings pass through as empty segments.
#[must_use]
pub fn build_auth_url(params: &AuthUrlParams) -> String {
    let mut query = String::new();

    push_pair(&mut query, "accountName", &params.account_name);
    push_pair(&mut query, "issuer", &params.issuer);
    push_pair(&mut query, "secret", &params.secret);

    if let Some(algorithm) = params.algorithm {
        push_pair(&mut query, "algorithm", algorithm.as_str());
    }
    if let Some(digits) = params.digits {
        push_pair(&mut query, "digits", &digits.to_string());
    }
    if let Some(period) = params.period {
        push_pair(&mut query, "period", &period.to_string());
    }

    format!(
        "otpauth://totp/{}:{}?{}",
        urlencoding::encode(&params.issuer),
        urlencoding::encode(&params.account_name),
        query
    )
}

fn push_pair(query: &mut String, key: &str, value: &str) {
    if !query.is_empty() {
        query.push('&');
    }
    let stripped = value.replace('-', "");
    query.push_str(key);
    query.push('=');
    query.push_str(&urlencoding::encode(&stripped));
}
