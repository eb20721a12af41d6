//! RFC 4226 & RFC 6238 compatible OTP (One-Time Password) implementation
//!
//! - **TOTP Support**: RFC 6238 Time-based One-Time Password with
//!   clock-skew tolerant validation
//! - **Multiple Hash Algorithms**: Supports SHA1, SHA256, SHA512
//! - **Flexible Digits**: 1-10 digit verification codes
//! - **Provisioning**: `otpauth://totp/...` URL generation for
//!   authenticator apps
//! - **Secret Generation**: base32 secrets drawn from the OS CSPRNG
//!
//! # Examples
//!
//! ```ignore
//! use otpkit::{generate_base32_secret, Totp, Algorithm, DEFAULT_SECRET_LENGTH};
//!
//! // Base32 string (for most scenarios)
//! let totp = Totp::new("JBSWY3DPEHPK3PXPJBSWY3DPEHPK3PXP").unwrap();
//! println!("{}", totp.generate().unwrap());
//! println!("{}s", totp.ttl().unwrap());
//!
//! // Custom config
//! let custom_totp = Totp::new("JBSWY3DPEHPK3PXPJBSWY3DPEHPK3PXP")
//!     .unwrap()
//!     .with_algorithm(Algorithm::Sha256)
//!     .with_digits(8)
//!     .with_period(60)
//!     .with_window(1);
//!
//! // Server side: accept the code the user typed, tolerating one step of
//! // clock drift in either direction.
//! let ok = custom_totp.validate("12345678").unwrap();
//!
//! // Enrolling a new user
//! let secret = generate_base32_secret(DEFAULT_SECRET_LENGTH).unwrap();
//! ```

pub mod base32;
mod error;
mod hotp;
mod otpauth;

pub use error::Error;
pub use hotp::{dynamic_truncation, hotp_code, MAX_DIGITS};
pub use otpauth::{build_auth_url, AuthUrlParams};

use core::fmt;
use core::str::FromStr;
use rand::rngs::OsRng;
use rand::TryRngCore;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default verification code length
pub const DEFAULT_DIGITS: u32 = 6;
/// Default time step in seconds
pub const DEFAULT_PERIOD: u64 = 30;
/// Default validation window (exact-interval matching only)
pub const DEFAULT_WINDOW: u64 = 0;
/// Default generated secret length in bytes (160 bits)
pub const DEFAULT_SECRET_LENGTH: usize = 20;

/// Hash algorithms supported by OTP
///
/// RFC 4226 requires HMAC-SHA-1, RFC 6238 extends support for HMAC-SHA-256
/// and HMAC-SHA-512
///
/// Use SHA1 by default to ensure maximum compatibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// HMAC-SHA-1 is the default algorithm for most OTP implementations
    #[default]
    Sha1,
    /// HMAC-SHA-256. Supported in theory according to [Datatracker](https://datatracker.ietf.org/doc/html/rfc6238#section-1.2)
    Sha256,
    /// HMAC-SHA-512
    Sha512,
}

impl Algorithm {
    /// Name used in provisioning URLs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Parses `"SHA1"`, `"SHA-256"` and similar spellings, ignoring case and
    /// hyphens. Unknown names are an error rather than a silent SHA1
    /// fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "").to_ascii_uppercase().as_str() {
            "SHA1" => Ok(Self::Sha1),
            "SHA256" => Ok(Self::Sha256),
            "SHA512" => Ok(Self::Sha512),
            _ => Err(Error::InvalidParameter(
                "algorithm must be one of SHA1, SHA256, SHA512",
            )),
        }
    }
}

/// Shared secret container
///
/// Securely store keys with support for automatic memory zeroing (when
/// `zeroize` feature is enabled)
#[cfg_attr(feature = "zeroize", derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop))]
pub struct SecretKey(Box<[u8]>);

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl SecretKey {
    /// Decodes a base32 encoded shared secret
    ///
    /// Case-insensitive, `=` padding optional.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSecretFormat`] if the input contains a
    /// character outside the base32 alphabet or decodes to zero bytes.
    pub fn from_base32<S: AsRef<str>>(secret: S) -> Result<Self, Error> {
        let decoded = base32::decode(secret.as_ref())?;

        if decoded.is_empty() {
            return Err(Error::InvalidSecretFormat);
        }

        Ok(Self(decoded.into_boxed_slice()))
    }

    /// Byte array key
    ///
    /// Suitable for decoded raw key data or external system integration.
    /// No validation is performed; the caller must ensure key security.
    pub fn from_bytes<S: AsRef<[u8]>>(secret: S) -> Self {
        Self(secret.as_ref().to_vec().into_boxed_slice())
    }

    /// Reference to the shared secret byte array
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the number of elements in the slice (In bytes)
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the length of 0
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// RFC 6238: Time-Based One-Time Password implementation
/// TOTP = HOTP(K, T) where T = (Current Unix time - T0) / X
#[derive(Debug)]
pub struct Totp {
    /// Decoded shared secret
    secret: SecretKey,
    /// Hash algorithm
    algorithm: Algorithm,
    /// The number of digits composing the auth code. [Datatracker](https://datatracker.ietf.org/doc/html/rfc4226#section-5.3)
    digits: u32,
    // RFC 6238: X represents the time step in seconds (default value X = 30 seconds)
    period: u64,
    /// Accepted clock skew, in time steps on either side of now
    window: u64,
}

impl Totp {
    /// Create TOTP instance with default config
    ///
    /// Default config: SHA1 algorithm, 6 digits, 30-second time step, no
    /// skew window
    ///
    /// # Parameter
    ///
    /// * `secret` - Base32 encoded shared secret
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSecretFormat`] if the input contains invalid
    /// base32 characters or decodes to zero bytes.
    pub fn new<S: AsRef<str>>(secret: S) -> Result<Self, Error> {
        Ok(Self::from_secret(SecretKey::from_base32(secret)?))
    }

    /// Create TOTP instance directly from bytes
    ///
    /// # Parameter
    ///
    /// * `secret` - Decoded secret key byte array
    ///
    /// # Use cases
    ///
    /// - Keys imported from a verified external source
    /// - Allow keys in formats other than base32 for compatibility
    #[must_use]
    pub fn new_from_bytes<S: AsRef<[u8]>>(secret: S) -> Self {
        Self::from_secret(SecretKey::from_bytes(secret))
    }

    fn from_secret(secret: SecretKey) -> Self {
        Self {
            secret,
            algorithm: Algorithm::default(),
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            window: DEFAULT_WINDOW,
        }
    }

    /// Configure hash algorithm
    #[must_use]
    pub const fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Configure the number of verification code digits
    ///
    /// Valid range is 1 to 10; values outside it surface as
    /// [`Error::InvalidParameter`] when a code is generated or validated.
    #[must_use]
    pub const fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    /// Configure time step
    ///
    /// Must be positive; a zero period surfaces as
    /// [`Error::InvalidParameter`] when a code is generated or validated.
    #[must_use]
    pub const fn with_period(mut self, period: u64) -> Self {
        self.period = period;
        self
    }

    /// Configure the validation window
    ///
    /// `validate` accepts codes within `window` time steps on either side
    /// of now, checking `2 * window + 1` counters in total. Zero means
    /// exact-interval matching only.
    #[must_use]
    pub const fn with_window(mut self, window: u64) -> Self {
        self.window = window;
        self
    }

    /// Generate the verification code for the current time
    ///
    /// # Errors
    ///
    /// Returns an error when system time retrieval fails or the configured
    /// digits/period are out of range.
    pub fn generate(&self) -> Result<String, Error> {
        self.generate_at(system_time()?)
    }

    /// Generate the verification code for a specific Unix timestamp
    ///
    /// Same computation as [`Totp::generate`] with the clock pinned, which
    /// keeps the whole chain deterministic for testing.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured digits/period are out of range.
    pub fn generate_at(&self, timestamp: u64) -> Result<String, Error> {
        let counter = self.counter_at(timestamp)?;
        self.generate_hotp(counter)
    }

    /// Generate the verification code for an explicit counter value
    ///
    /// This is the raw RFC 4226 engine underneath the time-based interface.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured digits are out of range.
    pub fn generate_hotp(&self, counter: u64) -> Result<String, Error> {
        hotp_code(self.secret.as_bytes(), self.algorithm, self.digits, counter)
    }

    /// Validate a candidate code against the current time
    ///
    /// Checks every counter within the configured window, from `-window` to
    /// `+window`. A mismatch is a normal `Ok(false)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns an error when system time retrieval fails or the configured
    /// digits/period are out of range.
    pub fn validate(&self, candidate: &str) -> Result<bool, Error> {
        self.validate_at(candidate, system_time()?)
    }

    /// Validate a candidate code against a specific Unix timestamp
    ///
    /// # Errors
    ///
    /// Returns an error when the configured digits/period are out of range.
    pub fn validate_at(&self, candidate: &str, timestamp: u64) -> Result<bool, Error> {
        let base = self.counter_at(timestamp)?;

        if candidate.len() != self.digits as usize {
            return Ok(false);
        }

        for offset in -(self.window as i64)..=(self.window as i64) {
            // Counters before the epoch do not exist; skip instead of wrapping.
            let Some(counter) = base.checked_add_signed(offset) else {
                continue;
            };

            let expected = self.generate_hotp(counter)?;
            if constant_time_eq(candidate.as_bytes(), expected.as_bytes()) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Get the remaining valid time (TTL) for the current verification code
    ///
    /// # Errors
    ///
    /// Returns an error when system time retrieval fails or the period is
    /// zero.
    pub fn ttl(&self) -> Result<u64, Error> {
        if self.period == 0 {
            return Err(Error::InvalidParameter("period must be positive"));
        }
        let now = system_time()?;
        Ok(self.period - (now % self.period))
    }

    /// RFC 6238: T = (Current Unix time - T0) / X
    fn counter_at(&self, timestamp: u64) -> Result<u64, Error> {
        if self.period == 0 {
            return Err(Error::InvalidParameter("period must be positive"));
        }
        Ok(timestamp / self.period)
    }
}

/// Generate a random base32 secret of `length` bytes
///
/// Bytes come straight from the operating system CSPRNG and are then base32
/// encoded, so no value ever maps unevenly onto the 32-symbol alphabet.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] when `length` is zero, or
/// [`Error::Rng`] when the OS random source fails.
pub fn generate_base32_secret(length: usize) -> Result<String, Error> {
    if length == 0 {
        return Err(Error::InvalidParameter("secret length must be positive"));
    }

    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::Rng(e.to_string()))?;

    Ok(base32::encode(&bytes))
}

/// Constant time byte comparison, so validation timing leaks nothing about
/// how many leading digits matched
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Get the current system time as Unix timestamp
///
/// # Errors
///
/// Returns an error when system time is earlier than Unix epoch
/// (1970-01-01 00:00:00 UTC).
#[inline]
fn system_time() -> Result<u64, Error> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(Error::SystemTime)
}
