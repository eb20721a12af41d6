use core::fmt;
use std::time::SystemTimeError;

/// Error type
#[derive(Debug)]
pub enum Error {
    /// Secret contains a character outside the base32 alphabet, or decodes
    /// to an empty byte sequence
    InvalidSecretFormat,
    /// A caller-supplied parameter violates the documented contract
    InvalidParameter(&'static str),
    /// System time is set to before the Unix epoch
    SystemTime(SystemTimeError),
    /// The operating-system random number generator failed
    Rng(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SystemTime(e) => Some(e),
            Self::InvalidSecretFormat | Self::InvalidParameter(_) | Self::Rng(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSecretFormat => write!(
                f,
                "Invalid secret: expected base32 text (A-Z, 2-7, optional '=' padding) decoding to at least one byte"
            ),
            Self::InvalidParameter(reason) => write!(f, "Invalid parameter: {reason}"),
            Self::SystemTime(e) => write!(
                f,
                "System time error: {e}. The system time is set before the Unix epoch (1970-01-01 00:00:00 UTC)"
            ),
            Self::Rng(reason) => write!(f, "Random number generator failure: {reason}"),
        }
    }
}

impl From<SystemTimeError> for Error {
    fn from(e: SystemTimeError) -> Self {
        Self::SystemTime(e)
    }
}
