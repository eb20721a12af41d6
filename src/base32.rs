//! RFC 4648 base32 codec for shared secrets
//!
//! Authenticator secrets arrive in many shapes: upper or lower case, with or
//! without `=` padding. Decoding is therefore deliberately lenient: case is
//! ignored, trailing padding is stripped, and leftover bits that do not fill
//! a whole byte are discarded. Encoding always produces the canonical padded
//! uppercase form.

use crate::error::Error;

/// RFC 4648 base32 alphabet (`A-Z` then `2-7`)
const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Decode base32 text into raw bytes
///
/// Trailing `=` padding is ignored and input case does not matter. Each
/// remaining character contributes 5 bits; complete groups of 8 bits become
/// output bytes and any trailing partial byte is dropped.
///
/// # Errors
///
/// Returns [`Error::InvalidSecretFormat`] when the input contains a character
/// outside the base32 alphabet.
pub fn decode(secret: &str) -> Result<Vec<u8>, Error> {
    let trimmed = secret.trim_end_matches('=');

    let mut out = Vec::with_capacity(trimmed.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in trimmed.as_bytes() {
        let value = match byte.to_ascii_uppercase() {
            b @ b'A'..=b'Z' => b - b'A',
            b @ b'2'..=b'7' => b - b'2' + 26,
            _ => return Err(Error::InvalidSecretFormat),
        };

        buffer = (buffer << 5) | u32::from(value);
        bits += 5;

        if bits >= 8 {
            bits -= 8;
            out.push(((buffer >> bits) & 0xFF) as u8);
        }
    }

    Ok(out)
}

/// Encode raw bytes as canonical padded base32 text
///
/// The bit stream is regrouped into 5-bit chunks, the final chunk is
/// right-padded with zero bits, and `=` characters bring the total length up
/// to a multiple of 8 per the standard padding rule.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(5) * 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;

        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buffer >> bits) & 0x1F) as usize] as char);
        }
    }

    if bits > 0 {
        out.push(ALPHABET[((buffer << (5 - bits)) & 0x1F) as usize] as char);
    }

    while out.len() % 8 != 0 {
        out.push('=');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_encoding::BASE32;

    #[test]
    fn encode_rfc4648_vectors() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "MY======");
        assert_eq!(encode(b"fo"), "MZXQ====");
        assert_eq!(encode(b"foo"), "MZXW6===");
        assert_eq!(encode(b"foob"), "MZXW6YQ=");
        assert_eq!(encode(b"fooba"), "MZXW6YTB");
        assert_eq!(encode(b"foobar"), "MZXW6YTBOI======");
    }

    #[test]
    fn decode_rfc4648_vectors() {
        assert_eq!(decode("MZXW6YTBOI======").unwrap(), b"foobar");
        assert_eq!(decode("MZXW6YTB").unwrap(), b"fooba");
        assert_eq!(decode("MY======").unwrap(), b"f");
    }

    #[test]
    fn decode_accepts_lowercase_and_missing_padding() {
        assert_eq!(decode("mzxw6ytboi").unwrap(), b"foobar");
        assert_eq!(decode("mzxw6===").unwrap(), b"foo");
        assert_eq!(decode("MY").unwrap(), b"f");
    }

    #[test]
    fn decode_rejects_characters_outside_alphabet() {
        // '1' is famously absent from the base32 alphabet
        assert!(matches!(decode("MZXW1"), Err(Error::InvalidSecretFormat)));
        assert!(matches!(decode("0000"), Err(Error::InvalidSecretFormat)));
        assert!(matches!(decode("MZ XW"), Err(Error::InvalidSecretFormat)));
        assert!(matches!(decode("MZXW!"), Err(Error::InvalidSecretFormat)));
    }

    #[test]
    fn decode_empty_input_yields_empty_bytes() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode("========").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn round_trip_law() {
        let samples: &[&[u8]] = &[
            b"",
            b"\x00",
            b"\xff\xff\xff",
            b"12345678901234567890",
            b"Hello!\xde\xad\xbe\xef",
        ];

        for &bytes in samples {
            let encoded = encode(bytes);
            assert_eq!(decode(&encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn canonical_re_encoding() {
        // Non-canonical input (lowercase, no padding) decodes to the same
        // bytes and re-encodes to the canonical form.
        let sloppy = "gezdgnbvgy3tqojq";
        let bytes = decode(sloppy).unwrap();
        let canonical = encode(&bytes);
        assert_eq!(canonical, "GEZDGNBVGY3TQOJQ");
        assert_eq!(decode(&canonical).unwrap(), bytes);
    }

    #[test]
    fn encode_matches_reference_implementation() {
        let samples: &[&[u8]] = &[b"", b"f", b"fo", b"foo", b"12345678901234567890"];
        for &bytes in samples {
            assert_eq!(encode(bytes), BASE32.encode(bytes));
        }
    }
}
