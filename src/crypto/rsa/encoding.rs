//! Plaintext encoding for the RSA demonstration
//!
//! A plaintext is turned into a single integer `m` by one of three modes,
//! chosen by a fixed precedence:
//! 1. all ASCII digits - the decimal number itself
//! 2. all ASCII lowercase letters - a base-26 numeral with `a = 0`
//! 3. anything else - the big-endian integer of the UTF-8 bytes

use std::fmt;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

/// How a plaintext was turned into an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingMode {
    /// Plaintext is a decimal number
    Integer,
    /// Plaintext is lowercase letters read as a base-26 numeral
    Base26,
    /// Plaintext bytes read as a big-endian integer
    Utf8Bytes,
}

impl EncodingMode {
    /// Select the mode for a plaintext
    pub fn detect(plaintext: &str) -> Self {
        if !plaintext.is_empty() && plaintext.bytes().all(|b| b.is_ascii_digit()) {
            EncodingMode::Integer
        } else if !plaintext.is_empty() && plaintext.bytes().all(|b| b.is_ascii_lowercase()) {
            EncodingMode::Base26
        } else {
            EncodingMode::Utf8Bytes
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingMode::Integer => "int",
            EncodingMode::Base26 => "base26",
            EncodingMode::Utf8Bytes => "utf8",
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plaintext encoded as an integer, tagged with the mode used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMessage {
    mode: EncodingMode,
    value: BigUint,
}

impl EncodedMessage {
    /// Encode a plaintext with the mode selected by [`EncodingMode::detect`]
    pub fn encode(plaintext: &str) -> Self {
        let mode = EncodingMode::detect(plaintext);
        let value = match mode {
            // Only ASCII digits reach this arm
            EncodingMode::Integer => {
                BigUint::parse_bytes(plaintext.as_bytes(), 10).unwrap_or_else(BigUint::zero)
            }
            EncodingMode::Base26 => base26_to_int(plaintext),
            EncodingMode::Utf8Bytes => BigUint::from_bytes_be(plaintext.as_bytes()),
        };
        Self { mode, value }
    }

    /// Wrap an integer that should be decoded with the given mode
    pub fn from_parts(mode: EncodingMode, value: BigUint) -> Self {
        Self { mode, value }
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// The integer `m`
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Decode back to text using this message's mode
    pub fn decode(&self) -> String {
        decode(self.mode, &self.value)
    }
}

/// Decode an integer back to text with the given mode
pub fn decode(mode: EncodingMode, value: &BigUint) -> String {
    match mode {
        EncodingMode::Integer => value.to_str_radix(10),
        EncodingMode::Base26 => int_to_base26(value),
        EncodingMode::Utf8Bytes => utf8_lossy_drop(&minimal_bytes_be(value)),
    }
}

fn base26_to_int(text: &str) -> BigUint {
    text.bytes().fold(BigUint::zero(), |acc, b| {
        acc * 26u32 + u32::from(b - b'a')
    })
}

fn int_to_base26(value: &BigUint) -> String {
    if value.is_zero() {
        return "a".to_string();
    }

    let mut digits = Vec::new();
    let mut n = value.clone();
    let radix = BigUint::from(26u32);
    while !n.is_zero() {
        let remainder = (&n % &radix).to_u8().unwrap_or(0);
        digits.push((b'a' + remainder) as char);
        n /= &radix;
    }
    digits.iter().rev().collect()
}

/// Big-endian bytes without leading zeros; zero encodes as no bytes at all
fn minimal_bytes_be(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// Decode UTF-8, silently dropping invalid sequences
fn utf8_lossy_drop(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mode_precedence() {
        assert_eq!(EncodingMode::detect("65"), EncodingMode::Integer);
        assert_eq!(EncodingMode::detect("hello"), EncodingMode::Base26);
        assert_eq!(EncodingMode::detect("Hello"), EncodingMode::Utf8Bytes);
        assert_eq!(EncodingMode::detect("hi there"), EncodingMode::Utf8Bytes);
        assert_eq!(EncodingMode::detect("12ab"), EncodingMode::Utf8Bytes);
        assert_eq!(EncodingMode::detect(""), EncodingMode::Utf8Bytes);
        assert_eq!(EncodingMode::detect("é"), EncodingMode::Utf8Bytes);
    }

    #[test]
    fn test_integer_mode() {
        let message = EncodedMessage::encode("007");
        assert_eq!(message.value(), &BigUint::from(7u32));
        assert_eq!(message.decode(), "7");
    }

    #[test]
    fn test_base26_mode() {
        // b=1, a=0 -> 1*26 + 0
        let message = EncodedMessage::encode("ba");
        assert_eq!(message.mode(), EncodingMode::Base26);
        assert_eq!(message.value(), &BigUint::from(26u32));
        assert_eq!(message.decode(), "ba");

        assert_eq!(decode(EncodingMode::Base26, &BigUint::zero()), "a");
        assert_eq!(decode(EncodingMode::Base26, &BigUint::from(25u32)), "z");
    }

    #[test]
    fn test_base26_leading_a_is_lost() {
        // 'a' is the zero digit, like a leading zero in decimal
        let message = EncodedMessage::encode("aab");
        assert_eq!(message.value(), &BigUint::from(1u32));
        assert_eq!(message.decode(), "b");
    }

    #[test]
    fn test_utf8_mode() {
        let message = EncodedMessage::encode("Hi");
        assert_eq!(message.value(), &BigUint::from(0x4869u32));
        assert_eq!(message.decode(), "Hi");

        let message = EncodedMessage::encode("héllo wörld");
        assert_eq!(message.decode(), "héllo wörld");
    }

    #[test]
    fn test_utf8_empty_and_invalid() {
        let message = EncodedMessage::encode("");
        assert!(message.value().is_zero());
        assert_eq!(message.decode(), "");

        // 0x41 0xFF 0x42: the stray byte is dropped
        let value = BigUint::from(0x41FF42u32);
        assert_eq!(decode(EncodingMode::Utf8Bytes, &value), "AB");
    }
}
