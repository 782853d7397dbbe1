//! RSA demonstration module
//!
//! Textbook RSA in three stages:
//! 1. key derivation from two primes and a public exponent ([`RsaKeyMaterial`])
//! 2. plaintext encoding into an integer `m < n` ([`EncodedMessage`])
//! 3. modular exponentiation: `c = m^e mod n`, `m = c^d mod n`
//!
//! No padding, no CRT. Validation failures are returned as [`RsaError`] values
//! so the caller can retry with new parameters.

pub mod encoding;
pub mod key;

use num_bigint::BigUint;
use tracing::debug;

use crate::error::RsaError;

pub use encoding::{EncodedMessage, EncodingMode};
pub use key::RsaKeyMaterial;

/// Parse a non-negative decimal integer
pub fn parse_decimal(input: &str) -> Result<BigUint, RsaError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RsaError::InvalidNumber(input.to_string()));
    }
    BigUint::parse_bytes(trimmed.as_bytes(), 10)
        .ok_or_else(|| RsaError::InvalidNumber(input.to_string()))
}

/// Public-key half: encrypts integers smaller than the modulus
#[derive(Debug, Clone)]
pub struct RsaEncryptor {
    modulus: BigUint,
    public_exponent: BigUint,
}

impl RsaEncryptor {
    pub fn new(key: &RsaKeyMaterial) -> Self {
        Self {
            modulus: key.modulus().clone(),
            public_exponent: key.public_exponent().clone(),
        }
    }

    /// `c = m^e mod n`; fails with [`RsaError::MessageTooLarge`] when `m >= n`
    pub fn encrypt(&self, message: &BigUint) -> Result<BigUint, RsaError> {
        if message >= &self.modulus {
            return Err(RsaError::MessageTooLarge {
                m: message.clone(),
                n: self.modulus.clone(),
            });
        }
        Ok(message.modpow(&self.public_exponent, &self.modulus))
    }
}

/// Private-key half
#[derive(Clone)]
pub struct RsaDecryptor {
    modulus: BigUint,
    private_exponent: BigUint,
}

impl RsaDecryptor {
    pub fn new(key: &RsaKeyMaterial) -> Self {
        Self {
            modulus: key.modulus().clone(),
            private_exponent: key.private_exponent().clone(),
        }
    }

    /// `m = c^d mod n`
    pub fn decrypt(&self, ciphertext: &BigUint) -> BigUint {
        ciphertext.modpow(&self.private_exponent, &self.modulus)
    }
}

impl std::fmt::Debug for RsaDecryptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaDecryptor")
            .field("modulus", &self.modulus)
            .finish()
    }
}

/// Everything one encrypt/decrypt round trip produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    pub ciphertext: BigUint,
    pub recovered: BigUint,
    pub decoded: String,
}

/// Key material plus an encoded message that fits under the modulus
#[derive(Debug, Clone)]
pub struct RsaSession {
    key: RsaKeyMaterial,
    message: EncodedMessage,
}

impl RsaSession {
    /// Pair an already derived key with an encoded message, checking `m < n`
    pub fn new(key: RsaKeyMaterial, message: EncodedMessage) -> Result<Self, RsaError> {
        if message.value() >= key.modulus() {
            return Err(RsaError::MessageTooLarge {
                m: message.value().clone(),
                n: key.modulus().clone(),
            });
        }
        debug!(
            mode = %message.mode(),
            m = %message.value(),
            "Encoded RSA plaintext"
        );
        Ok(Self { key, message })
    }

    /// Derive the key from `p`, `q`, `e` and encode the plaintext.
    ///
    /// Each call is a fresh attempt: after a failure the caller supplies new
    /// parameters and calls again.
    pub fn establish(
        p: BigUint,
        q: BigUint,
        e: BigUint,
        plaintext: &str,
    ) -> Result<Self, RsaError> {
        let key = RsaKeyMaterial::derive(p, q, e)?;
        Self::new(key, EncodedMessage::encode(plaintext))
    }

    pub fn key(&self) -> &RsaKeyMaterial {
        &self.key
    }

    pub fn message(&self) -> &EncodedMessage {
        &self.message
    }

    /// `c = m^e mod n`
    pub fn encrypt(&self) -> BigUint {
        self.message
            .value()
            .modpow(self.key.public_exponent(), self.key.modulus())
    }

    /// `m = c^d mod n`
    pub fn decrypt(&self, ciphertext: &BigUint) -> BigUint {
        RsaDecryptor::new(&self.key).decrypt(ciphertext)
    }

    /// Encrypt, decrypt and decode with the session's encoding mode
    pub fn round_trip(&self) -> RoundTrip {
        let ciphertext = self.encrypt();
        let recovered = self.decrypt(&ciphertext);
        let decoded = encoding::decode(self.message.mode(), &recovered);
        debug!(c = %ciphertext, m = %recovered, "RSA round trip complete");
        RoundTrip {
            ciphertext,
            recovered,
            decoded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_key() -> RsaKeyMaterial {
        // p = 61, q = 53, n = 3233, phi = 3120, e = 17, d = 2753
        RsaKeyMaterial::from_u64(61, 53, 17).unwrap()
    }

    #[test]
    fn test_rsa_encrypt_decrypt() {
        let key = create_test_key();
        let encryptor = RsaEncryptor::new(&key);
        let decryptor = RsaDecryptor::new(&key);

        let m = BigUint::from(65u32);
        let c = encryptor.encrypt(&m).unwrap();
        assert_eq!(c, BigUint::from(2790u32));
        assert_eq!(decryptor.decrypt(&c), m);
    }

    #[test]
    fn test_encrypt_rejects_large_message() {
        let key = create_test_key();
        let encryptor = RsaEncryptor::new(&key);
        let result = encryptor.encrypt(&BigUint::from(3233u32));
        assert_eq!(
            result,
            Err(RsaError::MessageTooLarge {
                m: BigUint::from(3233u32),
                n: BigUint::from(3233u32),
            })
        );
    }

    #[test]
    fn test_every_message_round_trips() {
        let key = create_test_key();
        let encryptor = RsaEncryptor::new(&key);
        let decryptor = RsaDecryptor::new(&key);
        for m in 0u32..3233 {
            let m = BigUint::from(m);
            let c = encryptor.encrypt(&m).unwrap();
            assert_eq!(decryptor.decrypt(&c), m);
        }
    }

    #[test]
    fn test_session_integer_round_trip() {
        let session = RsaSession::establish(
            BigUint::from(61u32),
            BigUint::from(53u32),
            BigUint::from(17u32),
            "65",
        )
        .unwrap();
        assert_eq!(session.message().mode(), EncodingMode::Integer);

        let result = session.round_trip();
        assert_eq!(result.ciphertext, BigUint::from(2790u32));
        assert_eq!(result.recovered, BigUint::from(65u32));
        assert_eq!(result.decoded, "65");
    }

    #[test]
    fn test_session_message_too_large() {
        // "hello" in base 26 is far above 3233
        let err = RsaSession::new(create_test_key(), EncodedMessage::encode("hello")).unwrap_err();
        match err {
            RsaError::MessageTooLarge { m, n } => {
                assert_eq!(n, BigUint::from(3233u32));
                assert!(m > n);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_session_retry_with_larger_primes() {
        let first = RsaSession::establish(
            BigUint::from(61u32),
            BigUint::from(53u32),
            BigUint::from(17u32),
            "Hi!",
        );
        assert!(matches!(first, Err(RsaError::MessageTooLarge { .. })));

        let session = RsaSession::establish(
            BigUint::from(1_000_003u32),
            BigUint::from(999_983u32),
            BigUint::from(65_537u32),
            "Hi!",
        )
        .unwrap();
        assert_eq!(session.message().mode(), EncodingMode::Utf8Bytes);
        assert_eq!(session.round_trip().decoded, "Hi!");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(" 3233 ").unwrap(), BigUint::from(3233u32));
        assert!(matches!(parse_decimal("-5"), Err(RsaError::InvalidNumber(_))));
        assert!(matches!(parse_decimal(""), Err(RsaError::InvalidNumber(_))));
        assert!(matches!(parse_decimal("0x1f"), Err(RsaError::InvalidNumber(_))));
    }
}
