//! Cryptography module
//!
//! This module provides the transformation engine of the lab:
//! - classical substitution and transposition ciphers over A-Z
//! - a textbook RSA demonstration on arbitrary-precision integers
//! - the modular arithmetic both of them share

pub mod classical;
pub mod modular;
pub mod rsa;

// Re-export commonly used types
pub use classical::hill::HillKey;
pub use classical::playfair::KeySquare;
pub use rsa::{EncodedMessage, EncodingMode, RsaKeyMaterial, RsaSession};
