//! Cipherlab Library
//!
//! Classical substitution and transposition ciphers plus a textbook RSA
//! demonstration, built for the security lab practicals.
//!
//! ## Modules
//!
//! - `analysis` - Letter frequency analysis of substitution ciphertexts
//! - `cipher` - Named cipher selection and key dispatch
//! - `config` - Lab configuration management
//! - `crypto` - The cipher transforms and the RSA engine
//! - `error` - Error types and result definitions
//!
//! ## Example
//!
//! ```
//! use cipherlab::crypto::classical::running_key::vigenere;
//!
//! assert_eq!(vigenere("ATTACKATDAWN", "LEMON").unwrap(), "LXFOPVEFRNHR");
//! ```

pub mod analysis;
pub mod cipher;
pub mod config;
pub mod crypto;
pub mod error;

// Re-export commonly used types
pub use cipher::{CipherKind, Direction, Key};
pub use config::LabConfig;
pub use error::{CipherError, LabError, Result, RsaError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
