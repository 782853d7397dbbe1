//! Error handling module
//!
//! Defines the error types for the cipher lab. Every failure is reported as a
//! value; none of them is fatal and the caller decides whether to retry with
//! new key material.

use std::io;

use num_bigint::BigUint;
use thiserror::Error;

/// Main error type for the cipher lab
#[derive(Error, Debug)]
pub enum LabError {
    /// Classical cipher errors
    #[error("Cipher error: {0}")]
    Cipher(#[from] CipherError),

    /// RSA errors
    #[error("RSA error: {0}")]
    Rsa(#[from] RsaError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Classical cipher errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("Invalid key {key}: must be coprime to 26 (e.g. 3, 5, 7, 11...)")]
    InvalidKey { key: i64 },

    #[error("Hill key matrix is not invertible mod 26 (determinant {determinant})")]
    NonInvertibleMatrix { determinant: i64 },

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Non-alphabetic character {0:?}")]
    NonAlphabetic(char),

    #[error("{cipher} expects a {expected} key")]
    KeyShapeMismatch {
        cipher: &'static str,
        expected: &'static str,
    },
}

/// RSA errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RsaError {
    #[error("No modular inverse: gcd(e={e}, phi={phi}) = {gcd}, pick a different e")]
    NoModularInverse {
        e: BigUint,
        phi: BigUint,
        gcd: BigUint,
    },

    #[error("Encoded message integer m={m} must be smaller than n={n}")]
    MessageTooLarge { m: BigUint, n: BigUint },

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Invalid decimal number: {0:?}")]
    InvalidNumber(String),
}

/// Result type alias for cipher lab operations
pub type Result<T> = std::result::Result<T, LabError>;
