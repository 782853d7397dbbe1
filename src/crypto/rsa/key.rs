//! RSA key derivation
//!
//! Derives a keypair from two caller-supplied primes and a public exponent.
//! The primes are not tested for primality.

use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use tracing::debug;

use crate::crypto::modular::{gcd, mod_inverse};
use crate::error::RsaError;

/// Derived RSA key material: `n = p*q`, `phi = (p-1)(q-1)`, `e*d = 1 (mod phi)`
#[derive(Clone, PartialEq, Eq)]
pub struct RsaKeyMaterial {
    p: BigUint,
    q: BigUint,
    modulus: BigUint,
    totient: BigUint,
    public_exponent: BigUint,
    private_exponent: BigUint,
}

impl RsaKeyMaterial {
    /// Derive the keypair.
    ///
    /// Fails with [`RsaError::NoModularInverse`] when `gcd(e, phi) != 1`; the
    /// caller picks another `e` and derives again.
    pub fn derive(p: BigUint, q: BigUint, e: BigUint) -> Result<Self, RsaError> {
        let two = BigUint::from(2u32);
        if p < two || q < two {
            return Err(RsaError::DegenerateInput(format!(
                "primes must be at least 2, got p={p}, q={q}"
            )));
        }

        let modulus = &p * &q;
        let totient = (&p - 1u32) * (&q - 1u32);

        let e_int = BigInt::from_biguint(Sign::Plus, e.clone());
        let phi_int = BigInt::from_biguint(Sign::Plus, totient.clone());

        let divisor = gcd(e_int.clone(), phi_int.clone());
        if !divisor.is_one() {
            return Err(RsaError::NoModularInverse {
                e,
                phi: totient,
                gcd: divisor.magnitude().clone(),
            });
        }

        let private_exponent = mod_inverse(e_int, phi_int)
            .and_then(|d| d.to_biguint())
            .unwrap_or_else(BigUint::zero);

        debug!(
            n = %modulus,
            phi = %totient,
            e = %e,
            "Derived RSA key material"
        );

        Ok(Self {
            p,
            q,
            modulus,
            totient,
            public_exponent: e,
            private_exponent,
        })
    }

    /// Convenience wrapper over [`RsaKeyMaterial::derive`] for small values
    pub fn from_u64(p: u64, q: u64, e: u64) -> Result<Self, RsaError> {
        Self::derive(BigUint::from(p), BigUint::from(q), BigUint::from(e))
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// RSA modulus (N)
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Euler totient of the modulus, `(p-1)(q-1)`
    pub fn totient(&self) -> &BigUint {
        &self.totient
    }

    /// Public exponent (E)
    pub fn public_exponent(&self) -> &BigUint {
        &self.public_exponent
    }

    /// Private exponent (D), in `[0, phi)`
    pub fn private_exponent(&self) -> &BigUint {
        &self.private_exponent
    }

    /// Get the key size in bits
    pub fn key_size_bits(&self) -> usize {
        self.modulus.bits() as usize
    }
}

impl fmt::Debug for RsaKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyMaterial")
            .field("key_size_bits", &self.key_size_bits())
            .field("modulus", &self.modulus)
            .field("public_exponent", &self.public_exponent)
            // Don't log the private key!
            .finish()
    }
}
