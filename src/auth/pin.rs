use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::errors::ServiceError;

/// Argon2id cost settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinHashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl PinHashConfig {
    /// Cheapest parameters argon2 accepts; for tests only.
    pub fn insecure_fast() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// Hashes PINs into PHC strings and verifies supplied PINs against them.
#[derive(Clone)]
pub struct PinHasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for PinHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinHasher")
            .field("params", self.argon2.params())
            .finish()
    }
}

impl PinHasher {
    pub fn new(config: PinHashConfig) -> Result<Self, ServiceError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| ServiceError::HashError(format!("invalid argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes `pin` with a fresh random salt.
    pub fn hash(&self, pin: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(pin.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Returns `Ok(false)` on a wrong PIN; a stored value that is not a valid
    /// PHC string is an error, never a match.
    pub fn verify(&self, pin: &str, stored_hash: &str) -> Result<bool, ServiceError> {
        let parsed = PasswordHash::new(stored_hash)?;
        match self.argon2.verify_password(pin.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
