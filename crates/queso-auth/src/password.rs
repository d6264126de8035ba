//! Password hashing with Argon2id.
//!
//! Digests are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`), so each
//! one carries its own salt and cost parameters. Raising the configured cost
//! only affects new digests; verification always uses the parameters embedded
//! in the stored digest.
//!
//! Both operations are deliberately slow. Async callers should run them on the
//! blocking pool.

use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("invalid argon2 parameters: {0}")]
    Params(argon2::Error),
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Hashes and verifies user passwords.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    params: Params,
    /// Digest of a throwaway secret at the configured cost, checked when there is no account.
    decoy: Arc<str>,
}

impl CredentialStore {
    /// Build with explicit cost parameters. `None` keeps the argon2 default for that knob.
    pub fn with_cost(
        memory_kib: Option<u32>,
        iterations: Option<u32>,
    ) -> Result<Self, CredentialError> {
        let params = Params::new(
            memory_kib.unwrap_or(Params::DEFAULT_M_COST),
            iterations.unwrap_or(Params::DEFAULT_T_COST),
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(CredentialError::Params)?;
        let decoy = hash_with(&params, "queso-decoy-credential")?;
        Ok(Self {
            params,
            decoy: decoy.into(),
        })
    }

    fn hasher(&self) -> Argon2<'static> {
        argon2id(&self.params)
    }

    /// Produce a salted digest of `plaintext`.
    pub fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        hash_with(&self.params, plaintext)
    }

    /// Check `plaintext` against a stored digest. Malformed digests never match.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            tracing::warn!("stored password digest is not a valid PHC string");
            return false;
        };
        self.hasher()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }

    /// Spend one full verification on `plaintext` when no account exists, so
    /// an unknown identity costs as much as a wrong password. Never matches.
    pub fn verify_absent(&self, plaintext: &str) -> bool {
        let _ = self.verify(plaintext, &self.decoy);
        false
    }
}

fn argon2id(params: &Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone())
}

fn hash_with(params: &Params, plaintext: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2id(params)
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(CredentialError::Hash)
}
