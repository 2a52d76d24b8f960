//! Salted password hashing for stored accounts.
//!
//! Hashes are Argon2id PHC strings (`$argon2id$v=19$...`) carrying their own
//! salt and parameters, so verification needs nothing beyond the stored text.
//! Both hashing and verification are CPU bound; async callers should move
//! them onto a blocking thread.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString,
};

/// Well-formed hash no password matches, carrying the default Argon2 costs.
const DECOY_PHC: &str = "$argon2id$v=19$m=19456,t=2,p=1$aGVyaXRhZ2UtZGVjb3khIQ$\
    AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Errors raised while producing or loading password hashes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The hasher rejected the input or parameters.
    #[error("failed to hash password: {message}")]
    Hash { message: String },
    /// A stored hash is not a valid PHC string.
    #[error("stored password hash is malformed: {message}")]
    Malformed { message: String },
}

/// Argon2 PHC-encoded password hash.
///
/// # Examples
/// ```
/// use heritage::domain::PasswordHash;
///
/// let hash = PasswordHash::hash("secret1").expect("hashing succeeds");
/// assert!(hash.verify("secret1"));
/// assert!(!hash.verify("secret2"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a plaintext password with a freshly generated salt.
    pub fn hash(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|encoded| Self(encoded.to_string()))
            .map_err(|err| PasswordHashError::Hash {
                message: err.to_string(),
            })
    }

    /// Load a previously stored PHC string, checking that it parses.
    pub fn from_phc(encoded: impl Into<String>) -> Result<Self, PasswordHashError> {
        let encoded = encoded.into();
        PhcString::new(&encoded).map_err(|err| PasswordHashError::Malformed {
            message: err.to_string(),
        })?;
        Ok(Self(encoded))
    }

    /// Hash to verify against when no account exists, so an unknown username
    /// costs the same Argon2 work as a wrong password.
    pub fn decoy() -> Self {
        Self(DECOY_PHC.to_owned())
    }

    /// Check a plaintext password against this hash.
    pub fn verify(&self, password: &str) -> bool {
        match PhcString::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(error) => {
                tracing::warn!(%error, "stored password hash failed to parse");
                false
            }
        }
    }

    /// Encoded PHC string for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};

    #[given("a password hashed at registration")]
    fn hashed_password() -> PasswordHash {
        PasswordHash::hash("secret1").expect("hashing succeeds")
    }

    #[when("the visitor types the same password")]
    fn verify_same_password(hash: PasswordHash) -> bool {
        hash.verify("secret1")
    }

    #[when("the visitor types a different password")]
    fn verify_different_password(hash: PasswordHash) -> bool {
        hash.verify("secret2")
    }

    #[then("the password is accepted")]
    fn password_accepted(outcome: bool) {
        assert!(outcome, "expected the password to verify");
    }

    #[then("the password is rejected")]
    fn password_rejected(outcome: bool) {
        assert!(!outcome, "expected the password to be rejected");
    }

    #[rstest]
    fn matching_password_verifies() {
        let hash = hashed_password();
        password_accepted(verify_same_password(hash));
    }

    #[rstest]
    fn different_password_is_rejected() {
        let hash = hashed_password();
        password_rejected(verify_different_password(hash));
    }

    #[rstest]
    #[case("Secret1")]
    #[case("secret1 ")]
    #[case("")]
    fn near_misses_are_rejected(#[case] candidate: &str) {
        let hash = hashed_password();
        assert!(!hash.verify(candidate));
    }

    #[rstest]
    fn hashes_are_salted() {
        let first = PasswordHash::hash("secret1").expect("hash");
        let second = PasswordHash::hash("secret1").expect("hash");
        assert_ne!(first.as_str(), second.as_str());
        assert!(first.as_str().starts_with("$argon2id$"));
    }

    #[rstest]
    fn stored_hash_round_trips_through_phc_text() {
        let original = hashed_password();
        let loaded = PasswordHash::from_phc(original.as_str()).expect("valid phc");
        assert!(loaded.verify("secret1"));
    }

    #[rstest]
    #[case("secret1")]
    #[case("")]
    fn plaintext_is_not_accepted_as_stored_hash(#[case] raw: &str) {
        assert!(matches!(
            PasswordHash::from_phc(raw),
            Err(PasswordHashError::Malformed { .. })
        ));
    }

    fn cost_segment(hash: &PasswordHash) -> String {
        hash.as_str().split('$').take(4).collect::<Vec<_>>().join("$")
    }

    #[rstest]
    fn decoy_costs_as_much_as_a_real_hash() {
        let decoy = PasswordHash::decoy();
        assert!(PasswordHash::from_phc(decoy.as_str()).is_ok());
        assert_eq!(cost_segment(&decoy), cost_segment(&hashed_password()));
    }

    #[rstest]
    #[case("secret1")]
    #[case("")]
    fn decoy_accepts_no_password(#[case] candidate: &str) {
        assert!(!PasswordHash::decoy().verify(candidate));
    }

    #[rstest]
    fn debug_output_is_redacted() {
        let hash = hashed_password();
        assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
    }
}
