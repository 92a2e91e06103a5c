//! Password hashing.
//!
//! The hasher name is stored next to each hash so the scheme can be swapped
//! without invalidating existing credentials.

use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

mod board_argon2 {
    use anyhow::{anyhow, Result};
    use argon2::{
        password_hash::{
            rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        },
        Argon2,
    };

    pub fn hash(plain: &[u8]) -> Result<String> {
        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);
        let hash_string = argon2
            .hash_password(plain, &salt)
            .map_err(|err| anyhow!("{}", err))?
            .to_string();
        Ok(hash_string)
    }

    pub fn verify<T: AsRef<str>>(plain_pw: &[u8], target_hash: T) -> Result<bool> {
        let argon2 = Argon2::default();
        let password_hash =
            PasswordHash::new(target_hash.as_ref()).map_err(|err| anyhow!("{}", err))?;
        Ok(argon2.verify_password(plain_pw, &password_hash).is_ok())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardHasher {
    Argon2,
}

impl FromStr for BoardHasher {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "argon2" => Ok(BoardHasher::Argon2),
            _ => bail!("Unknown hasher {}", s),
        }
    }
}

impl fmt::Display for BoardHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardHasher::Argon2 => write!(f, "argon2"),
        }
    }
}

impl BoardHasher {
    /// Hashes with a fresh random salt; the salt rides along in the encoded
    /// hash string.
    pub fn hash(&self, plain: &str) -> Result<String> {
        match self {
            BoardHasher::Argon2 => board_argon2::hash(plain.as_bytes()),
        }
    }

    pub fn verify(&self, plain_pw: &str, target_hash: &str) -> Result<bool> {
        match self {
            BoardHasher::Argon2 => board_argon2::verify(plain_pw.as_bytes(), target_hash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argon2_round_trip() {
        let pw = "123mypw";

        let hash = BoardHasher::Argon2.hash(pw).unwrap();

        assert!(BoardHasher::Argon2.verify("123mypw", &hash).unwrap());
        assert!(!BoardHasher::Argon2.verify("not the pw", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let hash1 = BoardHasher::Argon2.hash("pw").unwrap();
        let hash2 = BoardHasher::Argon2.hash("pw").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn hasher_name_round_trip() {
        let parsed: BoardHasher = BoardHasher::Argon2.to_string().parse().unwrap();
        assert_eq!(parsed, BoardHasher::Argon2);
        assert!("bcrypt".parse::<BoardHasher>().is_err());
    }

    #[test]
    fn garbage_hash_fails_verification() {
        assert!(BoardHasher::Argon2.verify("pw", "not-a-phc-string").is_err());
    }
}
