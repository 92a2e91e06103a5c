//! Signed bearer tokens.
//!
//! Tokens are HS256 JWTs carrying the user id and email. They have no
//! expiry claim; revocation is done by rotating the signing secret.

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub email: String,
}

pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No exp claim on issued tokens
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn sign(&self, user_id: i64, email: &str) -> Result<String> {
        let claims = Claims {
            id: user_id,
            email: email.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key).context("Failed to sign token")
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .context("Invalid token")?;
        Ok(data.claims)
    }
}
