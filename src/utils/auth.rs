//! Authentication utilities

use anyhow::Result;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;

const PBKDF2_ITERATIONS: u32 = 100_000;
const HASH_LENGTH: usize = 32;

/// user identity stored in the jwt sub claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: UserIdentity,
    pub exp: usize,
}

/// hash a password using pbkdf2-sha256 with the server id as salt
pub fn hash_password(password: &str, salt: &[u8]) -> String {
    let mut hash = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut hash);

    hex::encode(hash)
}

/// verify a password against a hash using constant-time comparison
pub fn verify_password(password: &str, hash: &str, salt: &[u8]) -> bool {
    let computed = hash_password(password, salt);
    computed.as_bytes().ct_eq(hash.as_bytes()).into()
}

/// create a jwt session token with the given ttl in seconds
pub fn create_jwt(identity: UserIdentity, secret: &str, expires_in: u64) -> Result<String> {
    let expiration = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() + expires_in;

    let claims = Claims {
        sub: identity,
        exp: expiration as usize,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// verify a jwt session token
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.sub = None;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let salt = b"test-server-id";
        let hash = hash_password("hunter2", salt);

        assert!(verify_password("hunter2", &hash, salt));
        assert!(!verify_password("hunter3", &hash, salt));
        assert!(!verify_password("hunter2", &hash, b"other-salt"));
    }

    #[test]
    fn test_jwt_roundtrip() {
        let identity = UserIdentity {
            id: 7,
            username: "listener".into(),
        };

        let token = create_jwt(identity, "secret", 3600).unwrap();
        let claims = verify_jwt(&token, "secret").unwrap();

        assert_eq!(claims.sub.id, 7);
        assert_eq!(claims.sub.username, "listener");
        assert!(verify_jwt(&token, "wrong-secret").is_err());
    }
}
