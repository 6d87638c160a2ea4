//! Bearer-token issuing/verification and credential checking.
//!
//! Tokens are HS256 JWTs signed with a single process-lifetime secret.
//! Credential verification sits behind a trait so the single hardcoded
//! support user can later be replaced by a real identity store without
//! touching the gate logic.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// Mirrors the original contract: tokens are valid for 9999 days,
// effectively unbounded. No revocation exists.
const TOKEN_LIFETIME_DAYS: i64 = 9999;

/// An authenticated identity, as carried inside the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub nome: String,
}

/// JWT claim set embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub nome: String,
    pub exp: i64,
}

// ── Token service ────────────────────────────────────────────

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a token for the given identity.
    pub fn issue(&self, identity: &Identity) -> Result<String, AppError> {
        let claims = Claims {
            email: identity.email.clone(),
            nome: identity.nome.clone(),
            exp: (Utc::now() + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("token signing failed: {}", e)))
    }

    /// Verify a token and return its claims. Any decode failure — bad
    /// signature, malformed token, past expiry — collapses into
    /// `InvalidToken` (403 on the wire).
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }
}

// ── Credential verification ──────────────────────────────────

/// Checks a login credential pair against the known identities.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, senha: &str) -> Option<Identity>;
}

/// The cardinality-one credential store: a single fixed support user,
/// loaded from configuration at startup.
pub struct StaticCredentials {
    pub email: String,
    pub senha: String,
    pub nome: String,
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, email: &str, senha: &str) -> Option<Identity> {
        if email == self.email && senha == self.senha {
            Some(Identity {
                email: self.email.clone(),
                nome: self.nome.clone(),
            })
        } else {
            None
        }
    }
}

// ── Tests ────────────────────────────────────────────────────
