use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TOKEN_ISSUER;
use super::errors::TokenError;

/// Issues and validates signed session tokens.
///
/// Tokens are HS256 JWTs. The secret is supplied at construction, so two
/// codecs built from different secrets reject each other's tokens.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new codec with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Rotating the secret invalidates every token issued before
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for a user, valid for 24 hours from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, user_id: i64, username: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, username, Utc::now())
    }

    /// Issue a token for a user as if the current instant were `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_at(
        &self,
        user_id: i64,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.sign(&Claims::for_user(user_id, username, issued_at))
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token against the current time.
    ///
    /// # Returns
    /// Embedded claims
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed or lacks required claims
    /// * `BadSignature` - Signature or algorithm does not match
    /// * `WrongIssuer` - Issuer is not ours
    /// * `Expired` - Token is past its expiry
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token against an explicit instant.
    ///
    /// # Errors
    /// Same as [`TokenCodec::validate`].
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.set_issuer(&[TOKEN_ISSUER]);
        // Expiry is checked below against `now` with no leeway.
        validation.validate_exp = false;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        if token_data.claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}
