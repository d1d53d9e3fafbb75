//! Bearer token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use explorer_core::config::AuthConfig;
use explorer_core::error::AppError;

use super::claims::RoleClaims;

/// Decodes role claims from bearer tokens.
///
/// Expiry is always checked. The signature is checked only when
/// `auth.verify_token_signature` is set; otherwise the token is assumed to
/// have been verified by the gateway in front of the service.
#[derive(Clone)]
pub struct TokenDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = config.token_leeway_seconds;
        if !config.verify_token_signature {
            validation.insecure_disable_signature_validation();
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token, reporting why it was rejected.
    pub fn decode_strict(&self, token: &str) -> Result<RoleClaims, AppError> {
        let token_data =
            decode::<RoleClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Decodes a token, treating every rejection as "no token".
    pub fn decode(&self, token: &str) -> Option<RoleClaims> {
        match self.decode_strict(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!(error = %e, "Ignoring bearer token");
                None
            }
        }
    }
}
