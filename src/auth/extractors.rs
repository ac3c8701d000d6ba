use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::claims::Claims;
use crate::config::JwtConfig;
use crate::state::AppState;
use crate::users::repo::User;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn decode_claims(token: &str, cfg: &JwtConfig) -> jsonwebtoken::errors::Result<Claims> {
    let mut validation = Validation::default();
    validation.set_audience(std::slice::from_ref(&cfg.audience));
    validation.set_issuer(std::slice::from_ref(&cfg.issuer));
    let decoding = DecodingKey::from_secret(cfg.secret.as_bytes());
    let data = decode::<Claims>(token, &decoding, &validation)?;
    Ok(data.claims)
}

/// Validates the identity provider's bearer token and resolves the local
/// user id, provisioning the user row on first authenticated request.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "missing Authorization header".to_string(),
            ))?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or((StatusCode::UNAUTHORIZED, "invalid auth scheme".to_string()))?;

        let claims = decode_claims(token, &state.config.jwt)
            .map_err(|_| (StatusCode::UNAUTHORIZED, "invalid or expired token".to_string()))?;

        let email = claims.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            warn!(sub = %claims.sub, "token carries malformed email");
            return Err((StatusCode::BAD_REQUEST, "invalid email in token".to_string()));
        }

        let user_id = User::ensure(&state.db, &claims.sub, &email, claims.name.as_deref())
            .await
            .map_err(|e| {
                error!(error = %e, sub = %claims.sub, "user provisioning failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "user provisioning failed".to_string(),
                )
            })?;

        debug!(%user_id, sub = %claims.sub, "authenticated");
        Ok(AuthUser(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use time::OffsetDateTime;

    fn test_cfg() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            issuer: "test-idp".into(),
            audience: "chefgpt-test".into(),
        }
    }

    fn sign(cfg: &JwtConfig, iss: &str, aud: &str) -> String {
        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        let claims = Claims {
            sub: "idp|12345".into(),
            email: "cook@example.com".into(),
            name: Some("Cook".into()),
            iss: iss.into(),
            aud: aud.into(),
            iat: now,
            exp: now + 300,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.secret.as_bytes()),
        )
        .expect("sign test token")
    }

    #[test]
    fn decodes_well_formed_token() {
        let cfg = test_cfg();
        let token = sign(&cfg, "test-idp", "chefgpt-test");
        let claims = decode_claims(&token, &cfg).expect("decode");
        assert_eq!(claims.sub, "idp|12345");
        assert_eq!(claims.email, "cook@example.com");
    }

    #[test]
    fn rejects_wrong_audience() {
        let cfg = test_cfg();
        let token = sign(&cfg, "test-idp", "someone-else");
        assert!(decode_claims(&token, &cfg).is_err());
    }

    #[test]
    fn rejects_wrong_issuer() {
        let cfg = test_cfg();
        let token = sign(&cfg, "rogue-idp", "chefgpt-test");
        assert!(decode_claims(&token, &cfg).is_err());
    }

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@c.com"));
    }
}
