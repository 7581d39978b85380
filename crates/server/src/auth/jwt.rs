use api_types::SessionUser;
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum_extra::{
    extract::CookieJar,
    headers::{Authorization, HeaderMapExt, authorization::Bearer},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{RequestContext, SessionError, SessionProvider};
use crate::config::AuthConfig;

/// Cookie consulted when no `Authorization` header is present.
pub const SESSION_COOKIE: &str = "deskdrop_session";

/// Claims issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Verifies HS256 session tokens signed with the secret shared with the identity provider.
pub struct JwtSessionProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtSessionProvider {
    pub fn new(config: &AuthConfig) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_base64_secret(config.jwt_secret().expose_secret())?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.validate_aud = false;
        if let Some(issuer) = config.issuer() {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self { key, validation })
    }

    fn token_from_headers(headers: &HeaderMap) -> Option<String> {
        if let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() {
            return Some(bearer.token().to_string());
        }

        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }

    pub fn verify(&self, token: &str) -> Option<RequestContext> {
        match decode::<SessionClaims>(token, &self.key, &self.validation) {
            Ok(data) => Some(RequestContext {
                user: SessionUser {
                    id: data.claims.sub,
                    email: data.claims.email,
                    name: data.claims.name,
                },
            }),
            Err(error) => {
                tracing::debug!(?error, "rejected session token");
                None
            }
        }
    }
}

#[async_trait]
impl SessionProvider for JwtSessionProvider {
    async fn get_session(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<RequestContext>, SessionError> {
        Ok(Self::token_from_headers(headers).and_then(|token| self.verify(&token)))
    }
}
