//! Session tokens and the cookie that carries them

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

pub const SESSION_COOKIE: &str = "shoppinglist_session";

/// JWT payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    /// Random session id
    pub sid: Uuid,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct SessionSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl SessionSigner {
    pub fn new(secret: &str, lifetime_days: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime: Duration::days(lifetime_days),
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Sign a fresh session
    pub fn issue(&self) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sid: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &SessionClaims) -> Result<String, ApiError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("Failed to sign session: {e}")))
    }

    /// Verify signature and expiry
    pub fn verify(&self, token: &str) -> Result<SessionClaims, ApiError> {
        decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| ApiError::Unauthorized)
    }
}

/// `Set-Cookie` value for a new session
pub fn session_cookie(token: &str, max_age: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        token,
        max_age.num_seconds()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the session immediately
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", Duration::zero(), secure)
}

/// Pull the session token out of a `Cookie` request header
pub fn extract_session_token(cookie_header: &str) -> Option<&str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_verify() {
        let signer = SessionSigner::new("test-secret", 30);
        let token = signer.issue().unwrap();
        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = SessionSigner::new("one", 30).issue().unwrap();
        assert!(matches!(
            SessionSigner::new("two", 30).verify(&token),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = SessionSigner::new("test-secret", 30);
        let past = Utc::now() - Duration::days(2);
        let token = signer
            .sign(&SessionClaims {
                sid: Uuid::new_v4(),
                iat: past.timestamp(),
                exp: (past + Duration::days(1)).timestamp(),
            })
            .unwrap();
        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let signer = SessionSigner::new("test-secret", 30);
        assert!(signer.verify("not.a.token").is_err());
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("abc", Duration::days(30), false);
        assert_eq!(
            cookie,
            "shoppinglist_session=abc; HttpOnly; SameSite=Lax; Path=/; Max-Age=2592000"
        );
        assert!(session_cookie("abc", Duration::days(30), true).ends_with("; Secure"));
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_token_among_other_cookies() {
        let header = "theme=dark; shoppinglist_session=tok.en.value; lang=nb";
        assert_eq!(extract_session_token(header), Some("tok.en.value"));
        assert_eq!(extract_session_token("theme=dark"), None);
        assert_eq!(extract_session_token("shoppinglist_session="), None);
    }
}
