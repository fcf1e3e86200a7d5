// Session record and cookie codec
// Decision: Sign the cookie as an HS256 JWT - the browser holds the only
//           copy of the session, so the value must be tamper-evident.
//           (The system this replaces stored the session as unsigned JSON.)
// Decision: Expiry is enforced twice - `exp` checked on decode, and the
//           cookie's Max-Age set to the provider-granted token lifetime

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use toolshelf_core::UserProfile;

use super::oauth::TokenSet;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "appSession";

/// Name of the short-lived cookie carrying the OAuth state nonce between
/// `login` and `callback`.
pub const STATE_COOKIE: &str = "authState";

/// The session record held entirely client-side.
///
/// Claim names `iat`/`exp` are used on the wire so signature validation
/// covers expiry as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserProfile,
    pub access_token: String,
    pub id_token: String,
    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Session {
    /// Build a session from a fresh token set.
    /// `expires_at` is always `issued_at + expires_in`.
    pub fn new(user: UserProfile, tokens: &TokenSet, issued_at: DateTime<Utc>) -> Self {
        let issued_at = issued_at.timestamp();
        Self {
            user,
            access_token: tokens.access_token.clone(),
            id_token: tokens.id_token.clone(),
            issued_at,
            expires_at: issued_at + tokens.expires_in,
        }
    }
}

/// Session decode/encode failure. Callers map every variant (plus cookie
/// absence) to "not authenticated" - never a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session expired")]
    Expired,

    #[error("malformed session")]
    Malformed,

    #[error("failed to encode session")]
    Encode,
}

/// Signs and validates session cookie values.
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Serialize and sign a session into a cookie value.
    pub fn encode(&self, session: &Session) -> Result<String, SessionError> {
        encode(&Header::default(), session, &self.encoding_key).map_err(|_| SessionError::Encode)
    }

    /// Validate a cookie value and recover the session.
    ///
    /// An expired-but-authentic session is reported as [`SessionError::Expired`];
    /// anything else (bad signature, garbage input) is [`SessionError::Malformed`].
    pub fn decode(&self, value: &str) -> Result<Session, SessionError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.validate_exp = true;

        decode::<Session>(value, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Malformed,
            })
    }
}

/// Session cookie with the fixed attribute policy: http-only, lax,
/// `Max-Age` equal to the provider-granted token lifetime.
pub fn session_cookie(value: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

/// State-nonce cookie scoped to the auth endpoints, short-lived.
pub fn state_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((STATE_COOKIE, value))
        .path("/api/auth")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(5))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "picture": "https://example.com/ada.png",
            "sub": "auth0|123",
        }))
        .unwrap()
    }

    fn test_session(expires_at: i64) -> Session {
        Session {
            user: test_user(),
            access_token: "at-123".to_string(),
            id_token: "it-456".to_string(),
            issued_at: expires_at - 3600,
            expires_at,
        }
    }

    #[test]
    fn test_round_trip() {
        let codec = SessionCodec::new("test-secret");
        let session = test_session(Utc::now().timestamp() + 3600);

        let value = codec.encode(&session).unwrap();
        let decoded = codec.decode(&value).unwrap();
        assert_eq!(decoded, session);
    }

    #[test]
    fn test_new_applies_token_lifetime() {
        let now = Utc::now();
        let tokens = TokenSet {
            access_token: "at".to_string(),
            id_token: "it".to_string(),
            expires_in: 3600,
        };

        let session = Session::new(test_user(), &tokens, now);
        assert_eq!(session.issued_at, now.timestamp());
        assert_eq!(session.expires_at, now.timestamp() + 3600);
    }

    #[test]
    fn test_expired_session_is_rejected() {
        let codec = SessionCodec::new("test-secret");
        let session = test_session(Utc::now().timestamp() - 10);

        let value = codec.encode(&session).unwrap();
        assert_eq!(codec.decode(&value), Err(SessionError::Expired));
    }

    #[test]
    fn test_malformed_value_is_rejected() {
        let codec = SessionCodec::new("test-secret");
        assert_eq!(codec.decode("not-a-session"), Err(SessionError::Malformed));
        assert_eq!(codec.decode(""), Err(SessionError::Malformed));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let codec = SessionCodec::new("test-secret");
        let other = SessionCodec::new("different-secret");
        let session = test_session(Utc::now().timestamp() + 3600);

        let forged = other.encode(&session).unwrap();
        assert_eq!(codec.decode(&forged), Err(SessionError::Malformed));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("value".to_string(), 3600, true);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
    }

    #[test]
    fn test_state_cookie_scoped_to_auth_path() {
        let cookie = state_cookie("nonce".to_string(), false);
        assert_eq!(cookie.name(), STATE_COOKIE);
        assert_eq!(cookie.path(), Some("/api/auth"));
        assert_eq!(cookie.max_age(), Some(time::Duration::minutes(5)));
    }
}
