use crate::error::{Error, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ACCESS_TOKEN_TTL_SECS: i64 = 30 * 60;
pub const REFRESH_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

fn sign(user_id: Uuid, secret: &str, ttl_secs: i64) -> Result<String> {
    let exp = chrono::Utc::now().timestamp() + ttl_secs;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp as usize,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}

/// Access token (short-lived) and refresh token (long-lived), signed with
/// distinct secrets, both carrying the user id as subject.
pub fn issue_token_pair(
    user_id: Uuid,
    access_secret: &str,
    refresh_secret: &str,
) -> Result<TokenPair> {
    Ok(TokenPair {
        access_token: sign(user_id, access_secret, ACCESS_TOKEN_TTL_SECS)?,
        refresh_token: sign(user_id, refresh_secret, REFRESH_TOKEN_TTL_SECS)?,
    })
}

pub fn verify_token(token: &str, secret: &str) -> Result<Uuid> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| Error::Unauthorized("Invalid token".to_string()))?;
    data.claims
        .sub
        .parse()
        .map_err(|_| Error::Unauthorized("Invalid token subject".to_string()))
}

fn cookie(name: &str, value: &str, max_age_secs: i64, production: bool) -> String {
    let mut parts = vec![
        format!("{}={}", name, value),
        "Path=/".to_string(),
        format!("Max-Age={}", max_age_secs),
        "SameSite=Lax".to_string(),
    ];
    if production {
        parts.push("HttpOnly".to_string());
        parts.push("Secure".to_string());
    }
    parts.join("; ")
}

/// Set-Cookie values carrying a freshly issued token pair.
pub fn auth_cookies(pair: &TokenPair, production: bool) -> [String; 2] {
    [
        cookie(ACCESS_COOKIE, &pair.access_token, ACCESS_TOKEN_TTL_SECS, production),
        cookie(REFRESH_COOKIE, &pair.refresh_token, REFRESH_TOKEN_TTL_SECS, production),
    ]
}

/// Set-Cookie values that overwrite both token cookies with an immediate
/// expiry (logout).
pub fn clear_cookies(production: bool) -> [String; 2] {
    [
        cookie(ACCESS_COOKIE, "", 0, production),
        cookie(REFRESH_COOKIE, "", 0, production),
    ]
}

/// Pull a named cookie out of a `Cookie:` header value.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then_some(v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_pair_round_trip() {
        let user_id = Uuid::new_v4();
        let pair = issue_token_pair(user_id, "access-secret", "refresh-secret").unwrap();

        assert_eq!(verify_token(&pair.access_token, "access-secret").unwrap(), user_id);
        assert_eq!(verify_token(&pair.refresh_token, "refresh-secret").unwrap(), user_id);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let pair = issue_token_pair(Uuid::new_v4(), "access-secret", "refresh-secret").unwrap();
        assert!(verify_token(&pair.access_token, "refresh-secret").is_err());
        assert!(verify_token("not-a-token", "access-secret").is_err());
    }

    #[test]
    fn cookie_attributes_follow_environment() {
        let pair = TokenPair {
            access_token: "a".into(),
            refresh_token: "r".into(),
        };
        let [access, _] = auth_cookies(&pair, true);
        assert!(access.contains("HttpOnly") && access.contains("Secure"));

        let [access, refresh] = auth_cookies(&pair, false);
        assert!(!access.contains("Secure"));
        assert!(refresh.starts_with("refresh_token=r"));
    }

    #[test]
    fn cookie_header_parsing() {
        let header = "theme=dark; access_token=abc.def; refresh_token=xyz";
        assert_eq!(cookie_value(header, "access_token"), Some("abc.def"));
        assert_eq!(cookie_value(header, "refresh_token"), Some("xyz"));
        assert_eq!(cookie_value(header, "missing"), None);
    }
}
