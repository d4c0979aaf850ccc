use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, header};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::sessions::resolve_session::ResolveSession;
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::sessions::session::Session;
use crate::presentation::http::error::ApiError;

pub const REFRESH_COOKIE: &str = "refresh_token";
pub const JWT_COOKIE: &str = "jwt_token";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

pub fn issue_access_token(cfg: &Config, account_id: Uuid) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: account_id.to_string(),
        iat: now,
        exp: now + cfg.jwt_expires_secs as usize,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn validate_access_token(cfg: &Config, token: &str) -> Option<Uuid> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    Uuid::parse_str(&data.claims.sub).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthVia {
    AccessToken,
    RefreshToken,
}

/// The account behind the request, from a bearer/`jwt_token` JWT or else a
/// live `refresh_token` session.
#[derive(Debug, Clone)]
pub struct AuthAccount {
    pub account_id: Uuid,
    pub via: AuthVia,
}

#[axum::async_trait]
impl FromRequestParts<AppContext> for AuthAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        // 1) Authorization header, then the access cookie
        let bearer = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string);
        for token in bearer
            .into_iter()
            .chain(get_cookie(&parts.headers, JWT_COOKIE))
        {
            if let Some(account_id) = validate_access_token(&ctx.cfg, &token) {
                return Ok(AuthAccount {
                    account_id,
                    via: AuthVia::AccessToken,
                });
            }
        }

        // 2) Fall back to the refresh session
        if let Some(refresh) = get_cookie(&parts.headers, REFRESH_COOKIE) {
            let store = ctx.session_store();
            let session = ResolveSession {
                sessions: store.as_ref(),
            }
            .execute(&refresh)
            .await
            .map_err(ApiError::Internal)?;
            if let Some(session) = session {
                return Ok(AuthAccount {
                    account_id: session.account_id,
                    via: AuthVia::RefreshToken,
                });
            }
        }

        Err(ApiError::Unauthorized)
    }
}

// --- Cookie helpers ---

pub fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|hdr| hdr.split(';'))
        .filter_map(|part| part.trim().split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn build_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{}={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        name,
        value,
        secure_attr,
        max_age_secs.max(0)
    )
}

fn append_cookie(headers: &mut HeaderMap, cookie: &str) -> Result<(), ApiError> {
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("invalid cookie header: {e}")))?;
    headers.append(header::SET_COOKIE, value);
    Ok(())
}

/// `Set-Cookie` headers for a freshly issued session and its access token.
pub fn session_cookies(
    cfg: &Config,
    session: &Session,
    access_token: &str,
) -> Result<HeaderMap, ApiError> {
    let secure = cfg.secure_cookies();
    let mut headers = HeaderMap::new();
    append_cookie(
        &mut headers,
        &build_cookie(
            REFRESH_COOKIE,
            &session.refresh_token,
            session.ttl_secs(chrono::Utc::now()),
            secure,
        ),
    )?;
    append_cookie(
        &mut headers,
        &build_cookie(JWT_COOKIE, access_token, cfg.jwt_expires_secs, secure),
    )?;
    Ok(headers)
}

pub fn access_cookie(cfg: &Config, access_token: &str) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    append_cookie(
        &mut headers,
        &build_cookie(
            JWT_COOKIE,
            access_token,
            cfg.jwt_expires_secs,
            cfg.secure_cookies(),
        ),
    )?;
    Ok(headers)
}

pub fn cleared_cookies(cfg: &Config) -> Result<HeaderMap, ApiError> {
    let secure = cfg.secure_cookies();
    let mut headers = HeaderMap::new();
    for name in [REFRESH_COOKIE, JWT_COOKIE] {
        append_cookie(&mut headers, &build_cookie(name, "", 0, secure))?;
    }
    Ok(headers)
}
