use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::{delete, get},
};

use crate::application::use_cases::sessions::revoke_session::RevokeSession;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{
    AuthAccount, AuthVia, REFRESH_COOKIE, access_cookie, cleared_cookies, get_cookie,
    issue_access_token,
};
use crate::presentation::http::error::{ApiError, MessageResponse};

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/session/validate", get(validate_session))
        .route("/session", delete(logout))
        .with_state(ctx)
}

/// 200 while the caller holds a valid access token or refresh session. A
/// request carried only by the refresh session gets a new access cookie.
#[utoipa::path(get, path = "/api/v1/session/validate", tag = "Session", responses(
    (status = 200, body = MessageResponse),
    (status = 401, body = MessageResponse)
))]
pub async fn validate_session(
    State(ctx): State<AppContext>,
    auth: AuthAccount,
) -> Result<(HeaderMap, Json<MessageResponse>), ApiError> {
    let headers = match auth.via {
        AuthVia::AccessToken => HeaderMap::new(),
        AuthVia::RefreshToken => {
            let token = issue_access_token(&ctx.cfg, auth.account_id)?;
            tracing::debug!(account_id = %auth.account_id, "access_token_refreshed");
            access_cookie(&ctx.cfg, &token)?
        }
    };
    Ok((headers, MessageResponse::ok()))
}

#[utoipa::path(delete, path = "/api/v1/session", tag = "Session", security(()), responses(
    (status = 200, body = MessageResponse)
))]
pub async fn logout(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Json<MessageResponse>), ApiError> {
    if let Some(refresh) = get_cookie(&headers, REFRESH_COOKIE) {
        let store = ctx.session_store();
        RevokeSession {
            sessions: store.as_ref(),
        }
        .execute(&refresh)
        .await?;
    }
    Ok((cleared_cookies(&ctx.cfg)?, MessageResponse::ok()))
}
