use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod account;
pub mod auth;
pub mod error;
pub mod health;
pub mod session;
pub mod user;

/// Every `/api/v1` route; mounted by the server under that prefix.
pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .merge(account::routes(ctx.clone()))
        .merge(user::routes(ctx.clone()))
        .merge(session::routes(ctx))
}
