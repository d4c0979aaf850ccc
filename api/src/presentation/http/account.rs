use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::accounts::create_account::{
    CreateAccount, CreateAccountRequest as CreateAccountDto,
};
use crate::application::use_cases::accounts::delete_account::DeleteAccount;
use crate::application::use_cases::accounts::get_account::GetAccount;
use crate::application::use_cases::accounts::login::{Login, LoginRequest as LoginDto};
use crate::application::use_cases::accounts::update_account::{
    UpdateAccount, UpdateAccountRequest as UpdateAccountDto,
};
use crate::application::use_cases::accounts::validate_field::ValidateField;
use crate::bootstrap::app_context::AppContext;
use crate::domain::accounts::account::Account;
use crate::presentation::http::auth::{
    AuthAccount, cleared_cookies, issue_access_token, session_cookies,
};
use crate::presentation::http::error::{ApiError, MessageResponse};
use crate::presentation::http::user::{UserProfileBody, UserResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Initial profile; a blank one is created when omitted.
    #[serde(default)]
    pub new_user: Option<UserProfileBody>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Required together with `password`.
    pub current_password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteAccountRequest {
    #[serde(default)]
    pub password: String,
}

/// Public copy of an account: never includes the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            email: a.email,
            username: a.username,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedAccountResponse {
    #[serde(flatten)]
    pub account: AccountResponse,
    pub user: UserResponse,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/account",
            post(create_account)
                .get(get_account)
                .patch(update_account)
                .delete(delete_account),
        )
        .route("/account/login", post(login))
        .route("/account/validate/email/:email", post(validate_email))
        .route("/account/validate/username/:username", post(validate_username))
        .route("/account/validate/password/:password", post(validate_password))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/v1/account", tag = "Account", request_body = CreateAccountRequest, security(()), responses(
    (status = 201, body = CreatedAccountResponse),
    (status = 400, body = MessageResponse)
))]
pub async fn create_account(
    State(ctx): State<AppContext>,
    body: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<CreatedAccountResponse>), ApiError> {
    let Json(req) = body?;
    let accounts = ctx.account_repo();
    let users = ctx.user_repo();
    let sessions = ctx.session_store();
    let uc = CreateAccount {
        accounts: accounts.as_ref(),
        users: users.as_ref(),
        sessions: sessions.as_ref(),
        rules: &ctx.cfg.account_rules,
        session_ttl: ctx.cfg.session_ttl(),
    };
    let dto = CreateAccountDto {
        email: req.email,
        username: req.username,
        password: req.password,
        profile: req.new_user.map(Into::into),
    };
    let created = uc.execute(&dto).await?;

    let token = issue_access_token(&ctx.cfg, created.account.id)?;
    let headers = session_cookies(&ctx.cfg, &created.session, &token)?;
    Ok((
        StatusCode::CREATED,
        headers,
        Json(CreatedAccountResponse {
            account: created.account.into(),
            user: created.user.into(),
        }),
    ))
}

#[utoipa::path(post, path = "/api/v1/account/login", tag = "Account", request_body = LoginRequest, security(()), responses(
    (status = 200, body = AccountResponse),
    (status = 400, body = MessageResponse),
    (status = 403, body = MessageResponse)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<AccountResponse>), ApiError> {
    let Json(req) = body?;
    let accounts = ctx.account_repo();
    let sessions = ctx.session_store();
    let uc = Login {
        accounts: accounts.as_ref(),
        sessions: sessions.as_ref(),
        session_ttl: ctx.cfg.session_ttl(),
    };
    let dto = LoginDto {
        email: req.email,
        username: req.username,
        password: req.password,
    };
    let (account, session) = uc.execute(&dto).await?;

    let token = issue_access_token(&ctx.cfg, account.id)?;
    let headers = session_cookies(&ctx.cfg, &session, &token)?;
    Ok((headers, Json(account.into())))
}

#[utoipa::path(get, path = "/api/v1/account", tag = "Account", responses(
    (status = 200, body = AccountResponse),
    (status = 401, body = MessageResponse)
))]
pub async fn get_account(
    State(ctx): State<AppContext>,
    auth: AuthAccount,
) -> Result<Json<AccountResponse>, ApiError> {
    let repo = ctx.account_repo();
    let uc = GetAccount {
        repo: repo.as_ref(),
    };
    let account = uc.execute(auth.account_id).await?;
    Ok(Json(account.into()))
}

#[utoipa::path(patch, path = "/api/v1/account", tag = "Account", request_body = UpdateAccountRequest, responses(
    (status = 200, body = AccountResponse),
    (status = 400, body = MessageResponse),
    (status = 403, body = MessageResponse)
))]
pub async fn update_account(
    State(ctx): State<AppContext>,
    auth: AuthAccount,
    body: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let Json(req) = body?;
    let repo = ctx.account_repo();
    let uc = UpdateAccount {
        repo: repo.as_ref(),
        rules: &ctx.cfg.account_rules,
    };
    let dto = UpdateAccountDto {
        email: req.email,
        username: req.username,
        password: req.password,
        current_password: req.current_password,
    };
    let account = uc.execute(auth.account_id, &dto).await?;
    Ok(Json(account.into()))
}

#[utoipa::path(delete, path = "/api/v1/account", tag = "Account", request_body = DeleteAccountRequest, responses(
    (status = 200, body = MessageResponse),
    (status = 403, body = MessageResponse)
))]
pub async fn delete_account(
    State(ctx): State<AppContext>,
    auth: AuthAccount,
    body: Result<Json<DeleteAccountRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<MessageResponse>), ApiError> {
    let Json(req) = body?;
    let accounts = ctx.account_repo();
    let sessions = ctx.session_store();
    let uc = DeleteAccount {
        accounts: accounts.as_ref(),
        sessions: sessions.as_ref(),
    };
    uc.execute(auth.account_id, &req.password).await?;
    Ok((cleared_cookies(&ctx.cfg)?, MessageResponse::ok()))
}

#[utoipa::path(post, path = "/api/v1/account/validate/email/{email}", tag = "Account", security(()),
    params(("email" = String, Path, description = "Address to check")),
    responses((status = 200, body = MessageResponse), (status = 400, body = MessageResponse)))]
pub async fn validate_email(
    State(ctx): State<AppContext>,
    Path(email): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let repo = ctx.account_repo();
    let uc = ValidateField {
        repo: repo.as_ref(),
        rules: &ctx.cfg.account_rules,
    };
    uc.email(&email).await?;
    Ok(MessageResponse::ok())
}

#[utoipa::path(post, path = "/api/v1/account/validate/username/{username}", tag = "Account", security(()),
    params(("username" = String, Path, description = "Username to check")),
    responses((status = 200, body = MessageResponse), (status = 400, body = MessageResponse)))]
pub async fn validate_username(
    State(ctx): State<AppContext>,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let repo = ctx.account_repo();
    let uc = ValidateField {
        repo: repo.as_ref(),
        rules: &ctx.cfg.account_rules,
    };
    uc.username(&username).await?;
    Ok(MessageResponse::ok())
}

#[utoipa::path(post, path = "/api/v1/account/validate/password/{password}", tag = "Account", security(()),
    params(("password" = String, Path, description = "Password to check")),
    responses((status = 200, body = MessageResponse), (status = 400, body = MessageResponse)))]
pub async fn validate_password(
    State(ctx): State<AppContext>,
    Path(password): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let repo = ctx.account_repo();
    let uc = ValidateField {
        repo: repo.as_ref(),
        rules: &ctx.cfg.account_rules,
    };
    uc.password(&password)?;
    Ok(MessageResponse::ok())
}
