use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::users::get_user::GetUser;
use crate::application::use_cases::users::update_user::UpdateUser;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::{User, UserChanges, UserMedication, UserPreferences, UserProfile};
use crate::presentation::http::auth::AuthAccount;
use crate::presentation::http::error::{ApiError, MessageResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub display_name: Option<String>,
    pub birth: Option<NaiveDate>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub medication: UserMedication,
    pub preferences: UserPreferences,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            display_name: u.display_name,
            birth: u.birth,
            height: u.height,
            weight: u.weight,
            medication: u.medication,
            preferences: u.preferences,
            created_at: u.created_at,
        }
    }
}

/// Profile supplied alongside a new account.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserProfileBody {
    pub display_name: Option<String>,
    pub birth: Option<NaiveDate>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    #[serde(default)]
    pub medication: Option<UserMedication>,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}

impl From<UserProfileBody> for UserProfile {
    fn from(b: UserProfileBody) -> Self {
        Self {
            display_name: b.display_name,
            birth: b.birth,
            height: b.height,
            weight: b.weight,
            medication: b.medication.unwrap_or_default(),
            preferences: b.preferences.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub display_name: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub birth: DoubleOption<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<f64>)]
    pub height: DoubleOption<f64>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<f64>)]
    pub weight: DoubleOption<f64>,
    pub medication: Option<UserMedication>,
    pub preferences: Option<UserPreferences>,
}

/// Tells an absent field apart from an explicit `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum DoubleOption<T> {
    NotProvided,
    Null,
    Some(T),
}

impl<T> Default for DoubleOption<T> {
    fn default() -> Self {
        DoubleOption::NotProvided
    }
}

impl<T> DoubleOption<T> {
    pub fn into_change(self) -> Option<Option<T>> {
        match self {
            DoubleOption::NotProvided => None,
            DoubleOption::Null => Some(None),
            DoubleOption::Some(v) => Some(Some(v)),
        }
    }
}

fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<DoubleOption<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            display_name: r.display_name.into_change(),
            birth: r.birth.into_change(),
            height: r.height.into_change(),
            weight: r.weight.into_change(),
            medication: r.medication,
            preferences: r.preferences,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/user", get(get_user).patch(update_user))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/v1/user", tag = "User", responses(
    (status = 200, body = UserResponse),
    (status = 401, body = MessageResponse)
))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    auth: AuthAccount,
) -> Result<Json<UserResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = GetUser {
        repo: repo.as_ref(),
    };
    let user = uc.execute(auth.account_id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(patch, path = "/api/v1/user", tag = "User", request_body = UpdateUserRequest, responses(
    (status = 200, body = UserResponse),
    (status = 400, body = MessageResponse)
))]
pub async fn update_user(
    State(ctx): State<AppContext>,
    auth: AuthAccount,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(req) = body?;
    let repo = ctx.user_repo();
    let uc = UpdateUser {
        repo: repo.as_ref(),
    };
    let user = uc.execute(auth.account_id, req.into()).await?;
    Ok(Json(user.into()))
}
