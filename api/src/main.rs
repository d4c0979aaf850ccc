use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use clap::Parser;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::bootstrap::app_context::{AppContext, AppServices};
use api::bootstrap::cli::Cli;
use api::bootstrap::config::Config;
use api::infrastructure::cache::RedisSessionStore;
use api::infrastructure::db::repositories::account_repository_sqlx::SqlxAccountRepository;
use api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use api::presentation::http::health::HealthState;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            api::presentation::http::account::create_account,
            api::presentation::http::account::login,
            api::presentation::http::account::get_account,
            api::presentation::http::account::update_account,
            api::presentation::http::account::delete_account,
            api::presentation::http::account::validate_email,
            api::presentation::http::account::validate_username,
            api::presentation::http::account::validate_password,
            api::presentation::http::user::get_user,
            api::presentation::http::user::update_user,
            api::presentation::http::session::validate_session,
            api::presentation::http::session::logout,
            api::presentation::http::health::health,
        ),
        components(schemas(
            api::presentation::http::account::CreateAccountRequest,
            api::presentation::http::account::LoginRequest,
            api::presentation::http::account::UpdateAccountRequest,
            api::presentation::http::account::DeleteAccountRequest,
            api::presentation::http::account::AccountResponse,
            api::presentation::http::account::CreatedAccountResponse,
            api::presentation::http::user::UserResponse,
            api::presentation::http::user::UserProfileBody,
            api::presentation::http::user::UpdateUserRequest,
            api::presentation::http::error::MessageResponse,
            api::presentation::http::health::HealthResp,
            api::domain::users::user::UserMedication,
            api::domain::users::user::Medication,
            api::domain::users::user::UserPreferences,
            api::domain::users::user::RouteOfAdministration,
            api::domain::users::user::DosageUnit,
            api::domain::users::user::DisplayUnit,
        )),
        tags(
            (name = "Account", description = "Account lifecycle and field validation"),
            (name = "User", description = "Profile data"),
            (name = "Session", description = "Session validation and logout"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn init_tracing(dev: bool) {
    let default_filter = if dev {
        "api=debug,tripreporter=debug,tower_http=debug,axum=info"
    } else {
        "api=info,tripreporter=info,tower_http=info,axum=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    if dev {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    }
}

fn build_cors(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PATCH,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    let origin = cfg
        .frontend_url
        .as_deref()
        .and_then(|o| HeaderValue::from_str(o).ok());
    match origin {
        Some(v) => CorsLayer::new()
            .allow_origin(v)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        // Production refuses to start without an origin, so this is dev only
        None => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenv().ok();
    init_tracing(cli.dev);

    let cfg = Config::from_env(&cli)?;
    info!(
        site = %cfg.site_name,
        production = cfg.is_production,
        docker = cli.docker,
        "Starting Trip Reporter backend"
    );

    // Database
    let pool = api::infrastructure::db::connect_pool(&cfg.database_url).await?;
    api::infrastructure::db::migrate(&pool).await?;

    // Session cache
    let redis = api::infrastructure::cache::connect_redis(&cfg.redis_url).await?;
    let session_store = RedisSessionStore::new(redis, cfg.redis_key_prefix.clone());

    let services = AppServices::new(
        Arc::new(SqlxAccountRepository::new(pool.clone())),
        Arc::new(SqlxUserRepository::new(
            pool.clone(),
            cfg.encryption_key.clone(),
        )),
        Arc::new(session_store.clone()),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let cors_logging = cfg.cors_logging;
    let app = Router::new()
        .nest(
            "/api",
            api::presentation::http::health::routes(HealthState {
                pool: pool.clone(),
                sessions: session_store,
            }),
        )
        .nest("/api/v1", api::presentation::http::routes(ctx.clone()))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(build_cors(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(move |req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                let origin = if cors_logging {
                    req.headers()
                        .get(http::header::ORIGIN)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string()
                } else {
                    String::new()
                };
                tracing::info_span!("http", %method, %uri, matched_path = %matched, %origin)
            }),
        );

    let addr = format!("{}:{}", cfg.srv_addr, cfg.srv_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if cfg.is_production {
        info!(%addr, "Running in production mode");
    } else {
        info!(%addr, "Running in development mode");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
