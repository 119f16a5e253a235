use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod config;
mod models;
mod routes;
mod services;

use adapters::{CarfaxClient, HttpCallAgent, PgCallRepository};
use application::CallService;
use config::ServerConfig;
use haggle::{CallAgent, CallRepository, ListingSearch};

/// Call lifecycle service wired to whichever store and agent were injected at startup
pub type AppCallService = CallService<dyn CallRepository, dyn CallAgent>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub call_service: Arc<AppCallService>,
    pub listings: Arc<dyn ListingSearch>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
    })
}

/// Build the full HTTP router
pub fn app(state: AppState) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::sellers::router())
        .merge(routes::dealers::router())
        .merge(routes::calls::router())
        .merge(routes::deals::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,haggle_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚗 Haggle API initializing...");

    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.pool.max_connections)
        .min_connections(config.pool.min_connections)
        .max_lifetime(config.pool.max_lifetime)
        .idle_timeout(config.pool.idle_timeout)
        .acquire_timeout(config.pool.acquire_timeout)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("✅ Database connection established");

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("✅ Database migrations completed");

    let repo: Arc<dyn CallRepository> = Arc::new(PgCallRepository::new(pool.clone()));
    let agent = HttpCallAgent::new(&config.agent_base_url, config.agent_timeout)
        .context("Failed to build agent HTTP client")?;
    tracing::info!("📞 Calling agent: {}", agent.init_url());
    let agent: Arc<dyn CallAgent> = Arc::new(agent);

    let state = AppState {
        call_service: Arc::new(CallService::new(repo, agent)),
        listings: Arc::new(CarfaxClient::new(config.carfax_base_url.clone())),
    };

    let router = app(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!(
        "✅ Haggle API ready on port {} - try http://localhost:{}/api/sellers?zip=75007&radius=50",
        config.port,
        config.port
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    tracing::info!("👋 Haggle API stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{get, TestApp};

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new();

        let (status, body) = app.send(get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_cors_is_permissive() {
        let app = TestApp::new();
        let request = axum::http::Request::builder()
            .method("OPTIONS")
            .uri("/api/calls/submit")
            .header("Origin", "http://example.com")
            .header("Access-Control-Request-Method", "POST")
            .body(axum::body::Body::empty())
            .unwrap();

        let (status, _) = app.send(request).await;

        assert!(status.is_success());
    }
}
