pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;

use axum::middleware::from_fn;
use axum::{
    routing::{get, post},
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use config::Config;
use services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use services::providers::TextProvider;
use services::{CatalogService, ChatRepository, ChatService, Database, ProductRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub catalog: CatalogService,
    pub chat: ChatService,
}

/// Application container for managing server lifecycle.
///
/// The listener is bound during `build` (port 0 = random port for
/// testing); `run_until_stopped` serves until shutdown.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the Gemini provider from configuration.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key: config.gemini.api_key.expose_secret().clone(),
            model: config.gemini.model.clone(),
            api_base: config.gemini.api_base.clone(),
            timeout: Duration::from_secs(config.gemini.timeout_secs),
        });

        if provider.is_configured() {
            tracing::info!(model = %config.gemini.model, "Gemini text provider initialized");
        } else {
            tracing::warn!("GEMINI_API_KEY not configured - chat requests will fail upstream");
        }

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application with an explicit AI provider. Tests inject
    /// the deterministic mock here.
    pub async fn build_with_provider(
        config: Config,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let db = Database::connect(
            config.database.url.expose_secret(),
            config.database.max_connections,
        )
        .await?;

        db.run_migrations().await?;

        let seeded = db.seed_demo_products().await?;
        if seeded > 0 {
            tracing::info!(count = seeded, "Product catalog seeded");
        }

        let products = ProductRepository::new(&db);
        let history = ChatRepository::new(&db);

        let catalog = CatalogService::new(products.clone());
        let chat = ChatService::new(products, history, provider);

        let state = AppState {
            config: config.clone(),
            db,
            catalog,
            chat,
        };

        let router = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics))
            // Catalog endpoints (read-only)
            .route("/products", get(handlers::products::list_products))
            .route("/products/:id", get(handlers::products::get_product))
            // Chat endpoints
            .route("/chat", post(handlers::chat::send_message))
            .route(
                "/chat/history/:session_id",
                get(handlers::chat::session_history).delete(handlers::chat::clear_history),
            )
            .layer(from_fn(metrics_middleware))
            .layer(from_fn(request_id_middleware))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");

                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                }),
            )
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr: SocketAddr = format!("{}:{}", config.common.host, config.common.port)
            .parse()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid listen address: {}", e))
            })?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// The port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> Result<(), AppError> {
        tracing::info!("Listening on {}", self.listener.local_addr()?);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
