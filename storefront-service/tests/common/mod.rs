//! Test helper module for storefront-service integration tests.
//!
//! Each test gets its own SQLite database file and a server on a random
//! port. The Gemini API base defaults to an unreachable address; chat
//! tests point it at a wiremock server or inject the mock provider.

#![allow(dead_code)]

use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use storefront_service::config::{Config, DatabaseConfig, GeminiSettings};
use storefront_service::services::init_metrics;
use storefront_service::services::providers::TextProvider;
use storefront_service::Application;
use tempfile::NamedTempFile;

/// Test application with a running HTTP server.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    _db_file: NamedTempFile,
}

impl TestApp {
    /// Spawn with the default (unreachable) upstream.
    pub async fn spawn() -> Self {
        Self::spawn_with_upstream(None).await
    }

    /// Spawn with the Gemini client pointed at the given base URL.
    pub async fn spawn_with_upstream(upstream_base: Option<String>) -> Self {
        let db_file = new_db_file();
        let config = test_config(&db_file, upstream_base);

        let app = Application::build(config)
            .await
            .expect("Failed to build application");

        Self::from_built(app, db_file)
    }

    /// Spawn with an explicit AI provider (e.g. the deterministic mock).
    pub async fn spawn_with_provider(provider: Arc<dyn TextProvider>) -> Self {
        let db_file = new_db_file();
        let config = test_config(&db_file, None);

        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build application");

        Self::from_built(app, db_file)
    }

    fn from_built(app: Application, db_file: NamedTempFile) -> Self {
        init_metrics();

        let port = app.port();

        tokio::spawn(async move {
            let _ = app.run_until_stopped().await;
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
            _db_file: db_file,
        }
    }
}

fn new_db_file() -> NamedTempFile {
    NamedTempFile::new().expect("Failed to create temp database file")
}

fn test_config(db_file: &NamedTempFile, upstream_base: Option<String>) -> Config {
    Config {
        common: CoreConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: Secret::new(format!("sqlite://{}", db_file.path().display())),
            max_connections: 5,
        },
        gemini: GeminiSettings {
            api_key: Secret::new("test-api-key".to_string()),
            model: "gemini-2.0-flash".to_string(),
            // Nothing listens on the discard port; calls fail fast.
            api_base: upstream_base.unwrap_or_else(|| "http://127.0.0.1:9".to_string()),
            timeout_secs: 5,
        },
    }
}
