//! SQLite-backed product store.
//!
//! Owns the connection pool and the data lifecycle: migrations and the
//! one-time demo seed. All query traffic goes through the repositories.

use crate::models::NewProduct;
use service_core::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

/// Demo catalog inserted when the product table is empty:
/// (name, brand, category, size, color, price, stock, description).
const DEMO_PRODUCTS: &[(&str, &str, &str, &str, &str, f64, i64, &str)] = &[
    ("Pegasus 40", "Nike", "Running", "42", "Black", 120.0, 8, "Daily running shoe"),
    ("Ultraboost Light", "Adidas", "Running", "42", "White", 150.0, 5, "Premium cushioning"),
    ("Suede Classic", "Puma", "Casual", "41", "Blue", 80.0, 12, "Suede classic"),
    ("Classic Leather", "Reebok", "Casual", "42", "White", 90.0, 10, "Urban classic"),
    ("Fresh Foam 1080", "New Balance", "Running", "42", "Grey", 160.0, 6, "Soft cushioning"),
    ("Gel-Cumulus 25", "ASICS", "Running", "42", "Blue", 140.0, 7, "Daily trainer"),
    ("Madrid", "Hush Puppies", "Formal", "42", "Brown", 110.0, 4, "Dress shoe"),
    ("Chuck 70", "Converse", "Casual", "42", "Black", 75.0, 15, "Canvas classic"),
    ("Old Skool", "Vans", "Casual", "42", "Black", 70.0, 20, "Skate classic"),
    ("Go Run Ride 11", "Skechers", "Running", "42", "Red", 95.0, 9, "Light and comfortable"),
];

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new connection pool, creating the database file (and its
    /// parent directory) when missing.
    #[instrument(skip(database_url), fields(service = "storefront-service"))]
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        ensure_parent_dir(database_url)?;

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Invalid database URL: {}", e))
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!(max_connections = max_connections, "SQLite connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Seed the demo catalog when the product table is empty. Returns the
    /// number of rows inserted (zero when the table already has data).
    #[instrument(skip(self))]
    pub async fn seed_demo_products(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to count products: {}", e))
            })?;

        if count > 0 {
            return Ok(0);
        }

        let mut inserted = 0u64;
        for (name, brand, category, size, color, price, stock, description) in DEMO_PRODUCTS {
            let product = NewProduct {
                name: name.to_string(),
                brand: brand.to_string(),
                category: category.to_string(),
                size: size.to_string(),
                color: color.to_string(),
                price: *price,
                stock: *stock,
                description: description.to_string(),
            };
            product
                .validate()
                .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Invalid seed row: {}", e)))?;

            sqlx::query(
                r#"
                INSERT INTO products (name, brand, category, size, color, price, stock, description)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(&product.name)
            .bind(&product.brand)
            .bind(&product.category)
            .bind(&product.size)
            .bind(&product.color)
            .bind(product.price)
            .bind(product.stock)
            .bind(&product.description)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to seed product: {}", e))
            })?;
            inserted += 1;
        }

        info!(count = inserted, "Seeded demo product catalog");
        Ok(inserted)
    }
}

/// `sqlite://data/storefront.db` needs `data/` to exist before the driver
/// can create the file.
fn ensure_parent_dir(database_url: &str) -> Result<(), AppError> {
    let Some(raw_path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = raw_path.split('?').next().unwrap_or(raw_path);
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
