pub mod catalog;
pub mod chat;
pub mod database;
pub mod metrics;
pub mod providers;
pub mod repository;

pub use catalog::CatalogService;
pub use chat::ChatService;
pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
pub use repository::{ChatRepository, ProductRepository};
