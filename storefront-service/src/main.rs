use service_core::observability::init_tracing;
use storefront_service::config::Config;
use storefront_service::services::init_metrics;
use storefront_service::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("storefront-service", "info,storefront_service=debug");
    init_metrics();

    let config = Config::load()?;

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
