use etl_sql_service::ServiceConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();

    let config = ServiceConfig::from_env();

    if let Err(e) = etl_sql_service::server::run(config).await {
        tracing::error!("Failed to run SQL generation service: {:#}", e);
        std::process::exit(1);
    }
}
