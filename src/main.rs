use std::sync::Arc;

use sqlx::mysql::MySqlPoolOptions;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cricket_analytics::adapters::http::{api_router, AnalyticsAppState, FeedAppState, PlayersAppState};
use cricket_analytics::adapters::{MySqlPlayerRepository, MySqlTableSource, RapidApiFeed};
use cricket_analytics::config::AppConfig;
use cricket_analytics::domain::analytics::BatchRunner;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    if config.is_production() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.validate()?;

    // Lazy so the dashboard starts even while the database is down
    let pool = MySqlPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect_lazy_with(config.database.connect_options()?);

    if !config.feed.has_api_key() {
        warn!("No feed API key configured; match and rankings requests will fail upstream");
    }
    let feed = RapidApiFeed::new(config.feed.rapidapi_config())?;

    let analytics = AnalyticsAppState {
        table_source: Arc::new(MySqlTableSource::new(pool.clone())),
        runner: Arc::new(BatchRunner::new()),
        row_cap: config.analytics.row_cap,
        probe_concurrency: config.analytics.probe_concurrency,
    };
    let feed = FeedAppState { feed: Arc::new(feed) };
    let players = PlayersAppState {
        repository: Arc::new(MySqlPlayerRepository::new(pool)),
    };

    let app = api_router(analytics, feed, players)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Cricket analytics listening");
    axum::serve(listener, app).await?;

    Ok(())
}
