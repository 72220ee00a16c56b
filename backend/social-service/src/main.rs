use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use feed_service::{FeedSettings, PostgresPostStore};
use graph_service::{PostgresGraphRepository, PostgresUserDirectory};
use notification_service::{
    ConnectionManager, PostgresNotificationRepository, RealtimeChannel, RedisRealtimeChannel,
};
use social_service::config::{Config, LogFormat, RealtimeBackend};
use social_service::handlers;
use social_service::metrics::{serve_metrics, MetricsMiddleware};
use social_service::repository::{PostgresCommentRepository, PostgresLikeRepository};
use social_service::{AppState, Stores};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "social_service=info,graph_service=info,feed_service=info,\
     notification_service=info,actix_web=info";

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.logging.format);

    info!(
        "Starting social-service: env={}, port={}, realtime={:?}",
        config.app.env, config.app.http_port, config.realtime.backend
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    info!("Database pool created");

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations completed");

    let backend = config.realtime.backend;
    let hub = ConnectionManager::new();
    let channel: Arc<dyn RealtimeChannel> = match config.realtime.backend {
        RealtimeBackend::Local => Arc::new(hub.clone()),
        RealtimeBackend::Redis => Arc::new(
            RedisRealtimeChannel::connect(&config.realtime.redis_url)
                .await
                .context("Failed to connect to Redis")?,
        ),
    };
    if backend == RealtimeBackend::Redis {
        warn!("Realtime backend is redis; /ws/notifications is not served by this process");
    }

    let stores = Stores {
        graph: Arc::new(PostgresGraphRepository::new(pg_pool.clone())),
        users: Arc::new(PostgresUserDirectory::new(pg_pool.clone())),
        posts: Arc::new(PostgresPostStore::new(pg_pool.clone())),
        likes: Arc::new(PostgresLikeRepository::new(pg_pool.clone())),
        comments: Arc::new(PostgresCommentRepository::new(pg_pool.clone())),
        notifications: Arc::new(PostgresNotificationRepository::new(pg_pool.clone())),
    };
    let feed_settings = FeedSettings {
        default_page_size: config.feed.default_page_size,
        max_page_size: config.feed.max_page_size,
    };
    let state = AppState::build(
        stores,
        channel,
        hub,
        feed_settings,
        config.realtime.push_timeout(),
    );

    let bind_addr = format!("{}:{}", config.app.host, config.app.http_port);
    info!("Listening on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(MetricsMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .route("/health", web::get().to(handlers::health))
            .route("/health/ready", web::get().to(handlers::readiness))
            .route("/metrics", web::get().to(serve_metrics))
            .configure(handlers::configure_realtime(backend))
            .configure(handlers::configure)
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await
    .context("HTTP server error")?;

    info!("social-service shut down");
    Ok(())
}
