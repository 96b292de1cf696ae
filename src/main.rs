use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use konnect_match::config::Settings;
use konnect_match::core::Matcher;
use konnect_match::routes::{self, AppState};
use konnect_match::services::{CacheManager, SupabaseClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting Konnect match service...");

    // KONNECT_CONFIG points at an explicit config file instead of config/
    let settings = match std::env::var("KONNECT_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    }
    .map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    let timeout = Duration::from_secs(settings.supabase.timeout_secs.unwrap_or(30));
    let store = SupabaseClient::new(
        settings.supabase.url.clone(),
        settings.supabase.service_key.clone(),
        settings.tables.clone().into(),
        timeout,
    )
    .map_err(|e| {
        error!("Failed to create Supabase client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!(
        "Supabase client initialized for {} (lookup column: {})",
        settings.supabase.url,
        store.tables().id_column
    );

    // Redis is optional - fall back to the in-process tier alone
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(60);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = match settings.cache.redis_url.as_deref() {
        Some(redis_url) => match CacheManager::new(redis_url, l1_cache_size, cache_ttl).await {
            Ok(cache) => cache,
            Err(e) => {
                warn!("Failed to connect to Redis ({}), using in-memory cache only", e);
                CacheManager::in_memory(l1_cache_size, cache_ttl)
            }
        },
        None => CacheManager::in_memory(l1_cache_size, cache_ttl),
    };

    info!(
        "Cache manager initialized (L1: {} entries, TTL: {}s, Redis: {})",
        l1_cache_size,
        cache_ttl,
        cache.has_redis()
    );

    let weights = settings.weights().map_err(|e| {
        error!("Invalid scoring weights: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", matcher.weights());

    let app_state = AppState {
        store: Arc::new(store),
        cache: Arc::new(cache),
        matcher,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
