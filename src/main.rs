use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use std::sync::Arc;

mod api;
mod attendance;
mod auth;
mod config;
mod db;
mod docs;
mod model;
mod models;
mod routes;
mod store;

use attendance::{ScanClock, ScanProcessor};
use config::Config;
use db::init_db;
use store::mysql::{MySqlOfficeDirectory, MySqlRecordStore};
use store::office_cache::CachedOfficeDirectory;
use store::{OfficeDirectory, RecordStore};

use tracing::info;
use tracing_appender::rolling;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Geo Attendance"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await?;

    let records: Arc<dyn RecordStore> = Arc::new(MySqlRecordStore::new(pool.clone()));
    let offices: Arc<dyn OfficeDirectory> = Arc::new(CachedOfficeDirectory::new(
        MySqlOfficeDirectory::new(pool),
        config.office_cache_capacity,
        config.office_cache_ttl,
    ));
    let processor = ScanProcessor::new(records.clone(), offices);

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();
    let openapi = docs::api_doc(&config.api_prefix);

    info!(addr = %server_addr, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", openapi.clone()),
            )
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(processor.clone()))
            .app_data(Data::new(ScanClock::local()))
            .app_data(Data::from(records.clone()))
            .service(index)
            // attendance routes behind auth + rate limiting
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await
    .context("Server terminated with an error")
}
