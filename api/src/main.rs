use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use otp_api::telemetry::init_tracing;
use otp_api::{create_app, AppState};
use otp_core::{OsRngCodeGenerator, OtpLifecycleManager, OtpPolicy};
use otp_infra::{connect_store, load_config, TracingAuditSink};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        env_file = config.environment.env_file(),
        cache_type = ?config.cache.cache_type,
        max_requests_per_address = config.otp.max_requests_per_address,
        code_ttl_seconds = config.otp.code_ttl_seconds,
        trust_forwarded_headers = config.server.trust_forwarded_headers,
        "Starting OTP service v{}",
        env!("CARGO_PKG_VERSION")
    );

    let store = connect_store(&config.cache)
        .await
        .context("Failed to connect to the TTL store")?;
    info!(store = store.kind(), "TTL store ready");

    let otp_manager = Arc::new(OtpLifecycleManager::new(
        Arc::new(store),
        Arc::new(OsRngCodeGenerator),
        Arc::new(TracingAuditSink::new()),
        OtpPolicy::from(&config.otp),
    ));

    let app_state = web::Data::new(
        AppState::new(otp_manager, config.server.clone()).with_environment(config.environment),
    );

    let bind_address = config.server.bind_address();
    info!("Listening on http://{}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server terminated with an error")?;

    info!("OTP service stopped");
    Ok(())
}
