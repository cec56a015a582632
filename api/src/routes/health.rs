use std::collections::HashMap;
use std::time::Instant;

use actix_web::{web, HttpResponse};

use otp_core::{AuditSink, CodeGenerator, TtlStore};
use otp_shared::{HealthResponse, HealthStatus, ServiceHealth};

use crate::app::AppState;

/// Handler for GET /health
///
/// Pings the TTL store; any store failure makes the service unhealthy
/// and the response 503.
pub async fn health_check<S, G, A>(state: web::Data<AppState<S, G, A>>) -> HttpResponse
where
    S: TtlStore + 'static,
    G: CodeGenerator + 'static,
    A: AuditSink + 'static,
{
    let started = Instant::now();
    let store = match state.otp_manager.store().health_check().await {
        Ok(()) => ServiceHealth {
            status: HealthStatus::Healthy,
            message: None,
            response_time_ms: Some(started.elapsed().as_millis() as u64),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            ServiceHealth {
                status: HealthStatus::Unhealthy,
                message: Some(e.to_string()),
                response_time_ms: Some(started.elapsed().as_millis() as u64),
            }
        }
    };

    let mut services = HashMap::new();
    services.insert(
        "api".to_string(),
        ServiceHealth {
            status: HealthStatus::Healthy,
            message: None,
            response_time_ms: None,
        },
    );
    services.insert("store".to_string(), store);

    let health = HealthResponse::from_services(services, env!("CARGO_PKG_VERSION"));
    match health.status {
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(health),
        _ => HttpResponse::Ok().json(health),
    }
}
