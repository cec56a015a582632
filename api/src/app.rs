//! Application state and factory
//!
//! This module holds the shared application state and provides the factory
//! for creating the Actix-web application.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware::Logger, web, App};

use otp_core::{AuditSink, CodeGenerator, OtpLifecycleManager, TtlStore};
use otp_shared::{Environment, ServerConfig};

use crate::handlers::{json_error_handler, not_found};
use crate::middleware::{create_cors, security_headers};
use crate::routes::health::health_check;
use crate::routes::otp::{request_otp, verify_otp};

/// Application state shared by all workers
pub struct AppState<S, G, A>
where
    S: TtlStore,
    G: CodeGenerator,
    A: AuditSink,
{
    pub otp_manager: Arc<OtpLifecycleManager<S, G, A>>,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl<S, G, A> AppState<S, G, A>
where
    S: TtlStore,
    G: CodeGenerator,
    A: AuditSink,
{
    pub fn new(otp_manager: Arc<OtpLifecycleManager<S, G, A>>, server: ServerConfig) -> Self {
        Self {
            otp_manager,
            server,
            environment: Environment::default(),
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }
}

/// Create and configure the application with all dependencies
///
/// The response body type is left opaque because each middleware layer
/// (logger, CORS, default headers) wraps it in its own body type.
pub fn create_app<S, G, A>(
    app_state: web::Data<AppState<S, G, A>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: TtlStore + 'static,
    G: CodeGenerator + 'static,
    A: AuditSink + 'static,
{
    let cors = create_cors(app_state.environment);
    let json_config = web::JsonConfig::default()
        .limit(app_state.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(security_headers())
        .wrap(cors)
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check::<S, G, A>))
        .service(
            web::scope("/api/otp")
                .route("/request", web::post().to(request_otp::<S, G, A>))
                .route("/verify", web::post().to(verify_otp::<S, G, A>)),
        )
        .default_service(web::route().to(not_found))
}
