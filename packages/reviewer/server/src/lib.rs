#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

pub mod error;
pub mod pull_request;
pub mod state;
pub mod team;
pub mod users;

use std::time::Duration;

use actix_web::{App, HttpServer, middleware, web};
use pr_reviewer::Services;
use state::AppState;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Budget for reading request headers and for each service call.
    pub request_timeout: Duration,
    /// How long in-flight requests get to finish once shutdown starts.
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout: Duration::from_secs(5),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

/// # Errors
///
/// Returns an error if the server fails to bind or run
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let RunServerResponse { join_handle, .. } = run_server_with_handle(&config)?;

    join_handle.await?
}

pub struct RunServerResponse {
    pub handle: actix_web::dev::ServerHandle,
    pub addrs: Vec<std::net::SocketAddr>,
    pub join_handle: JoinHandle<Result<(), std::io::Error>>,
}

/// Starts a server backed by fresh in-memory storage.
///
/// # Errors
///
/// Returns an error if the server fails to bind
pub fn run_server_with_handle(config: &ServerConfig) -> std::io::Result<RunServerResponse> {
    run_server_with_services(config, Services::in_memory())
}

/// # Errors
///
/// Returns an error if the server fails to bind
pub fn run_server_with_services(
    config: &ServerConfig,
    services: Services,
) -> std::io::Result<RunServerResponse> {
    log::info!(
        "Starting PR reviewer server on {}:{}",
        config.host,
        config.port
    );

    let state = web::Data::new(AppState::new(services, config.request_timeout));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(error::json_config())
            .app_data(error::query_config())
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .client_request_timeout(config.request_timeout)
    .shutdown_timeout(config.shutdown_timeout.as_secs())
    .bind((config.host.as_str(), config.port))?;

    let addrs = server.addrs();
    let server = server.run();
    let handle = server.handle();

    let join_handle = tokio::spawn(server);

    Ok(RunServerResponse {
        handle,
        addrs,
        join_handle,
    })
}

/// Registers every API route.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/team/add", web::post().to(team::add))
        .route("/team/get", web::get().to(team::get))
        .route("/users/setIsActive", web::post().to(users::set_is_active))
        .route("/users/getReview", web::get().to(users::get_review))
        .route("/pullRequest/create", web::post().to(pull_request::create))
        .route("/pullRequest/merge", web::post().to(pull_request::merge))
        .route("/pullRequest/reassign", web::post().to(pull_request::reassign))
        .route("/healthz", web::get().to(|| async { "OK" }));
}
