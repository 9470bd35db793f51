//! Server construction and background task wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{error, info};

use menuplan::domain::SessionManager;
use menuplan::inbound::http::api_scope;
use menuplan::inbound::http::state::HttpState;
use state_builders::{AppServices, build_services};

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(http_state).service(api_scope())
}

/// Periodically remove sessions nobody will resolve again.
fn spawn_session_sweeper(sessions: Arc<SessionManager>, every: Duration) {
    actix_web::rt::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(err) = sessions.sweep_expired().await {
                error!(error = %err, "session sweep failed");
            }
        }
    });
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        session_policy,
        sweep_interval,
    } = config;
    let AppServices {
        http_state,
        sessions,
    } = build_services(session_policy);

    if let Some(every) = sweep_interval {
        info!(interval_secs = every.as_secs(), "session sweeper enabled");
        spawn_session_sweeper(sessions, every);
    }

    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(bind_addr)?
        .run();
    Ok(server)
}
