#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else, clippy::missing_errors_doc)]

use crate::{
    config::RuntimeConfiguration,
    error::{BindListenerSnafu, RosterResult, ServeSnafu},
    routes::router,
    state::RosterState,
    store::InMemoryStudentStore,
};
use snafu::ResultExt;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod config;
mod context;
mod data;
mod error;
mod routes;
mod service;
mod state;
mod store;

async fn shutdown_signal(state: RosterState) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    state.sensible_shutdown();
    warn!("signal received, starting graceful shutdown");
}

async fn serve(config: RuntimeConfiguration) -> RosterResult<()> {
    let address = config.server_config().server_address;
    let state = RosterState::new(Arc::new(InMemoryStudentStore::new()), config);
    let app = router(state.clone());

    let listener = TcpListener::bind(address)
        .await
        .context(BindListenerSnafu { address })?;

    info!(?address, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .context(ServeSnafu)
}

#[tokio::main]
async fn main() {
    //a missing .env is fine, everything has a default
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            panic!("unable to load env vars: {e}");
        }
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roster=info"));
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_env_filter(env_filter).finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");

    let config = RuntimeConfiguration::new().expect("unable to create config");
    debug!(?config, "Loaded config");

    if let Err(e) = serve(config).await {
        error!(?e, "Error serving roster");
        std::process::exit(1);
    }
}
