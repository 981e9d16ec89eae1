use std::{net::SocketAddr, process, sync::Arc};

use clap::Parser;
use masterblog::{
    application::{error::AppError, posts::PostStore},
    config::{self, CliArgs},
    infra::{
        error::InfraError,
        http::{self, ApiRateLimiter, ApiState},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let cli = CliArgs::parse();
    let settings = config::load(&cli)
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let state = ApiState {
        store: Arc::new(PostStore::seeded()),
        rate_limiter: Arc::new(ApiRateLimiter::new(
            settings.rate_limit.window,
            settings.rate_limit.max_requests.get(),
        )),
    };

    let router = http::build_router(state, &settings.cors).map_err(AppError::from)?;

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "masterblog::server",
        addr = %settings.server.addr,
        "listening"
    );

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}
