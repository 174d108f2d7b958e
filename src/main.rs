use crate::app_config::AppConfig;
use crate::invocation::{ConsoleInvocation, Invocation, Outcome};
use crate::particle::ParticleClient;
use crate::router::{invoke, parse_event};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app_config;
mod bridge_error;
mod domain;
mod invocation;
mod particle;
mod router;

/// Answers one voice-platform home-automation event against the Particle device cloud.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// File holding the event JSON, read from stdin when omitted
    event: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // stdout carries the result
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    let args = Args::parse();

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let raw = match &args.event {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            raw
        }
    };

    let client = ParticleClient::new(Arc::new(config))?;
    let invocation = ConsoleInvocation::new(std::io::stdout().lock());

    let exit_code = match parse_event(&raw) {
        Ok(event) => invoke(&client, &event, invocation).await?,
        Err(envelope) => invocation.complete(Outcome::Fail(envelope))?,
    };

    Ok(exit_code)
}
