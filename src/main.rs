use crate::pipeline::Pipeline;
use crate::responses::html_error_response;
use crate::router::handle;
use crate::scraper::build_transport;
use crate::settings::AppConfig;
use astra::Server;
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod domain;
mod errors;
mod pipeline;
mod responses;
mod router;
mod scraper;
mod settings;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1️⃣ Load configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ Build the one transport this process uses
    let transport = match build_transport(&config.transport) {
        Ok(transport) => transport,
        Err(e) => {
            error!("❌ Transport setup failed: {e}");
            std::process::exit(1);
        }
    };
    let base = match url::Url::parse(&config.transport.base_url) {
        Ok(base) => base,
        Err(e) => {
            error!("❌ Bad base_url: {e}");
            std::process::exit(1);
        }
    };
    let pipeline = Pipeline::new(transport, base);

    // 3️⃣ Start the server
    let addr: SocketAddr = match format!("{}:{}", config.server.host, config.server.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("❌ Bad server address: {e}");
            std::process::exit(1);
        }
    };
    info!(transport = pipeline.transport_name(), "Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(config.server.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &pipeline) {
        Ok(resp) => resp,
        Err(err) => html_error_response(err),
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
