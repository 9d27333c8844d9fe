use faultline::app;
use faultline::utils::config::{LogConfig, ServerConfig};
use faultline::utils::telemetry;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let log_config = LogConfig::from_env().expect("Invalid logger configuration");
    telemetry::init(&log_config).expect("Failed to initialize logger");

    let server_config = ServerConfig::from_env().expect("Invalid server configuration");

    let listener = TcpListener::bind(server_config.addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %server_config.addr, "Server starting");

    axum::serve(listener, app().into_make_service())
        .await
        .expect("Server terminated unexpectedly");
}
