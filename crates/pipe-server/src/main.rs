//! Cache service entry point
//!
//! Run with:
//! ```bash
//! cargo run -p pipe-server
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.
//! Send `SIGHUP` to reload every cache from the database.

use pipe_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::from_settings(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        fallback_image = %config.cache.fallback_image_path.display(),
        "Starting cache service"
    );

    if let Err(e) = pipe_server::run(config).await {
        error!(code = e.error_code(), error = %e, "Cache service failed");
        std::process::exit(1);
    }
}
