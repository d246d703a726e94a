use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::add_log;

pub async fn run() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();

    let config_service = ConfigService::new();
    let loaded = config_service.load();

    let filter = match &loaded {
        Ok(config) => config.log_filter.as_str(),
        Err(_) => "info",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();

    let config = loaded.map_err(|err| {
        tracing::error!(
            error = %err,
            config_file = %config_service.config_file().display(),
            "Failed to load configuration"
        );
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
    })?;

    let logs = Arc::new(Mutex::new(Vec::new()));
    let state = Arc::new(crate::infrastructure::bootstrap::setup(&config, &logs));

    let server =
        crate::interfaces::http::start_server(state, logs.clone(), &config.host, config.port)?;

    add_log(
        &logs,
        "INFO",
        "System",
        &format!(
            "HTTP server started on {}:{}",
            config.host, config.port
        ),
    );

    server.await
}
