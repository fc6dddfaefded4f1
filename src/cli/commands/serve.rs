//! Serve command: the HTTP upload service

use super::shared::{load_configuration, setup_logging};
use crate::app::adapters::http;
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::Result;
use tracing::{debug, info};

/// Serve command runner
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    args.validate()?;
    let config = apply_serve_overrides(load_configuration(&args.common)?, &args);
    config.validate()?;
    setup_logging(&config.logging.level, args.common.quiet)?;

    info!("Starting Fridge-tag API");
    debug!("Loaded configuration: {:?}", config);

    http::serve(&config).await
}

/// Apply serve-specific command-line overrides to configuration
pub fn apply_serve_overrides(mut config: Config, args: &ServeArgs) -> Config {
    if let Some(host) = &args.host {
        config = config.with_host(host.as_str());
    }
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(bytes) = args.max_upload_bytes {
        config = config.with_max_upload_bytes(bytes);
    }
    if args.allow_any_extension {
        config = config.without_txt_extension_check();
    }
    if let Some(level) = args.get_log_level() {
        config = config.with_log_level(level);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::CommonArgs;

    #[test]
    fn test_overrides_only_touch_given_values() {
        let args = ServeArgs {
            host: None,
            port: Some(9001),
            max_upload_bytes: None,
            allow_any_extension: true,
            common: CommonArgs {
                verbose: 2,
                ..Default::default()
            },
        };
        let config = apply_serve_overrides(Config::default(), &args);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.max_upload_bytes, 10 * 1024 * 1024);
        assert!(!config.server.require_txt_extension);
        assert_eq!(config.logging.level, "debug");
    }
}
