use crate::app_config::BridgeSettings;
use env_logger::Builder;
use log::LevelFilter;

/// Log level precedence: `--debug`, then the settings' `log_level`, then info.
pub fn initialize_logging(settings: Option<&BridgeSettings>, cli_matches: &clap::ArgMatches) {
    let mut builder = Builder::new();

    let log_level_str = if cli_matches.get_flag("debug") {
        "debug".to_string()
    } else {
        settings
            .and_then(|s| s.log_level.clone())
            .unwrap_or_else(|| "info".to_string())
    };

    let (filter, unrecognized) = level_filter(&log_level_str);
    builder.filter_level(filter);
    // reqwest/hyper internals are noisy at debug
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("reqwest", LevelFilter::Info);

    builder.try_init().unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {}. Logging might not work as expected.", e);
    });
    if unrecognized {
        log::warn!("Unrecognized log level '{}', defaulting to info.", log_level_str);
    }
}

fn level_filter(level: &str) -> (LevelFilter, bool) {
    match level.to_lowercase().as_str() {
        "off" => (LevelFilter::Off, false),
        "error" => (LevelFilter::Error, false),
        "warn" => (LevelFilter::Warn, false),
        "info" => (LevelFilter::Info, false),
        "debug" => (LevelFilter::Debug, false),
        "trace" => (LevelFilter::Trace, false),
        _ => (LevelFilter::Info, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_levels_fall_back_to_info() {
        assert_eq!(level_filter("DEBUG"), (LevelFilter::Debug, false));
        assert_eq!(level_filter("verbose"), (LevelFilter::Info, true));
    }
}
