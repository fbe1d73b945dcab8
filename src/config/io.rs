use crate::config::AppConfig;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };
    parse_config(&contents).unwrap_or_else(|err| {
        warn!(path = %path.display(), "Invalid config TOML: {err}");
        AppConfig::default()
    })
}

pub(crate) fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    let cfg = toml::from_str::<AppConfig>(contents)?;
    debug!("Parsed configuration from disk");
    Ok(cfg)
}
