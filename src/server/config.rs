use std::{env, path::PathBuf};

/// Default listen address of the state service.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
/// Default state file, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = "squareState.json";
/// Origin of the browser UI's dev server.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Runtime settings for the state service.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ServerConfig {
    /// `host:port` to listen on.
    pub bind: String,
    /// JSON file holding the square state.
    pub state_file: PathBuf,
    /// Browser origins allowed by CORS. Empty disables the CORS layer.
    pub cors_origins: Vec<String>,
    /// Maximum accepted request body size.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            max_body_bytes: 64 * 1024,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `BLOCKPARTY_*` environment variables. Unparseable values
    /// keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind = non_empty("BLOCKPARTY_BIND")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.bind);
        let state_file = non_empty("BLOCKPARTY_STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.state_file);
        let cors_origins = lookup("BLOCKPARTY_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);
        let max_body_bytes = non_empty("BLOCKPARTY_MAX_BODY_BYTES")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.max_body_bytes);

        Self {
            bind,
            state_file,
            cors_origins,
            max_body_bytes,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/server/config.rs"]
mod tests;
