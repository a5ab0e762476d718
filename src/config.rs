// Runtime configuration, read from the environment with sensible defaults.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to listen on. `PORT`, default 5000.
    pub port: u16,
    /// Path of the persisted JSON blob. `DATA_FILE`, default `data.json`.
    pub data_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            data_file: PathBuf::from("data.json"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let data_file = std::env::var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_file);
        Self { port, data_file }
    }
}
