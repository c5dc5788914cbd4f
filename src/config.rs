use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerBackend {
    File,
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub ledger_path: PathBuf,
    pub ledger_backend: LedgerBackend,
    pub catalog_path: Option<PathBuf>,
    pub images_dir: PathBuf,
    pub public_base_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            ledger_path: PathBuf::from("user_data.json"),
            ledger_backend: LedgerBackend::File,
            catalog_path: None,
            images_dir: PathBuf::from("static/images"),
            public_base_url: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let port = match std::env::var("PORT") {
            Ok(v) => v
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {v:?}"))?,
            Err(_) => defaults.port,
        };

        let ledger_backend = match std::env::var("LEDGER_BACKEND") {
            Ok(v) => match v.trim().to_lowercase().as_str() {
                "file" => LedgerBackend::File,
                "memory" => LedgerBackend::Memory,
                other => anyhow::bail!("unknown LEDGER_BACKEND {other:?} (expected file or memory)"),
            },
            Err(_) => defaults.ledger_backend,
        };

        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or(defaults.host),
            port,
            ledger_path: std::env::var("LEDGER_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.ledger_path),
            ledger_backend,
            catalog_path: non_empty_var("CATALOG_PATH").map(PathBuf::from),
            images_dir: std::env::var("IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.images_dir),
            public_base_url: non_empty_var("PUBLIC_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string()),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
