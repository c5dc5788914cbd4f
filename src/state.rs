use crate::catalog::Catalog;
use crate::config::{AppConfig, LedgerBackend};
use crate::ledger::{JsonFileLedger, LedgerStore, MemoryLedger};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<Catalog>,
    pub ledger: Arc<dyn LedgerStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let catalog = match &config.catalog_path {
            Some(path) => {
                let catalog = Catalog::from_file(path).await?;
                info!(path = %path.display(), entries = catalog.entries.len(), "catalog loaded");
                catalog
            }
            None => Catalog::builtin(),
        };

        let ledger = match config.ledger_backend {
            LedgerBackend::File => {
                info!(path = %config.ledger_path.display(), "using json file ledger");
                Arc::new(JsonFileLedger::new(config.ledger_path.clone())) as Arc<dyn LedgerStore>
            }
            LedgerBackend::Memory => {
                info!("using in-memory ledger");
                Arc::new(MemoryLedger::new()) as Arc<dyn LedgerStore>
            }
        };

        Ok(Self::from_parts(config, Arc::new(catalog), ledger))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        catalog: Arc<Catalog>,
        ledger: Arc<dyn LedgerStore>,
    ) -> Self {
        Self {
            config,
            catalog,
            ledger,
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::from_parts(
            Arc::new(AppConfig {
                ledger_backend: LedgerBackend::Memory,
                ..AppConfig::default()
            }),
            Arc::new(Catalog::builtin()),
            Arc::new(MemoryLedger::new()),
        )
    }
}
