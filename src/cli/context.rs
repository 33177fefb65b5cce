use std::sync::OnceLock;

use crate::adapters::backend::gpg_backend::GpgBackend;
use crate::config::app_config::AppConfig;
use crate::core::services::key_catalog::KeyCatalog;
use crate::core::services::orchestrator::Orchestrator;

static CONTEXT: OnceLock<AppContext> = OnceLock::new();

/// Process-wide state: one orchestrator over one gpg backend, and the
/// key catalog, which is read from the keyring the first time it is
/// needed and never changes afterwards.
pub struct AppContext {
    pub config: AppConfig,
    orchestrator: Orchestrator<GpgBackend>,
    catalog: OnceLock<KeyCatalog>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let backend = GpgBackend::with_path(config.gpg.binary.clone())
            .with_homedir(config.gpg.homedir.clone());
        let orchestrator = Orchestrator::new(backend).with_overwrite(config.output.overwrite);

        Self {
            config,
            orchestrator,
            catalog: OnceLock::new(),
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator<GpgBackend> {
        &self.orchestrator
    }

    pub fn catalog(&self) -> &KeyCatalog {
        self.catalog.get_or_init(|| {
            KeyCatalog::load(
                self.orchestrator.backend(),
                &self.config.keyring.exclude_marker,
            )
        })
    }
}

/// Initialize the global context. Later calls return the first one.
pub fn init(config: AppConfig) -> &'static AppContext {
    CONTEXT.get_or_init(|| AppContext::new(config))
}
