use std::sync::Arc;

use crate::core::config::{AppConfig, AppPaths, ConfigService};
use crate::core::errors::ApiError;
use crate::domains::DomainCatalog;
use crate::knowledge::KnowledgeCache;
use crate::llm::{LlmProvider, OpenAiProvider};
use crate::session::SessionManager;

/// Process-wide state shared across all routes.
///
/// The provider configuration is read-only after initialization; all
/// mutable conversation state lives inside the per-session entries of
/// the session manager.
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub config: AppConfig,
    pub catalog: DomainCatalog,
    pub provider: Arc<dyn LlmProvider>,
    pub knowledge: KnowledgeCache,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn initialize() -> Result<Arc<Self>, ApiError> {
        let paths = Arc::new(AppPaths::new());
        let config_service = ConfigService::new(paths.clone());
        let config = config_service.load()?;
        let api_key = config_service.api_key()?;

        let provider: Arc<dyn LlmProvider> =
            Arc::new(OpenAiProvider::new(config.api_base_url.clone(), api_key));

        Ok(Arc::new(AppState {
            paths,
            config,
            catalog: DomainCatalog::new(),
            provider,
            knowledge: KnowledgeCache::new(),
            sessions: SessionManager::new(),
        }))
    }

    #[cfg(test)]
    pub fn for_tests(provider: Arc<dyn LlmProvider>, knowledge_dir: std::path::PathBuf) -> Self {
        let paths = AppPaths {
            project_root: knowledge_dir.clone(),
            log_dir: knowledge_dir.join("logs"),
            knowledge_dir,
        };

        AppState {
            paths: Arc::new(paths),
            config: AppConfig::default(),
            catalog: DomainCatalog::new(),
            provider,
            knowledge: KnowledgeCache::new(),
            sessions: SessionManager::new(),
        }
    }
}
