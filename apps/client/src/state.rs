use std::sync::Arc;

use tracing::info;

use crate::analysis::difficulty::DifficultyTable;
use crate::api_client::ApiClient;
use crate::config::Config;
use crate::errors::AppError;
use crate::jobs::saved::SavedJobs;
use crate::session::auth::AuthSession;
use crate::session::store::{FileStore, KeyValueStore};

/// Everything a command handler needs, built once per process.
///
/// The key-value store is the single source of truth for persisted state;
/// `session` and `saved_jobs` share it, read it once at startup and write
/// through on every change.
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    pub session: AuthSession,
    pub saved_jobs: SavedJobs,
    pub difficulty: DifficultyTable,
}

impl AppState {
    pub fn open(config: Config) -> Result<Self, AppError> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(config.store_path())?);
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        let api = ApiClient::new(&config.api_url, config.timeout())?;
        Ok(Self {
            saved_jobs: SavedJobs::load(store.clone())?,
            session: AuthSession::new(store),
            difficulty: DifficultyTable::builtin()
                .with_fallback(config.fallback_difficulty, config.fallback_months),
            config,
            api,
        })
    }

    /// Restores the auth session from the stored token (fail-closed).
    pub async fn hydrate(&mut self) -> Result<(), AppError> {
        self.session.hydrate(&mut self.api).await?;
        info!(
            authenticated = self.session.is_authenticated(),
            saved_jobs = self.saved_jobs.len(),
            "state hydrated"
        );
        Ok(())
    }

    pub fn require_login(&self) -> Result<(), AppError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::difficulty::Difficulty;
    use crate::config::test_config;
    use crate::session::store::MemoryStore;

    #[test]
    fn test_fallback_estimate_comes_from_config() {
        let mut config = test_config("http://127.0.0.1:9");
        config.fallback_difficulty = Difficulty::Hard;
        config.fallback_months = 5;
        let state = AppState::with_store(config, Arc::new(MemoryStore::default())).unwrap();

        let profile = state.difficulty.lookup("COBOL");
        assert_eq!(profile.difficulty, Difficulty::Hard);
        assert_eq!(profile.months, 5);
        assert_eq!(state.difficulty.lookup("Git").months, 1);
    }
}
