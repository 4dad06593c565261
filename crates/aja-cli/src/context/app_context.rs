use aja_client::AjaClient;
use aja_config::AjaConfig;
use aja_state::auth::AuthState;
use aja_state::history::{HistoryStore, ReportHistory};
use aja_state::store::FileStore;

/// Shared resources initialized once per invocation.
pub struct AppContext {
    pub config: AjaConfig,
    pub client: AjaClient,
    pub auth: AuthState,
    pub history: HistoryStore,
}

impl AppContext {
    /// Build the HTTP client and open the data directory.
    pub fn init(config: AjaConfig) -> Self {
        let data_dir = config.general.data_dir();
        tracing::debug!(data_dir = %data_dir.display(), "opening client state");

        let store = FileStore::new(data_dir);
        let client = AjaClient::new(&config.api);
        let auth = AuthState::load(store.clone());
        let history = HistoryStore::new(store, config.general.history_limit);

        Self {
            config,
            client,
            auth,
            history,
        }
    }

    pub fn load_history(&self) -> ReportHistory {
        self.history.load()
    }

    pub fn page_size(&self) -> u32 {
        self.config.general.page_size
    }
}
