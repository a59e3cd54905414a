use std::sync::Arc;

use tolk_dal::Pool;

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(app_config: AppConfig, pool: Pool) -> Self {
        AppState {
            state: Arc::new(AppStateInner { app_config, pool }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.app_config
    }

    pub fn pool(&self) -> &Pool {
        &self.state.pool
    }
}

// Validation context for garde-validated extractors
impl axum::extract::FromRef<AppState> for () {
    fn from_ref(_input: &AppState) -> Self {}
}

struct AppStateInner {
    pool: Pool,
    app_config: AppConfig,
}

pub struct AppConfig {
    /// Maximum number of records returned by list endpoints.
    pub list_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { list_limit: 100 }
    }
}
