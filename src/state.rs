use std::sync::Arc;

use crate::{config::Config, filter::Pipeline};
use axum::extract::FromRef;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    /// The `comment_text` pipeline every read path renders through.
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let pipeline = Arc::new(Pipeline::from_options(&config.filter));
        Self {
            pool,
            config,
            pipeline,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<Pipeline> {
    fn from_ref(state: &AppState) -> Self {
        state.pipeline.clone()
    }
}
