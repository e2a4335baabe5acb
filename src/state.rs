// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::provider::{CompletionProvider, OpenAiProvider};
use crate::services::rate_limiter::RateLimiter;
use crate::services::usage::{AdvisoryUsage, MySqlUsage, UsageStore};

pub type SharedState = Arc<AppState>;

/// Everything a request handler needs, built once at startup.
pub struct AppState {
    pub config: Config,
    pub rate_limiter: RateLimiter,
    pub provider: Arc<dyn CompletionProvider>,
    pub usage: Arc<dyn UsageStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        provider: Arc<dyn CompletionProvider>,
        usage: Arc<dyn UsageStore>,
    ) -> Self {
        Self {
            rate_limiter: RateLimiter::new(config.rate_limit_window, config.rate_limit_max),
            config,
            provider,
            usage,
        }
    }

    /// Wire the real provider, plus MySQL when every database setting is present.
    pub fn from_config(config: Config) -> Self {
        let provider = Arc::new(OpenAiProvider::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
        ));
        let usage: Arc<dyn UsageStore> = match &config.database {
            Some(db) => Arc::new(MySqlUsage::connect_lazy(db, config.max_daily_requests)),
            None => Arc::new(AdvisoryUsage::new(config.max_daily_requests)),
        };
        Self::new(config, provider, usage)
    }
}
