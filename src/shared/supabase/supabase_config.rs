use reqwest::Url;
use std::time::Duration;

use crate::shared::config::{self, ConfigError};

/// supabase-js lists 100 objects per request by default.
const DEFAULT_LIST_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    base_url: Url,
    anon_key: String,
    list_page_size: usize,
    connect_timeout: Option<Duration>,
}

impl SupabaseConfig {
    /// Env vars: `SUPABASE_URL`, `SUPABASE_ANON_KEY` (required),
    /// `SUPABASE_LIST_PAGE_SIZE`, `SUPABASE_CONNECT_TIMEOUT_SECS` (optional).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::new(
            &config::required("SUPABASE_URL")?,
            config::required("SUPABASE_ANON_KEY")?,
        )?;

        if let Some(size) = config::optional::<usize>("SUPABASE_LIST_PAGE_SIZE")? {
            cfg = cfg.with_list_page_size(size);
        }
        if let Some(secs) = config::optional::<u64>("SUPABASE_CONNECT_TIMEOUT_SECS")? {
            cfg.connect_timeout = Some(Duration::from_secs(secs));
        }

        Ok(cfg)
    }

    pub fn new(base_url: &str, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::Invalid {
            name: "SUPABASE_URL",
            value: base_url.to_string(),
        };

        let parsed = Url::parse(base_url.trim()).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(invalid());
        }

        Ok(Self {
            base_url: parsed,
            anon_key: anon_key.into(),
            list_page_size: DEFAULT_LIST_PAGE_SIZE,
            connect_timeout: None,
        })
    }

    pub fn with_list_page_size(mut self, size: usize) -> Self {
        self.list_page_size = size.max(1);
        self
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    pub fn list_page_size(&self) -> usize {
        self.list_page_size
    }

    /// Base URL with `segments` appended, each one percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base() was rejected in new(), so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder.build()
    }
}
