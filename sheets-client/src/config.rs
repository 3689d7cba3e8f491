//! Client configuration

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Configuration for [`crate::SheetsClient`]
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// The script deployment URL (single POST endpoint)
    pub endpoint: String,
    /// Hard timeout per attempt
    pub timeout: Duration,
    /// Retry behavior across attempts
    pub retry: RetryPolicy,
}

impl SheetsConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
