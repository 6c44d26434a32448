use std::time::Duration;
use tokio::time::sleep;
use tracing::{warn, info, error};

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn with_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Default::default()
        }
    }
}

/// Retry with exponential backoff. With `max_attempts == 1` the first
/// failure is returned as-is.
pub async fn retry_with_backoff<F, T, Fut, E>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    info!("Operation {} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => {
                if max_attempts > 1 {
                    error!("Operation {} failed after {} attempts: {}", operation_name, max_attempts, e);
                }
                return Err(e);
            }
            Err(e) => {
                warn!("Operation {} failed on attempt {}: {}", operation_name, attempt, e);
                sleep(calculate_delay(config, attempt)).await;
                attempt += 1;
            }
        }
    }
}

fn calculate_delay(config: &RetryConfig, attempt: u32) -> Duration {
    let delay_ms = config.base_delay.as_millis() as f64
        * config.backoff_multiplier.powi((attempt - 1) as i32);

    Duration::from_millis(delay_ms as u64).min(config.max_delay)
}
