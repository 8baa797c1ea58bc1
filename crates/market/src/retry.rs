use std::future::Future;
use std::time::Duration;

use tracing::warn;

use common::Result;

const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Bounded retry with exponential backoff.
///
/// Runs `op` once, then up to `retries` more times while it fails, sleeping
/// `initial_backoff`, doubling each time (capped at 30s). Returns the last
/// error if every attempt fails.
pub async fn with_retry<T, F, Fut>(
    what: &str,
    retries: u32,
    initial_backoff: Duration,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut backoff = initial_backoff;
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < retries => {
                attempt += 1;
                warn!(what, attempt, error = %e, backoff = ?backoff, "Fetch failed, retrying");
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
            Err(e) => return Err(e),
        }
    }
}
