use std::future::Future;

use log::info;

use super::FetchResult;

/// Run `attempt`, repeating it exactly once if the first failure is timeout-class.
pub async fn retry_once_on_timeout<T, F, Fut>(label: &str, mut attempt: F) -> FetchResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = FetchResult<T>>,
{
    match attempt().await {
        Err(err) if err.is_retryable() => {
            info!("{label}: {} ({}), retrying once", err.kind().as_str(), err.detail());
            attempt().await
        }
        other => other,
    }
}
