use std::future::Future;
use std::time::Duration;
use tokio::signal;
use tokio::sync::oneshot;

/// Resolves on Ctrl+C or SIGTERM. A handler that fails to install never fires.
pub async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, initiating graceful shutdown");
        }
    }

    tracing::info!(
        timeout_secs = timeout.as_secs(),
        "allowing connections to drain"
    );
}

/// Drives `server` to completion, but once `signalled` fires it only gets
/// `timeout` more to drain before it is dropped.
pub async fn with_drain_deadline<F, E>(
    server: F,
    signalled: oneshot::Receiver<()>,
    timeout: Duration,
) -> Result<(), E>
where
    F: Future<Output = Result<(), E>>,
{
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result,
        Ok(()) = signalled => {}
    }

    match tokio::time::timeout(timeout, &mut server).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                timeout_secs = timeout.as_secs(),
                "drain deadline reached, closing remaining connections"
            );
            Ok(())
        }
    }
}
