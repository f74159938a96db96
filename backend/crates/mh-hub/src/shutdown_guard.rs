use crate::ShutdownCoordinator;

use tokio::sync::watch;

/// Helper for gracefully handling shutdown in async tasks
pub struct ShutdownGuard {
    shutdown_rx: watch::Receiver<bool>,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            shutdown_rx: coordinator.subscribe(),
        }
    }

    /// Wait for shutdown signal. Also resolves if shutdown was triggered
    /// before the guard was created.
    pub async fn wait(&mut self) {
        let signalled = self.shutdown_rx.wait_for(|triggered| *triggered).await.is_ok();
        if !signalled {
            // Every coordinator is gone, so shutdown can never be triggered
            std::future::pending::<()>().await;
        }
    }

    /// Poll for shutdown signal (non-blocking)
    pub fn poll_shutdown(&mut self) -> bool {
        *self.shutdown_rx.borrow_and_update()
    }
}
