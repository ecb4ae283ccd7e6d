use std::future::Future;

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Lifetime of one state holder's background work.
///
/// Futures launched here stop at their next await point once the scope is
/// cancelled, which happens automatically on drop.
pub struct ViewModelScope {
    token: CancellationToken,
    tracker: TaskTracker,
}

impl ViewModelScope {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Spawns `future` until it finishes or the scope is cancelled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn launch<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.launch_until(self.token.clone(), future);
    }

    /// Like [`launch`](Self::launch), but also stops when `token` fires.
    pub fn launch_until<F>(&self, token: CancellationToken, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tracker.spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = future => {}
            }
        });
    }

    /// A token cancelled together with the scope, or on its own.
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// True when nothing launched here is still running.
    pub fn is_idle(&self) -> bool {
        self.tracker.is_empty()
    }

    /// Stops accepting new work and waits for running work to finish.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}

impl Default for ViewModelScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewModelScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
