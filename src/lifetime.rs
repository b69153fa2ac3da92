use std::future::Future;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Ties spawned work to the lifetime of its owner.
///
/// The owner keeps a `Lifetime`; work spawned through it runs until the owner is dropped,
/// at which point the work is abandoned at its next suspension point and its completion
/// is never invoked.
#[derive(Debug)]
pub(crate) struct Lifetime {
    // Never sent on. Receivers see it close when the owner is dropped.
    signal: watch::Sender<()>,
}

impl Lifetime {
    pub(crate) fn new() -> Self {
        let (signal, _) = watch::channel(());
        Lifetime { signal }
    }

    /// Spawn `work` and hand its output to `completion`, unless the owner is dropped first.
    /// # Panics
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn_bound<T, W, F>(&self, operation: &'static str, work: W, completion: F) -> JoinHandle<()>
    where
        T: Send + 'static,
        W: Future<Output = T> + Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        let mut owner = self.signal.subscribe();
        tokio::spawn(async move {
            let output = tokio::select! {
                biased;
                Err(_) = owner.changed() => None,
                output = work => Some(output),
            };
            // On a multi-thread runtime the owner may still be dropped after this check
            // and before `completion` runs; such a completion is still delivered.
            match output {
                Some(output) if owner.has_changed().is_ok() => completion(output),
                _ => trace!(operation, "owner dropped, suppressing completion"),
            }
        })
    }
}
