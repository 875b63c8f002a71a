//! Acquire-once / release-once resource slot
//!
//! Shared by suite-local and test-local fixtures. The slot's lock is never
//! held across an acquisition or release procedure.

use assay_core::FixtureError;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::sync::Arc;

pub(crate) type AcquireFn<T> = Box<dyn Fn() -> BoxFuture<'static, anyhow::Result<T>> + Send + Sync>;
pub(crate) type ReleaseFn<T> =
    Box<dyn Fn(Arc<T>) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Lifecycle of a fixture value
enum Lifecycle<T> {
    /// Never acquired, or the last acquisition failed
    NotReady,
    /// An acquisition procedure is running
    Acquiring,
    Ready(Arc<T>),
    Released,
}

pub(crate) struct ResourceSlot<T> {
    name: String,
    state: Mutex<Lifecycle<T>>,
    acquire: AcquireFn<T>,
    release: ReleaseFn<T>,
}

impl<T: Send + Sync + 'static> ResourceSlot<T> {
    pub(crate) fn new(name: String, acquire: AcquireFn<T>, release: ReleaseFn<T>) -> Self {
        Self {
            name,
            state: Mutex::new(Lifecycle::NotReady),
            acquire,
            release,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// The stored value, if acquisition completed and release has not started
    pub(crate) fn current(&self) -> Option<Arc<T>> {
        match &*self.state.lock() {
            Lifecycle::Ready(value) => Some(Arc::clone(value)),
            Lifecycle::NotReady | Lifecycle::Acquiring | Lifecycle::Released => None,
        }
    }

    /// Run the acquisition procedure and store its value
    ///
    /// The slot is claimed before the procedure starts, so a concurrent or
    /// repeated acquisition fails with [`FixtureError::AlreadyAcquired`]
    /// instead of replacing the value.
    pub(crate) async fn acquire(&self) -> Result<(), FixtureError> {
        {
            let mut state = self.state.lock();
            if matches!(*state, Lifecycle::Acquiring | Lifecycle::Ready(_)) {
                return Err(FixtureError::AlreadyAcquired {
                    name: self.name.clone(),
                });
            }
            *state = Lifecycle::Acquiring;
        }

        tracing::debug!(fixture = %self.name, "acquiring fixture");
        match (self.acquire)().await {
            Ok(value) => {
                *self.state.lock() = Lifecycle::Ready(Arc::new(value));
                tracing::trace!(fixture = %self.name, "fixture ready");
                Ok(())
            }
            Err(e) => {
                *self.state.lock() = Lifecycle::NotReady;
                Err(FixtureError::acquire_failed(&self.name, format!("{e:#}")))
            }
        }
    }

    /// Clear the stored value and hand it to the release procedure
    ///
    /// Returns `Ok(false)` without running anything when no value is held,
    /// including while an acquisition is still running.
    pub(crate) async fn release(&self) -> Result<bool, FixtureError> {
        let value = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut *state, Lifecycle::Released) {
                Lifecycle::Ready(value) => value,
                previous => {
                    *state = previous;
                    return Ok(false);
                }
            }
        };

        tracing::debug!(fixture = %self.name, "releasing fixture");
        (self.release)(value)
            .await
            .map_err(|e| FixtureError::release_failed(&self.name, format!("{e:#}")))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_slot(releases: Arc<AtomicUsize>) -> ResourceSlot<u32> {
        ResourceSlot::new(
            "counter".to_string(),
            Box::new(|| async { Ok::<u32, anyhow::Error>(5) }.boxed()),
            Box::new(move |_: Arc<u32>| {
                let releases = releases.clone();
                async move {
                    releases.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), anyhow::Error>(())
                }
                .boxed()
            }),
        )
    }

    #[tokio::test]
    async fn test_lifecycle() {
        let releases = Arc::new(AtomicUsize::new(0));
        let slot = counting_slot(releases.clone());
        assert!(slot.current().is_none());

        slot.acquire().await.unwrap();
        assert_eq!(slot.current().as_deref(), Some(&5));

        assert!(slot.release().await.unwrap());
        assert!(slot.current().is_none());
        assert!(!slot.release().await.unwrap());
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_double_acquire_rejected() {
        let slot = counting_slot(Arc::new(AtomicUsize::new(0)));
        slot.acquire().await.unwrap();
        assert_eq!(
            slot.acquire().await,
            Err(FixtureError::AlreadyAcquired {
                name: "counter".to_string()
            })
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_acquire_runs_procedure_once() {
        let acquisitions = Arc::new(AtomicUsize::new(0));
        let releases = Arc::new(AtomicUsize::new(0));
        let slot = {
            let acquisitions = acquisitions.clone();
            let releases = releases.clone();
            Arc::new(ResourceSlot::new(
                "shared".to_string(),
                Box::new(move || {
                    let acquisitions = acquisitions.clone();
                    async move {
                        acquisitions.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                        Ok::<u32, anyhow::Error>(9)
                    }
                    .boxed()
                }),
                Box::new(move |_: Arc<u32>| {
                    let releases = releases.clone();
                    async move {
                        releases.fetch_add(1, Ordering::SeqCst);
                        Ok::<(), anyhow::Error>(())
                    }
                    .boxed()
                }),
            ))
        };

        let first = tokio::spawn({
            let slot = slot.clone();
            async move { slot.acquire().await }
        });
        let second = tokio::spawn({
            let slot = slot.clone();
            async move { slot.acquire().await }
        });
        let outcomes = [first.await.unwrap(), second.await.unwrap()];

        assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 1);
        assert!(outcomes.contains(&Err(FixtureError::AlreadyAcquired {
            name: "shared".to_string()
        })));
        assert_eq!(acquisitions.load(Ordering::SeqCst), 1);
        assert_eq!(slot.current().as_deref(), Some(&9));

        assert!(slot.release().await.unwrap());
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_acquire_stays_not_ready() {
        let slot: ResourceSlot<u32> = ResourceSlot::new(
            "broken".to_string(),
            Box::new(|| async { Err::<u32, _>(anyhow::anyhow!("connection refused")) }.boxed()),
            Box::new(|_: Arc<u32>| async { Ok::<(), anyhow::Error>(()) }.boxed()),
        );
        assert_eq!(
            slot.acquire().await,
            Err(FixtureError::acquire_failed("broken", "connection refused"))
        );
        assert!(slot.current().is_none());
        assert!(!slot.release().await.unwrap());
    }
}
