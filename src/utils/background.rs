use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinSet;

/// Trait defining scheduling and running of periodic maintenance for stores
#[async_trait]
pub trait BackgroundService {
    /// Defines period of running background task
    fn background_period(&self) -> Duration;

    async fn background(&mut self);

    fn cancel_token(&self) -> watch::Receiver<bool>;

    /// Signals the loop to finish, and does final cleanup
    async fn stop(&mut self) {}
}

pub fn serve_background(
    services: Vec<Arc<RwLock<dyn BackgroundService + Send + Sync>>>,
) -> JoinSet<()> {
    let mut futures = JoinSet::new();

    for s in services.iter() {
        let service = s.clone();
        futures.spawn(async move {
            let guard = service.read().await;
            let interval = guard.background_period();
            let mut rx = guard.cancel_token();

            drop(guard);
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) =>{
                        let mut guard = service.write().await;
                        guard.background().await;
                    }
                    changed = rx.changed() => {
                        if changed.is_err() || *rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });
    }

    futures
}

pub async fn stop_background(services: &[Arc<RwLock<dyn BackgroundService + Send + Sync>>]) {
    for service in services {
        service.write().await.stop().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter {
        runs: Arc<AtomicUsize>,
        cancel_chan: (watch::Sender<bool>, watch::Receiver<bool>),
    }

    #[async_trait]
    impl BackgroundService for Counter {
        fn background_period(&self) -> Duration {
            Duration::from_millis(5)
        }

        async fn background(&mut self) {
            self.runs.fetch_add(1, Ordering::SeqCst);
        }

        fn cancel_token(&self) -> watch::Receiver<bool> {
            self.cancel_chan.1.clone()
        }

        async fn stop(&mut self) {
            let _ = self.cancel_chan.0.send(true);
        }
    }

    #[tokio::test]
    async fn runs_until_stopped() {
        let runs = Arc::new(AtomicUsize::new(0));
        let service: Arc<RwLock<dyn BackgroundService + Send + Sync>> =
            Arc::new(RwLock::new(Counter {
                runs: runs.clone(),
                cancel_chan: watch::channel(false),
            }));

        let mut tasks = serve_background(vec![service.clone()]);
        tokio::time::sleep(Duration::from_millis(50)).await;
        stop_background(&[service]).await;
        while tasks.join_next().await.is_some() {}

        assert!(runs.load(Ordering::SeqCst) > 0);
    }
}
