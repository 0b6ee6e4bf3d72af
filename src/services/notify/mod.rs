pub mod telegram;

use async_trait::async_trait;

/// Operator notification channel with a fixed set of destinations.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn destinations(&self) -> &[String];

    async fn send(&self, destination: &str, text: &str) -> anyhow::Result<()>;
}

/// Send `text` to every configured destination concurrently and wait for all
/// sends to settle. Per-destination failures are logged and dropped so a
/// messaging outage never blocks the booking workflow.
pub async fn broadcast(notifier: &dyn Notifier, text: &str) {
    let sends = notifier.destinations().iter().map(|destination| async move {
        if let Err(e) = notifier.send(destination, text).await {
            tracing::warn!(error = %e, destination = %destination, "notification send failed");
        }
    });
    futures::future::join_all(sends).await;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Fails for one destination while the others succeed.
    struct FlakyNotifier {
        destinations: Vec<String>,
        failing: String,
        attempted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for FlakyNotifier {
        fn destinations(&self) -> &[String] {
            &self.destinations
        }

        async fn send(&self, destination: &str, _text: &str) -> anyhow::Result<()> {
            self.attempted.lock().unwrap().push(destination.to_string());
            if destination == self.failing {
                anyhow::bail!("send failed");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_broadcast_attempts_every_destination_despite_failures() {
        let notifier = FlakyNotifier {
            destinations: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            failing: "b".to_string(),
            attempted: Mutex::new(Vec::new()),
        };

        // Must not propagate the failing destination's error.
        broadcast(&notifier, "hello").await;

        let mut attempted = notifier.attempted.lock().unwrap().clone();
        attempted.sort();
        assert_eq!(attempted, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_broadcast_with_no_destinations_is_a_noop() {
        let notifier = FlakyNotifier {
            destinations: Vec::new(),
            failing: String::new(),
            attempted: Mutex::new(Vec::new()),
        };
        broadcast(&notifier, "hello").await;
        assert!(notifier.attempted.lock().unwrap().is_empty());
    }
}
