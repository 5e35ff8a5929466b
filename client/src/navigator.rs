//! Redirect signal for the presentation layer.

use tokio::sync::broadcast;
use todo_sync_core::environment::Navigator;

/// Capacity of the redirect channel.
const REDIRECT_CAPACITY: usize = 16;

/// Request to show another route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Route to show, e.g. `/login`
    pub route: String,
}

/// [`Navigator`] that publishes each request on a broadcast channel.
///
/// Any number of presentation components may [`subscribe`](Self::subscribe).
/// Requests made while nobody listens are dropped.
#[derive(Debug, Clone)]
pub struct BroadcastNavigator {
    sender: broadcast::Sender<Redirect>,
}

impl BroadcastNavigator {
    /// Create a navigator with no listeners.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(REDIRECT_CAPACITY);
        Self { sender }
    }

    /// Listen for redirects issued from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Redirect> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for BroadcastNavigator {
    fn navigate(&self, route: &str) {
        let redirect = Redirect {
            route: route.to_string(),
        };
        if self.sender.send(redirect).is_err() {
            tracing::debug!(route, "No listener for redirect");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listeners_receive_redirect() {
        let navigator = BroadcastNavigator::new();
        let mut first = navigator.subscribe();
        let mut second = navigator.subscribe();

        navigator.navigate("/login");

        assert_eq!(first.recv().await.unwrap().route, "/login");
        assert_eq!(second.recv().await.unwrap().route, "/login");
    }

    #[test]
    fn test_late_listener_misses_earlier_redirects() {
        let navigator = BroadcastNavigator::new();
        navigator.navigate("/login");

        let mut late = navigator.subscribe();
        navigator.navigate("/signin");

        let redirect = tokio_test::block_on(late.recv()).unwrap();
        assert_eq!(redirect.route, "/signin");
    }
}
