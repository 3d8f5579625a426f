use tokio::time::{sleep_until, Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Cancellable quiet-window timer.
///
/// Only the last value scheduled inside the window is ever delivered.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace whatever is pending and restart the window.
    pub fn schedule(&mut self, value: T) {
        self.pending = Some((Instant::now() + self.delay, value));
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves once the window elapses with the pending value. Never
    /// resolves while nothing is scheduled, so it can sit in a `select!`.
    pub async fn due(&mut self) -> T {
        let deadline = match &self.pending {
            Some((deadline, _)) => *deadline,
            None => return std::future::pending().await,
        };

        sleep_until(deadline).await;

        match self.pending.take() {
            Some((_, value)) => value,
            None => std::future::pending().await,
        }
    }
}
