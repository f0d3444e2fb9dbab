use std::time::{
    Duration,
    Instant,
};

pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Identifies one scheduled firing. Stale handles cancel nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceHandle(u64);

struct Scheduled<T> {
    id: u64,
    deadline: Instant,
    payload: T,
}

/// Cancellable delayed task driven by an external clock.
///
/// Scheduling replaces whatever was pending, so only the payload of the last
/// call survives a burst that arrives inside the quiet window.
pub struct Debouncer<T> {
    window: Duration,
    next_id: u64,
    scheduled: Option<Scheduled<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self { window, next_id: 0, scheduled: None }
    }

    pub fn schedule(&mut self, now: Instant, payload: T) -> DebounceHandle {
        self.next_id += 1;
        self.scheduled = Some(Scheduled { id: self.next_id, deadline: now + self.window, payload });
        DebounceHandle(self.next_id)
    }

    pub fn cancel(&mut self, handle: DebounceHandle) -> bool {
        match &self.scheduled {
            Some(scheduled) if scheduled.id == handle.0 => {
                self.scheduled = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.scheduled.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.scheduled.as_ref().map(|s| s.deadline)
    }

    /// Takes the payload once its quiet window has fully elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.scheduled {
            Some(scheduled) if now >= scheduled.deadline => {
                self.scheduled.take().map(|s| s.payload)
            }
            _ => None,
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_fires_after_window() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(500));
        debouncer.schedule(t0, "a");

        assert_eq!(debouncer.poll(t0 + ms(499)), None);
        assert_eq!(debouncer.poll(t0 + ms(500)), Some("a"));
        assert_eq!(debouncer.poll(t0 + ms(900)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_reschedule_restarts_window_and_keeps_last_payload() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(500));
        debouncer.schedule(t0, 50);
        debouncer.schedule(t0 + ms(100), 55);

        assert_eq!(debouncer.poll(t0 + ms(550)), None);
        assert_eq!(debouncer.deadline(), Some(t0 + ms(600)));
        assert_eq!(debouncer.poll(t0 + ms(600)), Some(55));
    }

    #[test]
    fn test_cancel_only_matches_current_handle() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(500));
        let first = debouncer.schedule(t0, 1);
        let second = debouncer.schedule(t0, 2);

        assert!(!debouncer.cancel(first));
        assert!(debouncer.is_pending());
        assert!(debouncer.cancel(second));
        assert_eq!(debouncer.poll(t0 + ms(1000)), None);
    }
}
