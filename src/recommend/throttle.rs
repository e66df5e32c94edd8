//! Display throttle: show a suggestion once every N qualifying events.

use crate::session::SessionState;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayThrottle {
    start: i64,
}

impl DisplayThrottle {
    /// `start` below 1 behaves as 1 (always show)
    pub fn new(start: u32) -> Self {
        Self {
            start: i64::from(start.max(1)),
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    /// Check and advance the session's counter.
    ///
    /// The first check in a session always shows. Every later check
    /// decrements; reaching zero shows and rearms the counter.
    pub fn should_display(&self, session: &mut SessionState) -> bool {
        let show = match session.throttle_counter {
            None => {
                session.throttle_counter = Some(self.start);
                true
            }
            Some(counter) => {
                let remaining = counter - 1;
                if remaining > 0 {
                    session.throttle_counter = Some(remaining);
                    false
                } else {
                    session.throttle_counter = Some(self.start);
                    true
                }
            }
        };
        trace!(show, counter = ?session.throttle_counter, "throttle check");
        show
    }
}
