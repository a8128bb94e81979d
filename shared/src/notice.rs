//! Delayed auto-clear of a slice's success / error notice.
//!
//! Every schedule hands out a ticket. Rescheduling or cancelling invalidates the
//! tickets issued before it, so a timer that outlives its page never resets flags
//! that belong to a later request.

/// Ticket bookkeeping for one notice timer
#[derive(Debug, Default)]
pub struct NoticeTimer {
    generation: u64,
    armed: bool,
}

impl NoticeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer and returns the ticket the expiry callback must present.
    pub fn schedule(&mut self) -> u64 {
        self.generation += 1;
        self.armed = true;
        self.generation
    }

    /// Disarms the timer; outstanding tickets become stale.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.armed = false;
    }

    /// Consumes `ticket`. Returns true only for the latest armed ticket.
    pub fn expire(&mut self, ticket: u64) -> bool {
        if self.armed && ticket == self.generation {
            self.armed = false;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_ticket_expires_once() {
        let mut timer = NoticeTimer::new();
        let ticket = timer.schedule();
        assert!(timer.is_armed());
        assert!(timer.expire(ticket));
        assert!(!timer.expire(ticket));
        assert!(!timer.is_armed());
    }

    #[test]
    fn reschedule_invalidates_earlier_ticket() {
        let mut timer = NoticeTimer::new();
        let first = timer.schedule();
        let second = timer.schedule();
        assert!(!timer.expire(first));
        assert!(timer.expire(second));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        // a page that unmounts must not clear flags owned by the next page's request
        let mut timer = NoticeTimer::new();
        let ticket = timer.schedule();
        timer.cancel();
        assert!(!timer.expire(ticket));
        assert!(!timer.is_armed());

        let next = timer.schedule();
        assert_ne!(next, ticket);
        assert!(timer.expire(next));
    }
}
