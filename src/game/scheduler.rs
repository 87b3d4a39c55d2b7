//! Frame scheduling. The host owns the actual timer (`requestAnimationFrame` in the browser);
//! the session only holds the handle of the one tick it is waiting for.

/// Opaque id of a scheduled tick, as returned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(pub i64);

pub trait Scheduler {
    /// Requests one tick on the next frame.
    fn request_tick(&mut self) -> TickHandle;
    fn cancel_tick(&mut self, handle: TickHandle);
}

/// Holds at most one pending tick handle.
#[derive(Debug, Default)]
pub struct TickSlot {
    pending: Option<TickHandle>,
}

impl TickSlot {
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedules a tick unless one is already pending.
    pub fn arm(&mut self, scheduler: &mut dyn Scheduler) {
        if self.pending.is_none() {
            self.pending = Some(scheduler.request_tick());
        }
    }

    /// Cancels the pending tick, if any.
    pub fn disarm(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_tick(handle);
        }
    }

    /// Called when a tick fires. Returns `false` if nothing was pending (stale callback).
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        requested: i64,
        cancelled: Vec<TickHandle>,
    }

    impl Scheduler for Counting {
        fn request_tick(&mut self) -> TickHandle {
            self.requested += 1;
            TickHandle(self.requested)
        }
        fn cancel_tick(&mut self, handle: TickHandle) {
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn arm_is_idempotent_while_pending() {
        let mut sched = Counting::default();
        let mut slot = TickSlot::default();
        slot.arm(&mut sched);
        slot.arm(&mut sched);
        assert_eq!(sched.requested, 1);
        assert!(slot.is_armed());
    }

    #[test]
    fn disarm_cancels_exactly_the_pending_handle() {
        let mut sched = Counting::default();
        let mut slot = TickSlot::default();
        slot.arm(&mut sched);
        slot.disarm(&mut sched);
        slot.disarm(&mut sched);
        assert_eq!(sched.cancelled, vec![TickHandle(1)]);
        assert!(!slot.is_armed());
    }

    #[test]
    fn fire_consumes_the_handle_once() {
        let mut sched = Counting::default();
        let mut slot = TickSlot::default();
        assert!(!slot.fire());
        slot.arm(&mut sched);
        assert!(slot.fire());
        assert!(!slot.fire());
    }
}
