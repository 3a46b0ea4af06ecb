//! Cancelable timers driven by an explicit millisecond clock.
//!
//! Nothing here reads the wall clock. Callers pass `now_ms` (milliseconds since
//! some fixed origin) into every call, so the binary can feed `Instant`-based
//! time and tests can feed a virtual clock.

/// Identity of a started timer. A stale handle never cancels a newer timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Ticks further behind than this are dropped instead of replayed, so a
/// stalled frame (terminal suspended, slow redraw) cannot burst the snake.
pub const TICK_BACKLOG_LIMIT_MS: u64 = 500;

#[derive(Debug, Clone, Copy)]
struct Recurring {
    handle: TimerHandle,
    interval_ms: u64,
    next_fire_ms: u64,
}

/// Restartable periodic tick source. At most one schedule is ever active.
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    active: Option<Recurring>,
    next_id: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking every `interval_ms`, first tick one interval from `now_ms`.
    ///
    /// Any previous schedule is cancelled first.
    pub fn start(&mut self, interval_ms: u64, now_ms: u64) -> TimerHandle {
        let interval_ms = interval_ms.max(1);
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.active = Some(Recurring {
            handle,
            interval_ms,
            next_fire_ms: now_ms + interval_ms,
        });
        handle
    }

    /// Stop the active schedule, returning its handle if one was running.
    pub fn stop(&mut self) -> Option<TimerHandle> {
        self.active.take().map(|r| r.handle)
    }

    /// Cancel the schedule only if `handle` is the one currently running.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.active {
            Some(r) if r.handle == handle => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn interval_ms(&self) -> Option<u64> {
        self.active.map(|r| r.interval_ms)
    }

    pub fn next_fire_ms(&self) -> Option<u64> {
        self.active.map(|r| r.next_fire_ms)
    }

    /// Consume one due tick, returning the time it was scheduled for.
    ///
    /// Call repeatedly to drain a backlog.
    pub fn poll(&mut self, now_ms: u64) -> Option<u64> {
        let r = self.active.as_mut()?;
        if now_ms < r.next_fire_ms {
            return None;
        }
        if now_ms - r.next_fire_ms > TICK_BACKLOG_LIMIT_MS {
            r.next_fire_ms = now_ms - TICK_BACKLOG_LIMIT_MS;
        }
        let fired_at = r.next_fire_ms;
        r.next_fire_ms += r.interval_ms;
        Some(fired_at)
    }
}

/// One-shot cancelable deadline.
#[derive(Debug, Clone, Default)]
pub struct EffectTimer {
    pending: Option<(TimerHandle, u64)>,
    next_id: u64,
}

impl EffectTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to fire `delay_ms` after `now_ms`, replacing any pending
    /// deadline.
    pub fn arm(&mut self, delay_ms: u64, now_ms: u64) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending = Some((handle, now_ms + delay_ms));
        handle
    }

    /// Discard the pending deadline. Returns false if nothing was armed.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.pending.map(|(_, deadline)| deadline)
    }

    /// Fire the timer if its deadline has been reached. Fires at most once.
    pub fn poll(&mut self, now_ms: u64) -> Option<TimerHandle> {
        match self.pending {
            Some((handle, deadline)) if now_ms >= deadline => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }
}
