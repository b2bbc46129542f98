//! Cancellable delayed continuations
//!
//! Time only moves when the owner calls [`Timers::advance`]. Every scheduled
//! entry gets a unique [`TimerHandle`]; cancelling removes the entry so it can
//! never fire.

/// Identifies one scheduled entry. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Pending<T> {
    handle: TimerHandle,
    deadline: f64,
    payload: T,
}

/// Pending continuations keyed by handle, fired in deadline order
#[derive(Debug, Clone)]
pub struct Timers<T> {
    now: f64,
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Seconds advanced so far
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule `payload` to fire `delay` seconds from now
    pub fn schedule(&mut self, delay: f32, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            deadline: self.now + f64::from(delay.max(0.0)),
            payload,
        });
        handle
    }

    /// Cancel a pending entry. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// Seconds until `handle` fires, if pending
    pub fn remaining(&self, handle: TimerHandle) -> Option<f32> {
        self.pending
            .iter()
            .find(|p| p.handle == handle)
            .map(|p| (p.deadline - self.now).max(0.0) as f32)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending entry
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Move the clock forward
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.now += f64::from(dt);
        }
    }

    /// Remove and return the earliest due entry (ties fire in schedule order)
    pub fn pop_due(&mut self) -> Option<(TimerHandle, T)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= self.now)
            .min_by(|(_, a), (_, b)| {
                a.deadline
                    .total_cmp(&b.deadline)
                    .then(a.handle.0.cmp(&b.handle.0))
            })
            .map(|(i, _)| i)?;
        let due = self.pending.remove(index);
        Some((due.handle, due.payload))
    }
}
