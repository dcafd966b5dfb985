use crate::PendingUpdate;

/// A single-shot, cancel-and-replace timer driven by the host clock.
///
/// Scheduling while a task is outstanding replaces it; there is never more than one deadline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timer {
    due_ms: Option<u64>,
}

impl Timer {
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64) -> u64 {
        let due = now_ms.saturating_add(delay_ms);
        self.due_ms = Some(due);
        due
    }

    pub fn cancel(&mut self) -> bool {
        self.due_ms.take().is_some()
    }

    pub fn is_scheduled(&self) -> bool {
        self.due_ms.is_some()
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.due_ms
    }

    /// Clears the timer and returns `true` when `now_ms` reached the deadline.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.due_ms {
            Some(due) if now_ms >= due => {
                self.due_ms = None;
                true
            }
            _ => false,
        }
    }
}

/// Buffered height-only commit plus the debounce timer guarding it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Debounce {
    pending: Option<PendingUpdate>,
    timer: Timer,
}

impl Debounce {
    /// Buffers `update`, superseding any older value, and restarts the window.
    pub fn buffer(&mut self, update: PendingUpdate, now_ms: u64, delay_ms: u64) -> u64 {
        self.pending = Some(update);
        self.timer.schedule(now_ms, delay_ms)
    }

    pub fn clear(&mut self) {
        self.timer.cancel();
        self.pending = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.timer.is_scheduled()
    }

    pub fn pending(&self) -> Option<PendingUpdate> {
        self.pending
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.timer.due_ms()
    }

    /// Takes the buffered value once the window has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<PendingUpdate> {
        if !self.timer.fire(now_ms) {
            return None;
        }
        self.pending.take()
    }
}

/// Next-animation-frame retry request, at most one in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameRequest {
    requested: bool,
}

impl FrameRequest {
    /// Returns `false` when a frame was already requested.
    pub fn request(&mut self) -> bool {
        !core::mem::replace(&mut self.requested, true)
    }

    pub fn cancel(&mut self) -> bool {
        core::mem::take(&mut self.requested)
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }
}
