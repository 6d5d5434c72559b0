//! Fixed-period task scheduling on simulated time
//!
//! Each registration fires every `period_ms` until cancelled through the
//! [`TaskHandle`] returned at registration. The owner drains due tasks with
//! [`Scheduler::pop_due`] and runs them itself, so a task cancelled partway
//! through a drain never fires again in that drain.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("task period must be at least 1 ms")]
    ZeroPeriod,
}

/// Cancellation handle for one registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u32);

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: TaskHandle,
    task: T,
    period_ms: u64,
    next_ms: u64,
}

/// Periodic tasks keyed by a caller-defined tag
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    /// Registration order
    entries: Vec<Entry<T>>,
    next_handle: u32,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            entries: Vec::new(),
            next_handle: 1,
        }
    }

    /// Simulated time of the last fired task or settle
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Register `task` to fire every `period_ms`, first at now + period
    pub fn every(&mut self, period_ms: u64, task: T) -> Result<TaskHandle, ScheduleError> {
        if period_ms == 0 {
            return Err(ScheduleError::ZeroPeriod);
        }
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            task,
            period_ms,
            next_ms: self.now_ms + period_ms,
        });
        Ok(handle)
    }

    /// Stop a registration. Returns false if it was already gone.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Drop every registration
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Move the clock forward without firing anything
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl<T: Copy> Scheduler<T> {
    /// Take the earliest task due at or before `until_ms`
    ///
    /// Ties go to the earlier registration. The clock advances to the fire
    /// time and the task is rescheduled one period later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        // min_by_key keeps the first of equal keys, i.e. registration order
        let entry = self
            .entries
            .iter_mut()
            .filter(|e| e.next_ms <= until_ms)
            .min_by_key(|e| e.next_ms)?;

        self.now_ms = self.now_ms.max(entry.next_ms);
        entry.next_ms += entry.period_ms;
        Some(entry.task)
    }
}
