//! Deterministic queue of one-shot timers on the simulation timebase.
//!
//! Key properties:
//! - Total ordering on `(due, id)`; timers due at the same instant fire in the
//!   order they were scheduled.
//! - Cancellation is explicit and does not perturb the order of the rest.
//! - Nothing fires on its own: the owner drains due timers with [`TimerQueue::pop_due`]
//!   whenever it advances its clock.
use std::cmp::Ordering;

use foundation::time::Time;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

#[derive(Debug)]
struct Entry<T> {
    due: Time,
    id: TimerId,
    payload: T,
    canceled: bool,
}

impl<T> Entry<T> {
    fn key_cmp(&self, other: &Entry<T>) -> Ordering {
        self.due
            .total_cmp(&other.due)
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (not canceled) timers.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.canceled).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn schedule(&mut self, due: Time, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(Entry {
            due,
            id,
            payload,
            canceled: false,
        });
        id
    }

    /// Returns `true` if the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id && !e.canceled) {
            entry.canceled = true;
            return true;
        }
        false
    }

    /// Cancels every pending timer. Returns how many were live.
    pub fn cancel_all(&mut self) -> usize {
        let live = self.len();
        self.entries.clear();
        live
    }

    /// Due time of the earliest live timer.
    pub fn next_due(&self) -> Option<Time> {
        self.earliest().map(|idx| self.entries[idx].due)
    }

    /// Pops the earliest live timer whose due time is at or before `now`.
    pub fn pop_due(&mut self, now: Time) -> Option<(TimerId, Time, T)> {
        let idx = self.earliest()?;
        if self.entries[idx].due.total_cmp(&now) == Ordering::Greater {
            return None;
        }
        let entry = self.entries.swap_remove(idx);
        self.entries.retain(|e| !e.canceled);
        Some((entry.id, entry.due, entry.payload))
    }

    fn earliest(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.canceled {
                continue;
            }
            match best {
                None => best = Some(idx),
                Some(b) => {
                    if entry.key_cmp(&self.entries[b]) == Ordering::Less {
                        best = Some(idx);
                    }
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::TimerQueue;
    use foundation::time::Time;

    #[test]
    fn fires_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(Time(5.0), "late");
        q.schedule(Time(1.0), "early");

        let (_, due, v) = q.pop_due(Time(10.0)).unwrap();
        assert_eq!((due, v), (Time(1.0), "early"));
        let (_, due, v) = q.pop_due(Time(10.0)).unwrap();
        assert_eq!((due, v), (Time(5.0), "late"));
        assert!(q.pop_due(Time(10.0)).is_none());
    }

    #[test]
    fn same_due_is_insertion_order() {
        let mut q = TimerQueue::new();
        q.schedule(Time(2.0), "a");
        q.schedule(Time(2.0), "b");
        q.schedule(Time(2.0), "c");

        let (_, _, a) = q.pop_due(Time(2.0)).unwrap();
        let (_, _, b) = q.pop_due(Time(2.0)).unwrap();
        let (_, _, c) = q.pop_due(Time(2.0)).unwrap();
        assert_eq!((a, b, c), ("a", "b", "c"));
    }

    #[test]
    fn does_not_fire_before_due() {
        let mut q = TimerQueue::new();
        q.schedule(Time(3.0), ());
        assert!(q.pop_due(Time(2.999)).is_none());
        assert_eq!(q.next_due(), Some(Time(3.0)));
        assert!(q.pop_due(Time(3.0)).is_some());
    }

    #[test]
    fn cancel_skips_timer() {
        let mut q = TimerQueue::new();
        let a = q.schedule(Time(1.0), "a");
        q.schedule(Time(2.0), "b");
        assert!(q.cancel(a));
        assert!(!q.cancel(a));
        assert_eq!(q.len(), 1);

        let (_, _, v) = q.pop_due(Time(5.0)).unwrap();
        assert_eq!(v, "b");
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_all_empties_queue() {
        let mut q = TimerQueue::new();
        q.schedule(Time(1.0), 1);
        let b = q.schedule(Time(2.0), 2);
        q.cancel(b);
        assert_eq!(q.cancel_all(), 1);
        assert!(q.pop_due(Time(100.0)).is_none());
        assert_eq!(q.next_due(), None);
    }
}
