//! Virtual-time task scheduler.
//!
//! Every timer of the page (price ticks, resize debounce, transient UI
//! resets, counter steps, simulated latency) is a task in this queue. The
//! browser drives it from a real interval, tests drive it by advancing time
//! explicitly.

use std::time::Duration;

/// Cancel handle of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    id: TaskId,
    due: Duration,
    period: Option<Duration>,
    payload: T,
}

/// Queue of one-shot and periodic tasks ordered by due time.
///
/// Tasks due at the same instant fire in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    tasks: Vec<Entry<T>>,
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule_once(&mut self, delay: Duration, payload: T) -> TaskId {
        self.push(self.now + delay, None, payload)
    }

    /// Schedules a task firing every `period`, first after one full period.
    pub fn schedule_repeating(&mut self, period: Duration, payload: T) -> TaskId {
        let period = period.max(Duration::from_millis(1));
        self.push(self.now + period, Some(period), payload)
    }

    /// Removes a pending task. Returns false if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|entry| entry.id != id);
        before != self.tasks.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|entry| entry.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.iter().map(|entry| entry.due).min()
    }

    /// Pops the earliest task due at or before `until`, moving the clock to
    /// its due time. Periodic tasks are re-armed for their next period.
    ///
    /// Handlers may schedule new tasks between calls; those are considered
    /// by the next call.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskId, T)> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(index, _)| index)?;

        let due = self.tasks[index].due;
        if due > self.now {
            self.now = due;
        }

        match self.tasks[index].period {
            Some(period) => {
                let entry = &mut self.tasks[index];
                entry.due += period;
                Some((entry.id, entry.payload.clone()))
            }
            None => {
                let entry = self.tasks.remove(index);
                Some((entry.id, entry.payload))
            }
        }
    }

    /// Moves the clock forward to `until` once every due task was popped.
    pub fn settle(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }

    /// Advances the clock by `delta` and returns every task that fired, in
    /// firing order.
    pub fn advance(&mut self, delta: Duration) -> Vec<(TaskId, T)> {
        let until = self.now + delta;
        let mut fired = Vec::new();
        while let Some(task) = self.pop_due(until) {
            fired.push(task);
        }
        self.settle(until);
        fired
    }

    fn push(&mut self, due: Duration, period: Option<Duration>, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Entry { id, due, period, payload });
        id
    }
}
