//! Session timers: a priority queue keyed by fire time on the session clock.
//!
//! The clock only moves when the session is ticked, so timers are
//! cooperative. Ties fire in scheduling order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Deferred work the session runs when a timer comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerTask {
    SpawnZombie,
    RegenerateHealth,
    ShootCooldown,
    ReloadComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    fire_at: Duration,
    seq: u64,
    task: TimerTask,
    every: Option<Duration>,
}

/// Smallest allowed repeat period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Entry>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    /// Run `task` once, `delay` from now.
    pub fn schedule_once(&mut self, delay: Duration, task: TimerTask) {
        self.push(self.now + delay, task, None);
    }

    /// Run `task` every `period`, first firing one period from now.
    pub fn schedule_repeating(&mut self, period: Duration, task: TimerTask) {
        let period = period.max(MIN_PERIOD);
        self.push(self.now + period, task, Some(period));
    }

    /// Pop the earliest task due at or before the current clock.
    /// Repeating tasks are re-queued one period after their fire time, so a
    /// long frame fires them once per elapsed period.
    pub fn pop_due(&mut self) -> Option<TimerTask> {
        let due = matches!(self.queue.peek(), Some(Reverse(entry)) if entry.fire_at <= self.now);
        if !due {
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;
        if let Some(period) = entry.every {
            self.push(entry.fire_at + period, entry.task, Some(period));
        }
        Some(entry.task)
    }

    pub fn is_scheduled(&self, task: TimerTask) -> bool {
        self.queue.iter().any(|Reverse(entry)| entry.task == task)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn push(&mut self, fire_at: Duration, task: TimerTask, every: Option<Duration>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry {
            fire_at,
            seq,
            task,
            every,
        }));
    }
}
