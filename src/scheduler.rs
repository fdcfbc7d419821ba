/// DELVE Project
/// `File` scheduler.rs
/// `Description` Cooperative per-frame timer scheduler module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use std::collections::BTreeMap;

use crate::level::Level;

/// Per-frame predicate timer
pub trait Timer {
    /// Timer updating function
    /// * `delta` - frame time, in seconds
    /// * `level` - active level, timers may mutate its cells
    /// * Returns true if timer is done and should be removed
    fn update(&mut self, delta: f32, level: &mut Level) -> bool;
} // trait Timer

impl<F: FnMut(f32, &mut Level) -> bool> Timer for F {
    fn update(&mut self, delta: f32, level: &mut Level) -> bool {
        self(delta, level)
    }
}

/// Timer lifetime scope
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerScope {
    /// Survives level changes
    Global,
    /// Removed on level change
    Level,
} // enum TimerScope

struct Entry {
    scope: TimerScope,
    timer: Box<dyn Timer>,
}

/// Timer registry, at most one timer per id
#[derive(Default)]
pub struct Scheduler {
    timers: BTreeMap<String, Entry>,
} // struct Scheduler

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timer registering function
    /// * `id` - timer id
    /// * `scope` - timer scope
    /// * `timer` - timer to register
    /// * `replace` - replace timer with the same id if it exists
    /// * Returns true if timer was registered
    pub fn register(&mut self, id: impl Into<String>, scope: TimerScope, timer: impl Timer + 'static, replace: bool) -> bool {
        let id = id.into();

        if !replace && self.timers.contains_key(&id) {
            return false;
        }

        tracing::trace!(id = %id, ?scope, "timer registered");
        self.timers.insert(id, Entry { scope, timer: Box::new(timer) });
        true
    } // fn register

    /// Every timer updating function, done timers are removed
    /// * `delta` - frame time, in seconds
    /// * `level` - active level
    pub fn update(&mut self, delta: f32, level: &mut Level) {
        self.timers.retain(|id, entry| {
            let done = entry.timer.update(delta, level);
            if done {
                tracing::trace!(id = %id, "timer expired");
            }
            !done
        });
    } // fn update

    pub fn has(&self, id: &str) -> bool {
        self.timers.contains_key(id)
    }

    /// Timer removing function
    /// * Returns true if timer existed
    pub fn remove(&mut self, id: &str) -> bool {
        self.timers.remove(id).is_some()
    } // fn remove

    /// Every timer of scope removing function
    pub fn clear_scope(&mut self, scope: TimerScope) {
        self.timers.retain(|_, entry| entry.scope != scope);
    } // fn clear_scope

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
} // impl Scheduler

/// Timer expiring after fixed amount of time
#[derive(Copy, Clone, Debug)]
pub struct Countdown {
    remaining: f32,
} // struct Countdown

impl Countdown {
    /// Countdown construction function
    /// * `seconds` - time until expiry
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }
}

impl Timer for Countdown {
    fn update(&mut self, delta: f32, _level: &mut Level) -> bool {
        self.remaining -= delta;
        self.remaining <= 0.0
    }
} // impl Timer for Countdown

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::level::Portal;

    fn level() -> Level {
        Level::new(0, Portal::new(0, 0, 0.0), Portal::new(0, 0, 0.0), vec![vec![Cell::floor(1)]]).unwrap()
    }

    #[test]
    fn replace_flag() {
        let mut level = level();
        let mut scheduler = Scheduler::new();

        assert!(scheduler.register("a", TimerScope::Global, |_: f32, _: &mut Level| true, true));
        assert!(!scheduler.register("a", TimerScope::Global, |_: f32, _: &mut Level| false, false));
        assert!(scheduler.register("a", TimerScope::Global, |_: f32, _: &mut Level| false, true));
        assert_eq!(scheduler.len(), 1);

        // replacement never expires
        scheduler.update(1.0, &mut level);
        assert!(scheduler.has("a"));
    }

    #[test]
    fn expired_timers_are_removed() {
        let mut level = level();
        let mut scheduler = Scheduler::new();
        scheduler.register("cooldown", TimerScope::Global, Countdown::new(0.25), true);

        scheduler.update(0.125, &mut level);
        assert!(scheduler.has("cooldown"));
        scheduler.update(0.125, &mut level);
        assert!(!scheduler.has("cooldown"));
    }

    #[test]
    fn timers_mutate_level() {
        let mut level = level();
        let mut scheduler = Scheduler::new();
        scheduler.register(
            "bump",
            TimerScope::Level,
            |_: f32, level: &mut Level| {
                if let Some(cell) = level.get_cell_mut(0, 0) {
                    cell.state += 1;
                }
                false
            },
            true,
        );

        scheduler.update(0.1, &mut level);
        scheduler.update(0.1, &mut level);
        assert_eq!(level.get_cell(0, 0).map(|cell| cell.state), Some(2));
    }

    #[test]
    fn clear_scope_keeps_global_timers() {
        let mut scheduler = Scheduler::new();
        scheduler.register("door:1:1", TimerScope::Level, Countdown::new(1.0), true);
        scheduler.register("interact", TimerScope::Global, Countdown::new(1.0), true);

        scheduler.clear_scope(TimerScope::Level);

        assert!(!scheduler.has("door:1:1"));
        assert!(scheduler.has("interact"));
        assert!(scheduler.remove("interact"));
        assert!(scheduler.is_empty());
    }
}

// file scheduler.rs
