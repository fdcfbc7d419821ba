/// DELVE Project
/// `File` activator.rs
/// `Description` Cell activator dispatching module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use crate::cell::{Activator, DoorStatus};
use crate::level::Level;
use crate::scheduler::{Scheduler, Timer, TimerScope};

/// Door animation timer id getting function
pub fn door_timer_id(x: i32, y: i32) -> String {
    format!("door:{x}:{y}")
} // fn door_timer_id

/// Door opening/closing animation timer
#[derive(Copy, Clone, Debug)]
pub struct DoorTimer {
    pub x: i32,
    pub y: i32,
    pub opening: bool,
} // struct DoorTimer

impl Timer for DoorTimer {
    fn update(&mut self, delta: f32, level: &mut Level) -> bool {
        let Some(door) = level.get_cell_mut(self.x, self.y).and_then(|cell| cell.door_data_mut()) else {
            return true;
        };

        let step = delta * 1000.0 * 100.0 / door.speed_ms.max(f32::EPSILON);

        if self.opening {
            door.percent = (door.percent - step).max(0.0);
            if door.percent <= 0.0 {
                door.status = DoorStatus::Open;
                return true;
            }
        } else {
            door.percent = (door.percent + step).min(100.0);
            if door.percent >= 100.0 {
                door.status = DoorStatus::Closed;
                return true;
            }
        }

        false
    } // fn update
} // impl Timer for DoorTimer

/// Cell activation function, invokes every cell activator in order
/// * `level` - level containing cell
/// * `x`, `y` - cell coordinates
/// * `timers` - timer scheduler door animations are registered in
/// * Returns true if there was an interactive cell to activate
pub fn activate(level: &mut Level, x: i32, y: i32, timers: &mut Scheduler) -> bool {
    let Some(cell) = level.get_cell_mut(x, y) else {
        return false;
    };

    if !cell.is_interactive() {
        return false;
    }

    for activator in cell.activators.clone() {
        match activator {
            Activator::Toggle => cell.state = if cell.state == 0 { 1 } else { 0 },
            Activator::Increment => cell.state = cell.state.wrapping_add(1),
            Activator::Decrement => cell.state = cell.state.saturating_sub(1),
            Activator::Door => {
                let Some(door) = cell.door_data_mut() else {
                    continue;
                };

                let opening = match door.status {
                    DoorStatus::Closed | DoorStatus::Closing => true,
                    DoorStatus::Open | DoorStatus::Opening => false,
                };
                door.status = if opening { DoorStatus::Opening } else { DoorStatus::Closing };

                timers.register(door_timer_id(x, y), TimerScope::Level, DoorTimer { x, y, opening }, true);
            }
        }
    }

    true
} // fn activate


// file activator.rs
