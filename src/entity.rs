/// DELVE Project
/// `File` entity.rs
/// `Description` Dynamic entity movement and collision module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use crate::activator;
use crate::caster::{self, DEFAULT_MAX_DEPTH};
use crate::cell::CellKind;
use crate::level::Level;
use crate::math::{radians_to_degrees, Vec2f};
use crate::scheduler::Scheduler;

/// Level passage kind
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Passage {
    Entrance,
    Exit,
} // enum Passage

/// Interaction result
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Interaction {
    /// Some interactive cell was activated
    pub activated: bool,
    /// Passage cell was reached
    pub passage: Option<Passage>,
} // struct Interaction

/// Dynamic entity (player) representation structure
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Entity {
    pub position: Vec2f,
    /// Heading
    pub direction: Vec2f,
    /// Camera plane, perpendicular to heading, length encodes field of view
    pub camera: Vec2f,
    pub radius: f32,
    pub active: bool,
} // struct Entity

impl Entity {
    /// Entity construction function
    /// * `x`, `y` - position
    /// * Returns entity looking along +X with 66% camera plane
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2f::new(x, y),
            direction: Vec2f::new(1.0, 0.0),
            camera: Vec2f::new(0.0, 0.66),
            radius: 0.5,
            active: true,
        }
    } // fn new

    /// Heading getting function
    /// * Returns heading angle, in degrees
    pub fn angle(&self) -> f32 {
        radians_to_degrees(self.direction.angle())
    } // fn angle

    /// Field of view getting function
    /// * Returns angle between leftmost and rightmost rays, in degrees
    pub fn fov(&self) -> f32 {
        radians_to_degrees((self.direction - self.camera).angle_to(self.direction + self.camera))
    } // fn fov

    /// Direction vector scaling function. Longer direction narrows field of view.
    pub fn scale_direction(&mut self, factor: f32) {
        self.direction = self.direction * factor;
    } // fn scale_direction

    /// Entity rotation function, rotates heading and camera plane together
    /// * `radians` - angle to rotate by
    pub fn rotate(&mut self, radians: f32) {
        self.direction = self.direction.rotated(radians);
        self.camera = self.camera.rotated(radians);
    } // fn rotate

    /// Collision-aware entity moving function. Axes are resolved independently.
    /// * `amount` - distance to move along heading, negative moves backwards
    /// * `level` - level to check collisions with
    pub fn move_by(&mut self, amount: f32, level: &Level) {
        let candidate = self.position + self.direction * amount;

        if level.cell_at(candidate.x, self.position.y).is_some_and(|cell| cell.is_passable()) {
            self.position.x = candidate.x;
        }

        if level.cell_at(self.position.x, candidate.y).is_some_and(|cell| cell.is_passable()) {
            self.position.y = candidate.y;
        }
    } // fn move_by

    /// Touched pickup collecting function. Sprites are treated as zero-radius circles.
    /// * `level` - level to collect sprites from
    /// * Returns number of collected sprites
    pub fn collect_pickups(&self, level: &mut Level) -> usize {
        let mut collected = 0;

        for sprite in level.sprites.iter_mut().filter(|sprite| sprite.active) {
            if sprite.position.distance(self.position) < self.radius {
                sprite.active = false;
                collected += 1;
            }
        }

        collected
    } // fn collect_pickups

    /// Interaction reach getting function
    pub fn reach(&self) -> f32 {
        1.0 + self.radius
    } // fn reach

    /// Interaction function. Casts center column ray and activates reached cell.
    /// * `level` - level to interact with
    /// * `timers` - scheduler activators register timers in
    /// * Returns interaction result
    pub fn interact(&self, level: &mut Level, timers: &mut Scheduler) -> Interaction {
        let target = caster::cast(self.position, self.direction, level, DEFAULT_MAX_DEPTH)
            .filter(|hit| hit.distance < self.reach())
            .map(|hit| (hit.x, hit.y, hit.cell.kind));

        let Some((x, y, kind)) = target else {
            return Interaction::default();
        };

        tracing::debug!(x, y, ?kind, "interaction target");

        Interaction {
            activated: activator::activate(level, x, y, timers),
            passage: match kind {
                CellKind::Entrance => Some(Passage::Entrance),
                CellKind::Exit => Some(Passage::Exit),
                _ => None,
            },
        }
    } // fn interact
} // impl Entity

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, DoorStatus};
    use crate::level::Portal;
    use crate::sprite::{Sprite, SpriteProperties};
    use proptest::prelude::*;

    /// 3x3 floor with solid center
    fn pillar() -> Level {
        let mut rows = vec![vec![Cell::floor(1); 3]; 3];
        rows[1][1] = Cell::simple_wall(2);
        Level::new(0, Portal::new(0, 0, 0.0), Portal::new(0, 0, 0.0), rows).unwrap()
    }

    #[test]
    fn pillar_blocks_every_direction() {
        let level = pillar();

        for (x, y, angle) in [(0.5, 1.5, 0.0f32), (2.5, 1.5, 180.0), (1.5, 0.5, 90.0), (1.5, 2.5, 270.0)] {
            let mut entity = Entity::new(x, y);
            entity.rotate(crate::math::degrees_to_radians(angle));
            entity.move_by(0.7, &level);

            let cell = level.cell_at(entity.position.x, entity.position.y).unwrap();
            assert!(cell.is_passable(), "approach from ({x}, {y})");
            assert!((entity.position.x - x).abs() < 1e-5 && (entity.position.y - y).abs() < 1e-5);
        }
    }

    #[test]
    fn slides_along_walls() {
        let level = pillar();
        let mut entity = Entity::new(0.5, 1.5);
        entity.direction = Vec2f::new(0.6, -0.6);

        entity.move_by(1.0, &level);

        assert_eq!(entity.position.x, 0.5);
        assert!((entity.position.y - 0.9).abs() < 1e-5);
    }

    #[test]
    fn grid_edge_rejects_move() {
        let level = pillar();
        let mut entity = Entity::new(0.5, 0.5);
        entity.rotate(std::f32::consts::PI);

        entity.move_by(1.0, &level);

        assert!((entity.position.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn default_field_of_view() {
        let entity = Entity::new(0.0, 0.0);

        // 2 * atan(0.66)
        assert!((entity.fov() - 66.8).abs() < 0.1);
        assert!(entity.angle().abs() < 1e-5);

        let mut zoomed = entity;
        zoomed.scale_direction(2.0);
        assert!(zoomed.fov() < entity.fov());
    }

    #[test]
    fn pickups_are_collected_once() {
        let mut level = pillar().with_sprites(vec![
            Sprite::basic(0.6, 0.6, 11, 0.25, SpriteProperties::empty()),
            Sprite::basic(2.5, 2.5, 11, 0.25, SpriteProperties::empty()),
        ]);
        let entity = Entity::new(0.5, 0.5);

        assert_eq!(entity.collect_pickups(&mut level), 1);
        assert_eq!(entity.collect_pickups(&mut level), 0);
        assert!(!level.sprites[0].active);
        assert!(level.sprites[1].active);
    }

    #[test]
    fn interact_opens_reachable_door() {
        let mut rows = vec![vec![Cell::floor(1); 4]; 1];
        rows[0][2] = Cell::door(3, 500.0);
        let mut level = Level::new(0, Portal::new(0, 0, 0.0), Portal::new(0, 0, 0.0), rows).unwrap();
        let mut timers = Scheduler::new();

        let far = Entity::new(0.5, 0.5);
        assert_eq!(far.interact(&mut level, &mut timers), Interaction::default());

        let near = Entity::new(1.5, 0.5);
        let interaction = near.interact(&mut level, &mut timers);
        assert!(interaction.activated);
        assert_eq!(interaction.passage, None);
        assert_eq!(level.get_cell(2, 0).and_then(Cell::door_data).map(|door| door.status), Some(DoorStatus::Opening));
    }

    #[test]
    fn interact_reports_passages() {
        let rows = vec![vec![Cell::floor(1), Cell::floor(1), Cell::entrance(1)]];
        let mut level = Level::new(0, Portal::new(0, 0, 0.0), Portal::new(0, 0, 0.0), rows).unwrap();
        let mut timers = Scheduler::new();

        let interaction = Entity::new(1.5, 0.5).interact(&mut level, &mut timers);

        assert!(!interaction.activated);
        assert_eq!(interaction.passage, Some(Passage::Entrance));
    }

    proptest! {
        #[test]
        fn never_enters_solid_cells(steps in proptest::collection::vec((-1.0f32..1.0, -3.2f32..3.2), 1..40)) {
            let level = pillar();
            let mut entity = Entity::new(0.5, 0.5);

            for (amount, turn) in steps {
                entity.rotate(turn);
                entity.move_by(amount, &level);

                let cell = level.cell_at(entity.position.x, entity.position.y);
                prop_assert!(cell.is_some_and(|cell| cell.is_passable()));
            }
        }
    }
}

// file entity.rs
