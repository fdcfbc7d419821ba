/// DELVE Project
/// `File` caster.rs
/// `Description` Grid ray casting module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use crate::cell::{Cell, Face};
use crate::entity::Entity;
use crate::level::Level;
use crate::math::Vec2f;

/// Default DDA step budget
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Ray cast result representation structure
#[derive(Copy, Clone, Debug)]
pub struct CastResult<'a> {
    /// Hit cell X coordinate
    pub x: i32,
    /// Hit cell Y coordinate
    pub y: i32,
    pub cell: &'a Cell,
    pub face: Face,
    /// Hit point position across the face, in [0, 1)
    pub wall: f32,
    /// Euclidean distance from ray origin to hit point
    pub distance: f32,
} // struct CastResult

/// Camera plane offset of screen column calculation function
/// * `width` - surface width in columns
/// * `column` - column index
/// * Returns offset in [-1, 1)
pub fn camera_offset(width: usize, column: usize) -> f32 {
    2.0 * column as f32 / width.max(1) as f32 - 1.0
} // fn camera_offset

/// Screen column ray casting function
/// * `width` - surface width in columns
/// * `column` - column to cast ray for
/// * `viewer` - entity looking at level
/// * `level` - level to cast ray in
/// * `max_depth` - DDA step budget
/// * Returns first wall hit or None
pub fn cast_ray<'a>(width: usize, column: usize, viewer: &Entity, level: &'a Level, max_depth: usize) -> Option<CastResult<'a>> {
    let ray = viewer.direction + viewer.camera * camera_offset(width, column);
    cast(viewer.position, ray, level, max_depth)
} // fn cast_ray

/// Ray casting function. Ray is not required to be normalized.
/// * `origin` - ray origin
/// * `ray` - ray direction
/// * `level` - level to cast ray in
/// * `max_depth` - DDA step budget
/// * Returns first wall hit or None if ray left the grid or exhausted step budget
pub fn cast<'a>(origin: Vec2f, ray: Vec2f, level: &'a Level, max_depth: usize) -> Option<CastResult<'a>> {
    let mut map_x = origin.x.floor() as i32;
    let mut map_y = origin.y.floor() as i32;

    let delta_x = if ray.x == 0.0 { f32::INFINITY } else { (1.0 / ray.x).abs() };
    let delta_y = if ray.y == 0.0 { f32::INFINITY } else { (1.0 / ray.y).abs() };

    let (step_x, mut side_x) = if ray.x < 0.0 {
        (-1, (origin.x - map_x as f32) * delta_x)
    } else {
        (1, (map_x as f32 + 1.0 - origin.x) * delta_x)
    };

    let (step_y, mut side_y) = if ray.y < 0.0 {
        (-1, (origin.y - map_y as f32) * delta_y)
    } else {
        (1, (map_y as f32 + 1.0 - origin.y) * delta_y)
    };

    for _ in 0..max_depth {
        let x_side = side_x < side_y;
        let face;

        if x_side {
            side_x += delta_x;
            map_x += step_x;
            face = if step_x < 0 { Face::East } else { Face::West };
        } else {
            side_y += delta_y;
            map_y += step_y;
            face = if step_y > 0 { Face::North } else { Face::South };
        }

        let cell = level.get_cell(map_x, map_y)?;

        if !cell.is_solid() {
            continue;
        }

        let mut plane_offset = if x_side { (1 - step_x) as f32 / 2.0 } else { (1 - step_y) as f32 / 2.0 };

        if cell.is_thin() {
            let (along, delta_along, other) = if x_side { (side_x, delta_x, side_y) } else { (side_y, delta_y, side_x) };

            // Ray leaves the cell through the other axis before reaching the center plane
            if along - delta_along * 0.5 > other {
                continue;
            }
            plane_offset = 0.5;
        }

        let t = if x_side {
            (map_x as f32 - origin.x + plane_offset) / ray.x
        } else {
            (map_y as f32 - origin.y + plane_offset) / ray.y
        };

        let mut wall = if x_side { origin.y + t * ray.y } else { origin.x + t * ray.x };
        wall -= wall.floor();

        if let Some(door) = cell.door_data() {
            let closed = door.closed_fraction();
            if wall > closed {
                continue;
            }
            wall = closed - wall;
            wall -= wall.floor();
        }

        return Some(CastResult {
            x: map_x,
            y: map_y,
            cell,
            face,
            wall,
            distance: (t * ray.length()).abs(),
        });
    }

    None
} // fn cast

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::DoorStatus;
    use crate::level::Portal;
    use proptest::prelude::*;

    /// Room with walls on x, y = 0 and x, y = size - 1, optional extra cell
    fn room(size: usize, extra: Option<(usize, usize, Cell)>) -> Level {
        let mut rows: Vec<Vec<Cell>> = (0..size)
            .map(|y| {
                (0..size)
                    .map(|x| {
                        if x == 0 || y == 0 || x == size - 1 || y == size - 1 {
                            Cell::simple_wall(1)
                        } else {
                            Cell::floor(2)
                        }
                    })
                    .collect()
            })
            .collect();

        if let Some((x, y, cell)) = extra {
            rows[y][x] = cell;
        }

        Level::new(0, Portal::new(1, 1, 0.0), Portal::new(1, 1, 0.0), rows).unwrap()
    }

    #[test]
    fn center_column_hits_far_wall() {
        let level = room(11, None);
        let viewer = Entity::new(5.0, 5.0);

        let hit = cast_ray(2, 1, &viewer, &level, DEFAULT_MAX_DEPTH).unwrap();

        assert_eq!((hit.x, hit.y), (10, 5));
        assert_eq!(hit.face, Face::West);
        assert!((hit.distance - 5.0).abs() < 1e-5);
    }

    #[test]
    fn faces_follow_step_direction() {
        let level = room(11, None);
        let origin = Vec2f::new(5.5, 5.5);

        let faces = [
            (Vec2f::new(1.0, 0.0), Face::West),
            (Vec2f::new(-1.0, 0.0), Face::East),
            (Vec2f::new(0.0, 1.0), Face::North),
            (Vec2f::new(0.0, -1.0), Face::South),
        ]
        .map(|(ray, face)| (cast(origin, ray, &level, DEFAULT_MAX_DEPTH).map(|hit| hit.face), face));

        for (actual, expected) in faces {
            assert_eq!(actual, Some(expected));
        }
    }

    #[test]
    fn depth_budget_exhaustion_is_no_hit() {
        let level = room(11, None);

        assert!(cast(Vec2f::new(5.5, 5.5), Vec2f::new(1.0, 0.0), &level, 3).is_none());
    }

    #[test]
    fn leaving_grid_is_no_hit() {
        let rows = vec![vec![Cell::floor(1); 4]; 4];
        let level = Level::new(0, Portal::new(0, 0, 0.0), Portal::new(0, 0, 0.0), rows).unwrap();

        assert!(cast(Vec2f::new(1.5, 1.5), Vec2f::new(1.0, 0.3), &level, DEFAULT_MAX_DEPTH).is_none());
    }

    #[test]
    fn thin_wall_is_hit_at_center_plane() {
        let level = room(11, Some((7, 5, Cell::thin_wall(3))));

        let hit = cast(Vec2f::new(5.5, 5.5), Vec2f::new(1.0, 0.0), &level, DEFAULT_MAX_DEPTH).unwrap();

        assert_eq!((hit.x, hit.y), (7, 5));
        assert!((hit.distance - 2.0).abs() < 1e-5);
        assert!((hit.wall - 0.5).abs() < 1e-5);
    }

    #[test]
    fn thin_wall_corner_is_passed() {
        let level = room(11, Some((7, 5, Cell::thin_wall(3))));

        // Enters cell (7, 5) through its west face near the top and leaves through the top face
        let hit = cast(Vec2f::new(6.5, 5.95), Vec2f::new(1.0, -1.0), &level, DEFAULT_MAX_DEPTH).unwrap();

        assert_ne!((hit.x, hit.y), (7, 5));
    }

    #[test]
    fn half_open_door() {
        let mut door = Cell::door(3, 1000.0);
        if let Some(data) = door.door_data_mut() {
            data.status = DoorStatus::Opening;
            data.percent = 50.0;
        }
        let level = room(11, Some((7, 5, door)));

        let hit = cast(Vec2f::new(5.5, 5.2), Vec2f::new(1.0, 0.0), &level, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!((hit.x, hit.y), (7, 5));
        assert!((hit.wall - 0.3).abs() < 1e-5);

        let hit = cast(Vec2f::new(5.5, 5.8), Vec2f::new(1.0, 0.0), &level, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!((hit.x, hit.y), (10, 5));
    }

    #[test]
    fn open_door_is_transparent() {
        let mut door = Cell::door(3, 1000.0);
        if let Some(data) = door.door_data_mut() {
            data.status = DoorStatus::Open;
            data.percent = 0.0;
        }
        let level = room(11, Some((7, 5, door)));

        let hit = cast(Vec2f::new(5.5, 5.5), Vec2f::new(1.0, 0.0), &level, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!((hit.x, hit.y), (10, 5));
    }

    proptest! {
        #[test]
        fn door_hit_depends_on_closed_fraction(percent in 1.0f32..100.0, y in 0.01f32..0.99) {
            let mut door = Cell::door(3, 1000.0);
            if let Some(data) = door.door_data_mut() {
                data.status = DoorStatus::Closing;
                data.percent = percent;
            }
            let level = room(11, Some((7, 5, door)));

            let hit = cast(Vec2f::new(5.5, 5.0 + y), Vec2f::new(1.0, 0.0), &level, DEFAULT_MAX_DEPTH).unwrap();

            if y <= percent / 100.0 {
                prop_assert_eq!((hit.x, hit.y), (7, 5));
                prop_assert!(hit.wall >= 0.0 && hit.wall < 1.0);
            } else {
                prop_assert_eq!((hit.x, hit.y), (10, 5));
            }
        }

        #[test]
        fn hits_lie_inside_room(angle in 0.0f32..std::f32::consts::TAU, x in 1.1f32..9.9, y in 1.1f32..9.9) {
            let level = room(11, None);
            let ray = Vec2f::new(1.0, 0.0).rotated(angle);

            let hit = cast(Vec2f::new(x, y), ray, &level, DEFAULT_MAX_DEPTH).unwrap();

            prop_assert!(hit.cell.is_solid());
            prop_assert!(hit.wall >= 0.0 && hit.wall < 1.0);
            prop_assert!(hit.distance <= (2.0f32 * 10.0 * 10.0).sqrt() + 1e-3);
        }
    }
}

// file caster.rs
