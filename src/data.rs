/// DELVE Project
/// `File` data.rs
/// `Description` Built-in textures and levels module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use crate::cell::{Cell, DEFAULT_DOOR_SPEED_MS};
use crate::level::{Level, LevelError, Portal, WlvLoadingError};
use crate::sprite::{Sprite, SpriteProperties};
use crate::texture::Texture;

/// Built-in texture catalogue getting function
/// * Returns texture records, sources are relative to asset root
pub fn textures() -> Vec<Texture> {
    vec![
        Texture::basic(1, "debug.wall.01.png", 16, 16),
        Texture::basic(2, "debug.floor.01.png", 16, 16),
        Texture::basic(3, "debug.ceiling.01.png", 16, 16),
        Texture::stateful(4, "debug.switch.toggle.png", 16, 16, 2),
        Texture::animated(5, "debug.animated.01.png", 16, 16, 8),
        Texture::basic(6, "debug.wall.north.png", 16, 16),
        Texture::basic(7, "debug.wall.east.png", 16, 16),
        Texture::basic(8, "debug.wall.south.png", 16, 16),
        Texture::basic(9, "debug.wall.west.png", 16, 16),
        Texture::stateful(10, "debug.switch.cycle.png", 16, 16, 8),
        Texture::animated(11, "object.coin.01.png", 16, 16, 8),
    ]
} // fn textures

/// Playground level building function
pub fn playground() -> Result<Level, LevelError> {
    let i = || Cell::invisible_wall(2);
    let f = || Cell::floor(2);
    let sw = Cell::simple_wall;

    let rows = vec![
        vec![i(), i(), sw(5), i(), i(), i(), i(), i(), i(), i()],
        vec![i(), f(), f(), f(), f(), f(), f(), f(), f(), i()],
        vec![i(), f(), f(), Cell::floor(5), Cell::floor(5), f(), f(), f(), Cell::switch_toggle([4, 1, 1, 1, 1, 1]), i()],
        vec![i(), f(), f(), Cell::floor(5), Cell::floor(5), sw(2), Cell::door(2, DEFAULT_DOOR_SPEED_MS), sw(2), f(), i()],
        vec![i(), f(), f(), f(), f(), f(), f(), f(), f(), i()],
        vec![sw(2), f(), f(), f(), f(), f(), f(), f(), f(), sw(2)],
        vec![
            Cell::simple_switch_cycler(10),
            f(),
            f(),
            Cell::wall([6, 7, 8, 9, 2, 2]),
            f(),
            f(),
            f(),
            Cell::wall([2, 5, 2, 5, 2, 2]),
            f(),
            sw(2),
        ],
        vec![Cell::door(2, DEFAULT_DOOR_SPEED_MS), f(), f(), f(), f(), f(), f(), f(), f(), Cell::thin_wall(2)],
        vec![sw(2), f(), f(), f(), f(), f(), f(), f(), Cell::exit(5), sw(2)],
        vec![sw(1), sw(1), sw(5), sw(1), Cell::simple_switch_toggle(4), sw(2), Cell::thin_wall(2), sw(2), sw(2), sw(2)],
    ];

    let sprites = vec![
        Sprite::basic(4.5, 5.5, 11, 0.25, SpriteProperties::ALIGN_BOTTOM),
        Sprite::basic(5.5, 5.5, 5, 1.0, SpriteProperties::empty()),
        Sprite::basic(6.5, 5.5, 11, 0.25, SpriteProperties::ALIGN_BOTTOM | SpriteProperties::STATIC),
        Sprite::basic(7.5, 5.5, 5, 0.25, SpriteProperties::ALIGN_TOP),
    ];

    Ok(Level::new(0, Portal::new(5, 1, 90.0), Portal::new(5, 5, 270.0).with_destination(1), rows)?
        .with_name("Playground")
        .with_floor(2)
        .with_sprites(sprites))
} // fn playground

/// Cellar level loading function
pub fn cellar() -> Result<Level, WlvLoadingError> {
    Level::load_from_wlv(include_str!("../maps/cellar.wlv"))
} // fn cellar

/// Built-in level catalogue getting function
/// * Returns levels indexed by depth
pub fn levels() -> Result<Vec<Level>, WlvLoadingError> {
    Ok(vec![playground()?, cellar()?])
} // fn levels

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellKind;
    use crate::state::find_spawn;

    #[test]
    fn catalogue_ids_are_unique_and_cover_levels() {
        let textures = textures();
        let ids = textures.iter().map(|texture| texture.id).collect::<std::collections::BTreeSet<_>>();
        assert_eq!(ids.len(), textures.len());

        for level in levels().unwrap() {
            assert!(level.texture_ids().is_subset(&ids), "{}", level.display_name());
        }
    }

    #[test]
    fn levels_are_ordered_by_depth() {
        for (index, level) in levels().unwrap().iter().enumerate() {
            assert_eq!(level.depth, index);
        }
    }

    #[test]
    fn playground_layout() {
        let level = playground().unwrap();

        assert_eq!((level.width(), level.height()), (10, 10));
        assert_eq!(level.display_name(), "Playground");
        assert!(level.get_cell(6, 3).is_some_and(|cell| cell.is_door()));
        assert!(matches!(level.get_cell(8, 8).map(|cell| &cell.kind), Some(CellKind::Exit)));
        assert_eq!(find_spawn(&level, &level.entrance), Some((5, 1)));
        assert_eq!(find_spawn(&level, &level.exit), Some((5, 5)));
    }

    #[test]
    fn cellar_layout() {
        let level = cellar().unwrap();

        assert_eq!((level.width(), level.height()), (8, 8));
        assert_eq!(level.depth, 1);
        assert_eq!(level.ceiling, Some(3));
        assert!(matches!(level.get_cell(2, 0).map(|cell| &cell.kind), Some(CellKind::Entrance)));
        assert_eq!(level.get_cell(2, 3).and_then(|cell| cell.door_data()).map(|door| door.speed_ms), Some(500.0));
        assert_eq!(level.exit.destination, Some(0));
        assert_eq!(find_spawn(&level, &level.entrance), Some((2, 1)));
        assert_eq!(level.sprites.len(), 3);
    }
}

// file data.rs
