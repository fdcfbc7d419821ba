/// DELVE Project
/// `File` render/floor.rs
/// `Description` Floor and ceiling projector module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use crate::cell::Face;
use crate::entity::Entity;
use crate::level::Level;
use crate::surface::Surface;
use crate::texture::{TextureId, TextureView};

/// Per-row floor/ceiling projector with reusable row buffers
#[derive(Default)]
pub struct FloorProjector {
    floor_row: Vec<u32>,
    ceiling_row: Vec<u32>,
} // struct FloorProjector

/// Texture sample at world point getting function
/// * `mirror` - mirror texture X axis
/// * Returns 0xAARRGGBB sample or None if there is nothing to sample
fn sample(level: &Level, textures: &TextureView, face: Face, fallback: Option<TextureId>, x: f32, y: f32, frame: u32, mirror: bool) -> Option<u32> {
    let (cell_x, cell_y) = (x.floor(), y.floor());

    let (texture_id, state) = match level.get_cell(cell_x as i32, cell_y as i32) {
        Some(cell) => (cell.texture_id(face), cell.state),
        None => (fallback?, 0),
    };
    let texture = textures.get(texture_id);

    let width = texture.width as isize;
    let height = texture.height as isize;
    let mut tx = ((width as f32 * (x - cell_x)) as isize).rem_euclid(width) as usize;
    let ty = ((height as f32 * (y - cell_y)) as isize).rem_euclid(height) as usize;

    if mirror {
        tx = texture.width - 1 - tx;
    }

    Some(texture.pixel(texture.frame_offset(frame) + tx, texture.state_offset(state) + ty))
} // fn sample

impl FloorProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Floor (and optionally ceiling) rendering function
    /// * `surface` - surface to render to
    /// * `viewer` - entity looking at level
    /// * `level` - level to render
    /// * `textures` - texture view
    /// * `frame` - animation frame
    /// * `ceiling` - also project textured ceiling, mirrored about the horizon
    pub fn render(&mut self, surface: &mut Surface, viewer: &Entity, level: &Level, textures: &TextureView, frame: u32, ceiling: bool) {
        let ext = surface.get_extent();
        if ext.width == 0 || ext.height < 2 {
            return;
        }

        let half = ext.height / 2;
        let ray_left = viewer.direction - viewer.camera;
        let ray_right = viewer.direction + viewer.camera;
        let ceiling_fallback = level.ceiling.or(level.floor);

        for y in half..ext.height {
            // Horizon row is infinitely far, clamp it to the first row below
            let row_offset = (y - half).max(1) as f32;
            let row_distance = half as f32 / row_offset;

            let step = (ray_right - ray_left) * (row_distance / ext.width as f32);
            let mut point = viewer.position + ray_left * row_distance;

            let ceiling_y = ext.height - 1 - y;

            self.floor_row.clear();
            self.floor_row.extend_from_slice(surface.row(y).unwrap_or_default());
            self.ceiling_row.clear();
            if ceiling {
                self.ceiling_row.extend_from_slice(surface.row(ceiling_y).unwrap_or_default());
            }

            for x in 0..ext.width.min(self.floor_row.len()) {
                if let Some(pixel) = sample(level, textures, Face::Bottom, level.floor, point.x, point.y, frame, false) {
                    self.floor_row[x] = pixel & 0x00FF_FFFF;
                }

                if let Some(slot) = self.ceiling_row.get_mut(x) {
                    if let Some(pixel) = sample(level, textures, Face::Top, ceiling_fallback, point.x, point.y, frame, true) {
                        *slot = pixel & 0x00FF_FFFF;
                    }
                }

                point = point + step;
            }

            surface.put_row(y, &self.floor_row);
            if ceiling {
                surface.put_row(ceiling_y, &self.ceiling_row);
            }
        }
    } // fn render
} // impl FloorProjector

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::DecodedImage;
    use crate::cell::Cell;
    use crate::level::Portal;
    use crate::texture::{Texture, TextureRegistry};

    fn registry() -> TextureRegistry {
        let mut floor = Texture::basic(2, "floor.png", 2, 2);
        floor.set_image(DecodedImage::solid(2, 2, [0, 255, 0, 255]));
        let mut ceiling = Texture::basic(3, "ceiling.png", 2, 2);
        ceiling.set_image(DecodedImage::solid(2, 2, [0, 0, 255, 255]));

        TextureRegistry::from_textures([floor, ceiling])
    }

    #[test]
    fn floor_fills_lower_half() {
        let rows = vec![vec![Cell::new(crate::cell::CellKind::Floor, [1, 1, 1, 1, 3, 2], crate::cell::CellProperties::empty()); 8]; 8];
        let level = Level::new(0, Portal::new(0, 0, 0.0), Portal::new(0, 0, 0.0), rows).unwrap().with_floor(2).with_ceiling(3);
        let registry = registry();
        let view = registry.view();

        let mut data = vec![0u32; 16 * 10];
        let mut surface = Surface::new(&mut data, 16, 10);
        FloorProjector::new().render(&mut surface, &Entity::new(4.0, 4.0), &level, &view, 0, true);

        assert!(data[..16 * 5].iter().all(|p| *p == 0x0000FF));
        assert!(data[16 * 5..].iter().all(|p| *p == 0x00FF00));
    }

    #[test]
    fn outside_grid_without_default_is_untouched() {
        let level = Level::new(0, Portal::new(0, 0, 0.0), Portal::new(0, 0, 0.0), vec![vec![Cell::floor(2)]]).unwrap();
        let registry = registry();
        let view = registry.view();

        let mut data = vec![0x123456u32; 8 * 8];
        let mut surface = Surface::new(&mut data, 8, 8);
        FloorProjector::new().render(&mut surface, &Entity::new(50.5, 50.5), &level, &view, 0, false);

        assert!(data.iter().all(|p| *p == 0x123456));
    }
}

// file render/floor.rs
