/// DELVE Project
/// `File` render.rs
/// `Description` Frame rendering module
/// `Author` TioT2
/// `Last changed` 14.10.2026

pub mod floor;
pub mod sprite;

use crate::caster::{camera_offset, cast_ray};
use crate::cell::{CellKind, Face};
use crate::entity::Entity;
use crate::font::Font;
use crate::level::Level;
use crate::math::*;
use crate::surface::{tint_color, Surface};
use crate::texture::TextureView;

use floor::FloorProjector;
use sprite::SpriteProjector;

/// Closest wall depth, prevents wall height overflow
const MIN_DEPTH: f32 = 1e-4;

/// Darkening applied at the horizon
const HORIZON_SHADE: [u8; 4] = [0, 0, 0, 180];

/// Render representation structure
pub struct Render {
    /// Per-column wall depth of the last frame
    depth_buffer: Vec<f32>,
    floor: FloorProjector,
    sprites: SpriteProjector,
} // struct Render

impl Render {
    /// Render create function
    pub fn new() -> Render {
        Render {
            depth_buffer: Vec::new(),
            floor: FloorProjector::new(),
            sprites: SpriteProjector::new(),
        }
    } // fn new

    /// Last frame depth buffer getting function
    pub fn get_depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    } // fn get_depth_buffer

    /// Next frame rendering function
    /// * `surface` - surface to render frame to
    /// * `viewer` - entity to render level from
    /// * `level` - level to render
    /// * `textures` - texture view
    /// * `frame` - animation clock frame
    /// * `max_depth` - ray DDA step budget
    pub fn render(&mut self, surface: &mut Surface, viewer: &Entity, level: &Level, textures: &TextureView, frame: u32, max_depth: usize) {
        let ext = surface.get_extent();
        let half = ext.height / 2;

        surface.fill(0x000000);

        // Upper half
        let textured_ceiling = level.skybox.is_none() && level.ceiling.is_some();
        if level.skybox.is_some() {
            Self::render_skybox(surface, viewer, level, textures);
        } else if !textured_ceiling {
            surface.draw_gradient(0, 0, ext.width, half, [96, 96, 96, 255], [0, 0, 0, 255]);
        }

        self.floor.render(surface, viewer, level, textures, frame, textured_ceiling);

        // Distance darkening of the floor band and the textured ceiling band
        surface.draw_gradient(0, half as isize, ext.width, ext.height - half, HORIZON_SHADE, [0, 0, 0, 0]);
        if textured_ceiling {
            surface.draw_gradient(0, 0, ext.width, half, [0, 0, 0, 0], HORIZON_SHADE);
        }

        self.render_walls(surface, viewer, level, textures, frame, max_depth);
        self.sprites.render(surface, viewer, &level.sprites, textures, frame, &self.depth_buffer);
    } // fn render

    /// Skybox rendering function, skybox wraps once around the viewer
    fn render_skybox(surface: &mut Surface, viewer: &Entity, level: &Level, textures: &TextureView) {
        let Some(skybox) = level.skybox else {
            return;
        };
        let ext = surface.get_extent();
        let texture = textures.get(skybox);

        for x in 0..ext.width {
            let ray = viewer.direction + viewer.camera * camera_offset(ext.width, x);
            let turn = radians_to_degrees(ray.angle()).rem_euclid(360.0) / 360.0;
            let tex_x = ((turn * texture.image_width as f32) as usize).min(texture.image_width.saturating_sub(1));

            surface.blit_column(texture, tex_x, 0.0, texture.image_height as f32, x as isize, 0, ext.height / 2, false, None);
        }
    } // fn render_skybox

    /// Wall columns rendering function, fills depth buffer
    fn render_walls(&mut self, surface: &mut Surface, viewer: &Entity, level: &Level, textures: &TextureView, frame: u32, max_depth: usize) {
        let ext = surface.get_extent();
        let height = ext.height as f32;
        let view_angle = viewer.direction.angle();
        let direction_length = viewer.direction.length();

        self.depth_buffer.clear();
        self.depth_buffer.resize(ext.width, max_depth as f32);

        for x in 0..ext.width {
            let Some(hit) = cast_ray(ext.width, x, viewer, level, max_depth) else {
                continue;
            };

            let ray = viewer.direction + viewer.camera * camera_offset(ext.width, x);
            let perpendicular = hit.distance * (ray.angle() - view_angle).cos();
            let depth = (perpendicular / direction_length).max(MIN_DEPTH);
            self.depth_buffer[x] = depth;

            let wall_height = (height / depth).floor().abs().min(height * 64.0) as usize;
            let texture = textures.get(hit.cell.texture_id(hit.face));

            let mut tex_x = ((hit.wall * texture.width as f32) as usize).min(texture.width.saturating_sub(1));
            if matches!(hit.face, Face::North | Face::East) {
                tex_x = texture.width.saturating_sub(1) - tex_x;
            }

            surface.blit_column(
                texture,
                texture.frame_offset(frame) + tex_x,
                texture.state_offset(hit.cell.state) as f32,
                texture.height as f32,
                x as isize,
                (ext.height / 2) as isize - (wall_height / 2) as isize,
                wall_height,
                false,
                tint_color(wall_height as f32 * 1.6 / height),
            );
        }
    } // fn render_walls

    /// Loading placeholder rendering function
    /// * `surface` - surface to render to
    /// * `name` - level name to display
    /// * `font` - font to display name with
    pub fn render_loading(&mut self, surface: &mut Surface, name: &str, font: &Font) {
        let ext = surface.get_extent();
        let letter = font.get_letter_size();

        surface.fill(0x000000);
        font.put_string(
            surface,
            (ext.width as isize - font.get_string_width(name) as isize) / 2,
            (ext.height as isize - letter.height as isize) / 2,
            name,
            0xFFFFFF,
        );
    } // fn render_loading

    /// Minimap rendering function
    /// * `surface` - surface to render minimap to, the whole surface is used
    /// * `level` - level to display
    /// * `viewer` - entity to display
    pub fn render_minimap(&mut self, surface: &mut Surface, level: &Level, viewer: &Entity) {
        let ext = surface.get_extent();
        let cell_size = (ext.width.min(ext.height) / level.width().max(level.height()).max(1)).max(1);
        let cell_size_f = cell_size as f32;

        for (x, y, cell) in level.iter_cells() {
            let color = match cell.kind {
                CellKind::Door(_) if !cell.is_solid() => 0x3A2A1A,
                CellKind::Door(_) => 0x8B5A2B,
                CellKind::Entrance => 0xC04040,
                CellKind::Exit => 0x40C040,
                _ if cell.is_solid() => 0xB0B0B0,
                _ if cell.is_blocked() => 0x505050,
                _ => 0x202020,
            };
            surface.draw_bar(x as isize * cell_size as isize, y as isize * cell_size as isize, cell_size, cell_size, color);
        }

        for sprite in level.sprites.iter().filter(|sprite| sprite.active) {
            let p = sprite.position * cell_size_f;
            surface.put_pixel(p.x as isize, p.y as isize, 0xFFD700);
        }

        let to_map = |p: Vec2f| -> (isize, isize) {
            let p = p * cell_size_f;
            (p.x as isize, p.y as isize)
        };

        let length = 2.0 / viewer.direction.length();
        let origin = to_map(viewer.position);
        let plane_center = viewer.position + viewer.direction * length;
        let plane_left = to_map(plane_center - viewer.camera * length);
        let plane_right = to_map(plane_center + viewer.camera * length);
        let heading = to_map(plane_center);

        // Field of view edges
        surface.draw_line(origin.0, origin.1, plane_left.0, plane_left.1, 0xFF0000);
        surface.draw_line(origin.0, origin.1, plane_right.0, plane_right.1, 0xFF0000);
        // Camera plane
        surface.draw_line(plane_left.0, plane_left.1, plane_right.0, plane_right.1, 0x0000FF);
        // Heading
        surface.draw_line(origin.0, origin.1, heading.0, heading.1, 0xFFFF00);

        surface.draw_bar(origin.0 - 1, origin.1 - 1, 3, 3, 0xFFFFFF);
        surface.draw_frame(0, 0, cell_size * level.width(), cell_size * level.height(), 0x808080);
    } // fn render_minimap
} // impl Render

impl Default for Render {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::DecodedImage;
    use crate::cell::Cell;
    use crate::level::Portal;
    use crate::texture::{Texture, TextureRegistry};

    fn room(size: usize) -> Level {
        let rows = (0..size)
            .map(|y| {
                (0..size)
                    .map(|x| if x == 0 || y == 0 || x == size - 1 || y == size - 1 { Cell::simple_wall(1) } else { Cell::floor(2) })
                    .collect()
            })
            .collect();

        Level::new(0, Portal::new(1, 1, 0.0), Portal::new(1, 1, 0.0), rows).unwrap()
    }

    fn registry() -> TextureRegistry {
        let mut wall = Texture::basic(1, "wall.png", 4, 4);
        wall.set_image(DecodedImage::solid(4, 4, [255, 255, 255, 255]));
        let mut floor = Texture::basic(2, "floor.png", 4, 4);
        floor.set_image(DecodedImage::solid(4, 4, [0, 0, 255, 255]));

        TextureRegistry::from_textures([wall, floor])
    }

    #[test]
    fn depth_buffer_holds_corrected_distance() {
        let level = room(11);
        let registry = registry();
        let view = registry.view();

        let mut data = vec![0u32; 32 * 24];
        let mut surface = Surface::new(&mut data, 32, 24);
        let mut render = Render::new();
        render.render(&mut surface, &Entity::new(5.5, 5.5), &level, &view, 0, 50);

        let depth = render.get_depth_buffer();
        assert_eq!(depth.len(), 32);
        assert!((depth[16] - 4.5).abs() < 1e-4);

        // Flat wall ahead: corrected depth is equal for every column hitting it
        assert!(depth[8..24].iter().all(|d| (d - 4.5).abs() < 1e-3));
    }

    #[test]
    fn zoom_keeps_depth_in_ray_units() {
        let level = room(11);
        let registry = registry();
        let view = registry.view();

        let mut viewer = Entity::new(5.5, 5.5);
        viewer.scale_direction(2.0);

        let mut data = vec![0u32; 32 * 24];
        let mut surface = Surface::new(&mut data, 32, 24);
        let mut render = Render::new();
        render.render(&mut surface, &viewer, &level, &view, 0, 50);

        assert!((render.get_depth_buffer()[16] - 2.25).abs() < 1e-4);
    }

    #[test]
    fn loading_screen_is_centered() {
        let mut data = vec![0x123456u32; 64 * 16];
        let mut surface = Surface::new(&mut data, 64, 16);
        let font = Font::default();

        Render::new().render_loading(&mut surface, "AB", &font);

        // Text is drawn inside the centered box only
        let width = font.get_string_width("AB") as usize;
        let left = (64 - width) / 2;
        for (index, pixel) in data.iter().enumerate() {
            let (x, y) = (index % 64, index / 64);
            if *pixel != 0 {
                assert!(x >= left && x < left + width && (4..12).contains(&y));
            }
        }
        assert!(data.iter().any(|pixel| *pixel == 0xFFFFFF));
    }

    #[test]
    fn minimap_marks_walls_and_player() {
        let level = room(5);
        let mut data = vec![0u32; 20 * 20];
        let mut surface = Surface::new(&mut data, 20, 20);

        Render::new().render_minimap(&mut surface, &level, &Entity::new(2.5, 2.5));

        // 4 pixels per cell, top left wall cell interior
        assert_eq!(data[1 * 20 + 1], 0xB0B0B0);
        // Player marker
        assert_eq!(data[10 * 20 + 10], 0xFFFFFF);
    }
}

// file render.rs
