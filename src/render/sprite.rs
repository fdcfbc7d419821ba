/// DELVE Project
/// `File` render/sprite.rs
/// `Description` Billboard sprite projector module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use crate::camera::Camera;
use crate::entity::Entity;
use crate::math::*;
use crate::sprite::Sprite;
use crate::surface::{tint_color, Surface};
use crate::texture::TextureView;

/// Sprite drawing order calculation function
/// * `viewer` - viewer position
/// * `sprites` - sprites to order
/// * Returns indices of active sprites, farthest first
pub fn sprite_order(viewer: Vec2f, sprites: &[Sprite]) -> Vec<usize> {
    let mut order = sprites
        .iter()
        .enumerate()
        .filter(|(_, sprite)| sprite.active)
        .map(|(index, sprite)| (index, viewer.distance(sprite.position)))
        .collect::<Vec<_>>();

    order.sort_by(|(_, lhs), (_, rhs)| rhs.total_cmp(lhs));
    order.into_iter().map(|(index, _)| index).collect()
} // fn sprite_order

/// Viewing angle frame selection function
/// * `sprite` - sprite position
/// * `viewer` - viewer position
/// * `frames` - frame count
/// * Returns frame facing the viewer
pub fn static_frame(sprite: Vec2f, viewer: Vec2f, frames: usize) -> u32 {
    let frames = frames.max(1);
    let bucket = 360.0 / frames as f32;
    let degrees = (radians_to_degrees((sprite - viewer).angle()) + bucket / 2.0).rem_euclid(360.0);

    ((degrees / bucket).floor() as usize).min(frames - 1) as u32
} // fn static_frame

/// Sprite projector
#[derive(Default)]
pub struct SpriteProjector;

impl SpriteProjector {
    pub fn new() -> Self {
        Self
    }

    /// Sprite rendering function
    /// * `surface` - surface to render to
    /// * `viewer` - entity looking at level
    /// * `sprites` - level sprites
    /// * `textures` - texture view
    /// * `frame` - animation clock frame
    /// * `depth_buffer` - per-column wall depth, sprites behind walls are skipped
    pub fn render(&mut self, surface: &mut Surface, viewer: &Entity, sprites: &[Sprite], textures: &TextureView, frame: u32, depth_buffer: &[f32]) {
        let ext = surface.get_extent();
        let (width, height) = (ext.width as f32, ext.height as f32);
        let camera = Camera::new(viewer);

        for index in sprite_order(viewer.position, sprites) {
            let sprite = &sprites[index];
            let space = camera.to_space(sprite.position);

            if space.y <= 0.0 {
                continue;
            }

            let texture = textures.get(sprite.texture_id);
            let screen_x = (width / 2.0 * (1.0 + space.x / space.y)) as isize;
            let size = ((height / space.y).abs() * sprite.scale).min(height * 64.0) as usize;
            if size == 0 {
                continue;
            }

            let align = (height / space.y / 2.0).floor() as isize - size as isize / 2;
            let offset = if sprite.is_aligned_bottom() {
                align
            } else if sprite.is_aligned_top() {
                -align
            } else {
                0
            };

            let start_x = screen_x - size as isize / 2;
            let start_y = ext.height as isize / 2 - size as isize / 2 + offset;

            let frame_x = texture.frame_offset(if sprite.is_static() {
                static_frame(sprite.position, viewer.position, texture.frames)
            } else {
                frame
            });
            let tint = if sprite.is_tinted() { tint_color(1.6 / space.y) } else { None };

            let first = start_x.max(0);
            let last = (start_x + size as isize).min(ext.width as isize);

            for column in first..last {
                if depth_buffer.get(column as usize).is_some_and(|depth| *depth <= space.y) {
                    continue;
                }

                let tex_x = ((column - start_x) as usize * texture.width / size).min(texture.width.saturating_sub(1));
                surface.blit_column(texture, frame_x + tex_x, 0.0, texture.height as f32, column, start_y, size, true, tint);
            }
        }
    } // fn render
} // impl SpriteProjector


// file render/sprite.rs
