use crate::math::Vec2f;
use crate::texture::TextureId;

bitflags::bitflags! {
    /// Sprite property flags
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct SpriteProperties: u32 {
        /// Distance darkening
        const TINT = 1;
        const ALIGN_TOP = 2;
        const ALIGN_BOTTOM = 4;
        /// Frame is selected by viewing angle instead of animation clock
        const STATIC = 8;
    }
}

/// Billboard sprite
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub position: Vec2f,
    pub active: bool,
    pub scale: f32,
    pub texture_id: TextureId,
    pub properties: SpriteProperties,
} // struct Sprite

impl Sprite {
    /// Tinted sprite construction function
    /// * `x`, `y` - world position
    /// * `texture_id` - sprite texture
    /// * `scale` - apparent size scale
    /// * `properties` - additional properties
    pub fn basic(x: f32, y: f32, texture_id: TextureId, scale: f32, properties: SpriteProperties) -> Self {
        Self::no_tint(x, y, texture_id, scale, properties | SpriteProperties::TINT)
    } // fn basic

    /// Sprite without distance darkening construction function
    pub fn no_tint(x: f32, y: f32, texture_id: TextureId, scale: f32, properties: SpriteProperties) -> Self {
        Self {
            position: Vec2f::new(x, y),
            active: true,
            scale,
            texture_id,
            properties,
        }
    } // fn no_tint

    pub fn is_tinted(&self) -> bool {
        self.properties.contains(SpriteProperties::TINT)
    }

    pub fn is_aligned_top(&self) -> bool {
        self.properties.contains(SpriteProperties::ALIGN_TOP)
    }

    pub fn is_aligned_bottom(&self) -> bool {
        self.properties.contains(SpriteProperties::ALIGN_BOTTOM)
    }

    pub fn is_static(&self) -> bool {
        self.properties.contains(SpriteProperties::STATIC)
    }
} // impl Sprite

// file sprite.rs
