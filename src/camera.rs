use crate::entity::Entity;
use crate::math::*;

/// Viewer camera space transform
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    pub location: Vec2f,
    pub direction: Vec2f,
    pub plane: Vec2f,

    inv_det: f32,
}

impl Camera {
    /// Camera of entity construction function
    pub fn new(entity: &Entity) -> Self {
        Self {
            location: entity.position,
            direction: entity.direction,
            plane: entity.camera,
            inv_det: 1.0 / (entity.camera % entity.direction),
        }
    } // fn new

    /// World point to camera space transform function
    /// * `p` - world point
    /// * Returns point in [camera plane, direction] basis, `y` is depth
    pub fn to_space(&self, p: Vec2f) -> Vec2f {
        let d = p - self.location;

        Vec2f {
            x: self.inv_det * (d % self.direction),
            y: self.inv_det * (self.plane % d),
        }
    } // fn to_space
}


// file camera.rs
