/// DELVE Project
/// `File` math.rs
/// `Description` Math utilities implementation module
/// `Author` TioT2
/// `Last changed` 14.10.2026

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

impl<T: std::fmt::Display> std::fmt::Display for Vec2<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("<{}, {}>", self.x, self.y))
    }
} // impl std::fmt::Display for Vec2

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ext2<T> {
    pub width: T,
    pub height: T,
}

pub type Vec2f = Vec2<f32>;
pub type Ext2su = Ext2<usize>;

impl Vec2f {
    /// Vector construction function
    /// * `x` - x component
    /// * `y` - y component
    /// * Returns vector
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    } // fn new

    /// Zero vector getting function
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    } // fn zero

    /// Vector length calculation function
    /// * Returns vector length
    pub fn length(self) -> f32 {
        (self ^ self).sqrt()
    } // fn length

    /// Normalized vector getting function
    /// * Returns vector with same direction and unit length
    pub fn normalized(self) -> Self {
        let inv_length = 1.0 / self.length();

        Self {
            x: self.x * inv_length,
            y: self.y * inv_length,
        }
    } // fn normalized

    /// Rotated vector getting function
    /// * `radians` - angle to rotate by
    /// * Returns rotated vector
    pub fn rotated(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();

        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    } // fn rotated

    /// Dot product calculation function
    pub fn dot(self, rhs: Self) -> f32 {
        self ^ rhs
    } // fn dot

    /// Vector heading getting function
    /// * Returns angle between vector and X axis, in radians
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    } // fn angle

    /// Angle between vectors calculation function
    /// * `rhs` - second vector
    /// * Returns unsigned angle between vectors, in radians
    pub fn angle_to(self, rhs: Self) -> f32 {
        (self.normalized() ^ rhs.normalized()).clamp(-1.0, 1.0).acos()
    } // fn angle_to

    /// Distance between points calculation function
    pub fn distance(self, rhs: Self) -> f32 {
        (self - rhs).length()
    } // fn distance
} // impl Vec2f

impl std::ops::Add<Vec2f> for Vec2f {
    type Output = Vec2f;
    fn add(self, rhs: Vec2f) -> Self::Output {
        Self::Output { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub<Vec2f> for Vec2f {
    type Output = Vec2f;
    fn sub(self, rhs: Vec2f) -> Self::Output {
        Self::Output { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2f {
    type Output = Vec2f;
    fn mul(self, rhs: f32) -> Self::Output {
        Self::Output { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::ops::Neg for Vec2f {
    type Output = Vec2f;
    fn neg(self) -> Self::Output {
        Self::Output { x: -self.x, y: -self.y }
    }
}

/// Dot product
impl std::ops::BitXor<Vec2f> for Vec2f {
    type Output = f32;
    fn bitxor(self, rhs: Vec2f) -> Self::Output {
        self.x * rhs.x + self.y * rhs.y
    }
}

/// Cross product (z component)
impl std::ops::Rem<Vec2f> for Vec2f {
    type Output = f32;
    fn rem(self, rhs: Vec2f) -> Self::Output {
        self.x * rhs.y - self.y * rhs.x
    }
}

/// Degrees to radians conversion function
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
} // fn degrees_to_radians

/// Radians to degrees conversion function
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * (180.0 / std::f32::consts::PI)
} // fn radians_to_degrees

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn dot_and_cross() {
        let a = Vec2f::new(1.0, 2.0);
        let b = Vec2f::new(3.0, -1.0);

        assert_eq!(a ^ b, 1.0);
        assert_eq!(a % b, -7.0);
        assert_eq!(a.dot(b), 1.0);
    }

    #[test]
    fn quarter_turn() {
        let v = Vec2f::new(1.0, 0.0).rotated(std::f32::consts::FRAC_PI_2);

        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
        assert!((v.angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn angle_between_perpendicular_vectors() {
        let a = Vec2f::new(2.0, 0.0);
        let b = Vec2f::new(0.0, 5.0);

        assert!((a.angle_to(b) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn rotation_round_trip(x in -100.0f32..100.0, y in -100.0f32..100.0, theta in -10.0f32..10.0) {
            let v = Vec2f::new(x, y);
            let back = v.rotated(theta).rotated(-theta);

            prop_assert!((back.x - v.x).abs() < 1e-3);
            prop_assert!((back.y - v.y).abs() < 1e-3);
        }

        #[test]
        fn normalized_has_unit_length(x in 0.01f32..100.0, y in -100.0f32..100.0) {
            let length = Vec2f::new(x, y).normalized().length();

            prop_assert!((length - 1.0).abs() < 1e-4);
        }
    }
}

// file math.rs
