//! Minimal geometry types shared by the meshing crates.
#![forbid(unsafe_code)]

mod face;
mod ivec;

pub use face::Face;
pub use ivec::IVec3;

use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// World units per node edge.
pub const BS: f32 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn from_ivec(p: IVec3) -> Self {
        Self::new(p.x as f32, p.y as f32, p.z as f32)
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Component-wise product.
    #[inline]
    pub fn scaled(self, s: Vec3) -> Vec3 {
        Vec3::new(self.x * s.x, self.y * s.y, self.z * s.z)
    }

    // Rotations follow the left-handed convention of the scene graph the
    // meshes are authored for: positive angles turn X towards Z (XZ),
    // X towards Y (XY) and Y towards Z (YZ).

    #[inline]
    pub fn rotate_xz_by(self, degrees: f32) -> Vec3 {
        let (sn, cs) = sin_cos_deg(degrees);
        let (x, z) = (self.x as f64, self.z as f64);
        Vec3::new((x * cs - z * sn) as f32, self.y, (x * sn + z * cs) as f32)
    }

    #[inline]
    pub fn rotate_xy_by(self, degrees: f32) -> Vec3 {
        let (sn, cs) = sin_cos_deg(degrees);
        let (x, y) = (self.x as f64, self.y as f64);
        Vec3::new((x * cs - y * sn) as f32, (x * sn + y * cs) as f32, self.z)
    }

    #[inline]
    pub fn rotate_yz_by(self, degrees: f32) -> Vec3 {
        let (sn, cs) = sin_cos_deg(degrees);
        let (y, z) = (self.y as f64, self.z as f64);
        Vec3::new(self.x, (y * cs - z * sn) as f32, (y * sn + z * cs) as f32)
    }
}

#[inline]
fn sin_cos_deg(degrees: f32) -> (f64, f64) {
    (degrees as f64).to_radians().sin_cos()
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Texture coordinate pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Rotates around `center`; positive angles turn X towards Y.
    #[inline]
    pub fn rotate_by(self, degrees: f32, center: Vec2) -> Vec2 {
        let (sn, cs) = sin_cos_deg(degrees);
        let x = (self.x - center.x) as f64;
        let y = (self.y - center.y) as f64;
        Vec2::new(
            (x * cs - y * sn) as f32 + center.x,
            (x * sn + y * cs) as f32 + center.y,
        )
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[inline]
    pub const fn from_coords(x1: f32, y1: f32, z1: f32, x2: f32, y2: f32, z2: f32) -> Self {
        Self {
            min: Vec3::new(x1, y1, z1),
            max: Vec3::new(x2, y2, z2),
        }
    }

    /// Smallest box containing both points.
    #[inline]
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self::new(a, b).repaired()
    }

    /// Swaps min/max per axis where they are inverted.
    #[inline]
    pub fn repaired(self) -> Self {
        Self {
            min: Vec3::new(
                self.min.x.min(self.max.x),
                self.min.y.min(self.max.y),
                self.min.z.min(self.max.z),
            ),
            max: Vec3::new(
                self.min.x.max(self.max.x),
                self.min.y.max(self.max.y),
                self.min.z.max(self.max.z),
            ),
        }
    }

    #[inline]
    pub fn translated(self, by: Vec3) -> Self {
        Self::new(self.min + by, self.max + by)
    }

    #[inline]
    pub fn scaled(self, s: f32) -> Self {
        Self::new(self.min * s, self.max * s)
    }

    /// Rotates both corners around the Y axis and repairs the result.
    #[inline]
    pub fn rotate_xz_by(self, degrees: f32) -> Self {
        Self::new(self.min.rotate_xz_by(degrees), self.max.rotate_xz_by(degrees)).repaired()
    }

    #[inline]
    pub fn extent(self) -> Vec3 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn repaired_is_ordered(b in any::<Aabb>()) {
            prop_assume!(b.min.x.is_finite() && b.min.y.is_finite() && b.min.z.is_finite());
            prop_assume!(b.max.x.is_finite() && b.max.y.is_finite() && b.max.z.is_finite());
            let r = b.repaired();
            prop_assert!(r.min.x <= r.max.x && r.min.y <= r.max.y && r.min.z <= r.max.z);
        }
    }

    #[test]
    fn xz_quarter_turn_maps_x_to_z() {
        let v = Vec3::new(1.0, 2.0, 0.0).rotate_xz_by(90.0);
        assert!((v.x).abs() < 1e-6);
        assert!((v.z - 1.0).abs() < 1e-6);
        assert_eq!(v.y, 2.0);
    }
}
