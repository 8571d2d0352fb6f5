use nodemesh_geom::{Vec2, Vec3};
use nodemesh_lighting::{LightPair, day, night};

/// 8-bit ARGB vertex colour.
///
/// While a mesh is being built the channels hold `(alpha, day, night, 0)`;
/// assembly replaces them with the blended display colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[inline]
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Temporary build colour carrying both light banks.
    #[inline]
    pub fn from_light(alpha: u8, light: LightPair) -> Self {
        Self::new(alpha, day(light), night(light), 0)
    }

    #[inline]
    pub fn day(self) -> u8 {
        self.r
    }

    #[inline]
    pub fn night(self) -> u8 {
        self.g
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,
    pub normal: Vec3,
    pub color: Color,
    pub uv: Vec2,
}

impl Vertex {
    #[inline]
    pub fn new(pos: Vec3, normal: Vec3, color: Color, uv: Vec2) -> Self {
        Self {
            pos,
            normal,
            color,
            uv,
        }
    }
}

/// Two triangles over four vertices.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];
