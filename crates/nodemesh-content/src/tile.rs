use core::hash::{Hash, Hasher};

use bitflags::bitflags;
use nodemesh_geom::Vec2;

/// A texture region: either a whole texture (`pos` 0,0 and `size` 1,1) or a
/// rectangle inside an atlas.
#[derive(Copy, Clone, Debug)]
pub struct TextureRef {
    /// Interned name id, resolvable through the texture source.
    pub id: u32,
    /// Atlas the region lives in; 0 when the texture is standalone.
    pub atlas: u32,
    pub pos: [f32; 2],
    pub size: [f32; 2],
    /// How many times the region may repeat along X before it has to be
    /// split; 0 means unlimited.
    pub tiled: u16,
}

impl TextureRef {
    pub const fn standalone(id: u32) -> Self {
        Self {
            id,
            atlas: 0,
            pos: [0.0, 0.0],
            size: [1.0, 1.0],
            tiled: 0,
        }
    }

    #[inline]
    pub fn x0(&self) -> f32 {
        self.pos[0]
    }

    #[inline]
    pub fn y0(&self) -> f32 {
        self.pos[1]
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size[0]
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size[1]
    }

    /// Maps a unit texture coordinate into this region.
    #[inline]
    pub fn map_uv(&self, uv: Vec2) -> Vec2 {
        Vec2::new(self.pos[0] + uv.x * self.size[0], self.pos[1] + uv.y * self.size[1])
    }

    /// Rotates the region by 180 degrees.
    pub fn flipped(mut self) -> Self {
        for i in 0..2 {
            self.pos[i] += self.size[i];
            self.size[i] = -self.size[i];
        }
        self
    }
}

impl Default for TextureRef {
    fn default() -> Self {
        TextureRef::standalone(0)
    }
}

// Regions compare by bit pattern so equal tiles hash equally.
impl PartialEq for TextureRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.atlas == other.atlas
            && self.tiled == other.tiled
            && self.pos.map(f32::to_bits) == other.pos.map(f32::to_bits)
            && self.size.map(f32::to_bits) == other.size.map(f32::to_bits)
    }
}

impl Eq for TextureRef {}

impl Hash for TextureRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.atlas.hash(state);
        self.tiled.hash(state);
        self.pos.map(f32::to_bits).hash(state);
        self.size.map(f32::to_bits).hash(state);
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MaterialType {
    #[default]
    Opaque,
    Basic,
    Alpha,
    LiquidTransparent,
    LiquidOpaque,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MaterialFlags: u8 {
        const BACKFACE_CULLING = 0x01;
        const CRACK = 0x02;
        const CRACK_OVERLAY = 0x04;
        const ANIMATION_VERTICAL_FRAMES = 0x08;
    }
}

impl Default for MaterialFlags {
    fn default() -> Self {
        MaterialFlags::BACKFACE_CULLING
    }
}

/// Material of one face. Two faces can share a draw call exactly when their
/// tiles compare equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileSpec {
    pub texture: TextureRef,
    pub alpha: u8,
    pub material_type: MaterialType,
    pub material_flags: MaterialFlags,
    pub animation_frame_count: u16,
    pub animation_frame_length_ms: u32,
}

impl Default for TileSpec {
    fn default() -> Self {
        Self {
            texture: TextureRef::default(),
            alpha: 255,
            material_type: MaterialType::Opaque,
            material_flags: MaterialFlags::default(),
            animation_frame_count: 1,
            animation_frame_length_ms: 0,
        }
    }
}

impl TileSpec {
    #[inline]
    pub fn has(&self, flags: MaterialFlags) -> bool {
        self.material_flags.contains(flags)
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        self.has(MaterialFlags::ANIMATION_VERTICAL_FRAMES) && self.animation_frame_count > 1
    }

    /// Copy with `set` added and `clear` removed.
    #[inline]
    pub fn with_flags(mut self, set: MaterialFlags, clear: MaterialFlags) -> Self {
        self.material_flags.remove(clear);
        self.material_flags.insert(set);
        self
    }
}
