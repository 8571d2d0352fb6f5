use crate::features::{ContentFeatures, ParamType, ParamType2};

pub type ContentId = u16;

/// Empty space.
pub const CONTENT_AIR: ContentId = 126;
/// Unloaded or out-of-window space; never produces geometry.
pub const CONTENT_IGNORE: ContentId = 127;

pub const LIGHT_MAX: u8 = 14;
/// Direct sunlight. Decodes like `LIGHT_MAX`.
pub const LIGHT_SUN: u8 = 15;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LightBank {
    Day,
    Night,
}

/// One voxel. `param1` packs day light in the low nibble and night light in
/// the high nibble for contents with `ParamType::Light`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    pub content: ContentId,
    pub param1: u8,
    pub param2: u8,
}

impl Node {
    pub const IGNORE: Node = Node::new(CONTENT_IGNORE);
    pub const AIR: Node = Node::new(CONTENT_AIR);

    #[inline]
    pub const fn new(content: ContentId) -> Self {
        Self {
            content,
            param1: 0,
            param2: 0,
        }
    }

    #[inline]
    pub const fn with_params(content: ContentId, param1: u8, param2: u8) -> Self {
        Self {
            content,
            param1,
            param2,
        }
    }

    /// Packs both light banks into `param1`.
    #[inline]
    pub const fn with_light(content: ContentId, day: u8, night: u8) -> Self {
        Self::with_params(content, (day & 0x0f) | ((night & 0x0f) << 4), 0)
    }

    #[inline]
    pub fn is_ignore(self) -> bool {
        self.content == CONTENT_IGNORE
    }

    /// Stored light of one bank, raised to the content's own light source.
    #[inline]
    pub fn light(self, bank: LightBank, f: &ContentFeatures) -> u8 {
        let stored = if f.param_type == ParamType::Light {
            match bank {
                LightBank::Day => self.param1 & 0x0f,
                LightBank::Night => (self.param1 >> 4) & 0x0f,
            }
        } else {
            0
        };
        stored.max(f.light_source)
    }

    /// Rotation `0..4` around Y for facedir contents, 0 otherwise.
    #[inline]
    pub fn facedir(self, f: &ContentFeatures) -> u8 {
        if f.param_type_2 == ParamType2::FaceDir {
            self.param2 & 0x03
        } else {
            0
        }
    }

    /// Wall-mount direction `0..6` for wallmounted contents, 0 otherwise.
    /// 0 = ceiling, 1 = floor, 2 = +X, 3 = -X, 4 = +Z, 5 = -Z.
    #[inline]
    pub fn wallmounted(self, f: &ContentFeatures) -> u8 {
        if f.param_type_2 != ParamType2::WallMounted {
            return 0;
        }
        match self.param2 & 0x07 {
            d @ 0..=5 => d,
            _ => 0,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::AIR
    }
}
