//! Node light decoding, face and corner lighting, and day/night colour blending.
#![forbid(unsafe_code)]

mod blend;
mod smooth;

pub use blend::{blend_light_channels, final_color_blend};
pub use nodemesh_content::{LIGHT_MAX, LIGHT_SUN};
pub use smooth::{
    CornerSample, DEFAULT_AO_GAMMA, LIGHT_DIRS, LightFrame, ao_factor, clamp_gamma, smooth_light,
    smooth_light_from_samples,
};

use nodemesh_content::{ContentFeatures, LightBank, Node};
use nodemesh_geom::IVec3;

/// Day light in the low byte, night light in the high byte, both decoded
/// to 0..=255.
pub type LightPair = u16;

#[inline]
pub const fn pack(day: u8, night: u8) -> LightPair {
    day as u16 | ((night as u16) << 8)
}

#[inline]
pub const fn day(l: LightPair) -> u8 {
    (l & 0xff) as u8
}

#[inline]
pub const fn night(l: LightPair) -> u8 {
    (l >> 8) as u8
}

/// Brightness for light levels `0..=LIGHT_MAX`.
pub const LIGHT_DECODE: [u8; 15] = [8, 11, 14, 18, 22, 29, 37, 47, 60, 76, 97, 123, 157, 200, 255];

#[inline]
pub fn decode_light(level: u8) -> u8 {
    LIGHT_DECODE[level.min(LIGHT_MAX) as usize]
}

#[inline]
pub fn diminish_light(level: u8) -> u8 {
    match level {
        0 => 0,
        l if l >= LIGHT_MAX => LIGHT_MAX - 1,
        l => l - 1,
    }
}

#[inline]
pub fn undiminish_light(level: u8) -> u8 {
    if level >= LIGHT_MAX { level } else { level + 1 }
}

fn interior_bank(node: Node, f: &ContentFeatures, bank: LightBank, increment: i32) -> u8 {
    let mut light = node.light(bank, f);
    for _ in 0..increment.max(0) {
        light = undiminish_light(light);
    }
    for _ in 0..(-increment).max(0) {
        light = diminish_light(light);
    }
    decode_light(light)
}

/// Light inside a node, stepped up (`increment > 0`) or down before decoding.
pub fn interior_light(node: Node, f: &ContentFeatures, increment: i32) -> LightPair {
    pack(
        interior_bank(node, f, LightBank::Day, increment),
        interior_bank(node, f, LightBank::Night, increment),
    )
}

fn face_bank(
    a: (Node, &ContentFeatures),
    b: (Node, &ContentFeatures),
    face_dir: IVec3,
    bank: LightBank,
) -> u8 {
    let mut light = a.0.light(bank, a.1).max(b.0.light(bank, b.1));
    light = light.max(a.1.light_source.max(b.1.light_source));
    // Fixed per-axis shading so neighbouring faces differ.
    if face_dir.x != 0 || face_dir.y == -1 {
        light = diminish_light(diminish_light(light));
    } else if face_dir.z != 0 {
        light = diminish_light(light);
    }
    decode_light(light)
}

/// Flat light of the face between two nodes, as seen along `face_dir` from
/// the node owning the face.
pub fn face_light(
    a: Node,
    fa: &ContentFeatures,
    b: Node,
    fb: &ContentFeatures,
    face_dir: IVec3,
) -> LightPair {
    pack(
        face_bank((a, fa), (b, fb), face_dir, LightBank::Day),
        face_bank((a, fa), (b, fb), face_dir, LightBank::Night),
    )
}

#[cfg(test)]
mod tests;
