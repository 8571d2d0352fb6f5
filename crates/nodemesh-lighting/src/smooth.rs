use nodemesh_content::{ContentRegistry, LightBank};
use nodemesh_geom::{BS, IVec3, Vec3};
use nodemesh_voxel::VoxelWindow;

use crate::{LightPair, decode_light, pack};

pub const DEFAULT_AO_GAMMA: f32 = 2.2;

/// Corner order of a `LightFrame`: bit 2 selects +X, bit 1 +Y, bit 0 +Z.
pub const LIGHT_DIRS: [IVec3; 8] = [
    IVec3::new(-1, -1, -1),
    IVec3::new(-1, -1, 1),
    IVec3::new(-1, 1, -1),
    IVec3::new(-1, 1, 1),
    IVec3::new(1, -1, -1),
    IVec3::new(1, -1, 1),
    IVec3::new(1, 1, -1),
    IVec3::new(1, 1, 1),
];

/// How far outside its node a vertex may sample the frame, in nodes.
const FRAME_OVERSIZE: f32 = 1.0;

#[inline]
pub fn clamp_gamma(gamma: f32) -> f32 {
    if gamma.is_nan() {
        return DEFAULT_AO_GAMMA;
    }
    gamma.clamp(0.25, 4.0)
}

/// Attenuation for `occluders` solid samples out of eight; 1.0 up to four.
pub fn ao_factor(occluders: u8, gamma: f32) -> f32 {
    if occluders <= 4 {
        return 1.0;
    }
    let linear = (8 - occluders.min(8)) as f32 / 4.0;
    linear.powf(1.0 / clamp_gamma(gamma))
}

/// What one of the eight nodes around a corner contributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CornerSample {
    /// Lets light through; carries the stored (day, night) levels.
    Transparent { day: u8, night: u8, light_source: u8 },
    /// Blocks light and darkens the corner.
    Occluder { light_source: u8 },
    /// Unloaded; counts for nothing.
    Ignore,
}

fn bank_light(sum: u32, count: u32, source_max: u8, occluders: u8, gamma: f32) -> u8 {
    if count == 0 {
        return 255;
    }
    let avg = sum / count;
    let source = decode_light(source_max) as u32;
    if source >= avg {
        return source as u8;
    }
    if occluders > 4 {
        let v = (avg as f32 * ao_factor(occluders, gamma)).round();
        return v.clamp(0.0, 255.0) as u8;
    }
    avg.min(255) as u8
}

/// Corner light from eight pre-classified samples.
pub fn smooth_light_from_samples(samples: &[CornerSample; 8], gamma: f32) -> LightPair {
    let (mut sum_day, mut sum_night, mut count) = (0u32, 0u32, 0u32);
    let mut occluders = 0u8;
    let mut source_max = 0u8;
    for s in samples {
        match *s {
            CornerSample::Transparent {
                day,
                night,
                light_source,
            } => {
                sum_day += decode_light(day) as u32;
                sum_night += decode_light(night) as u32;
                count += 1;
                source_max = source_max.max(light_source);
            }
            CornerSample::Occluder { light_source } => {
                occluders += 1;
                source_max = source_max.max(light_source);
            }
            CornerSample::Ignore => {}
        }
    }
    pack(
        bank_light(sum_day, count, source_max, occluders, gamma),
        bank_light(sum_night, count, source_max, occluders, gamma),
    )
}

/// Smooth light at the `corner` (components of ±1) of node `p`, averaged
/// over the eight nodes sharing that corner.
pub fn smooth_light(
    window: &VoxelWindow,
    reg: &ContentRegistry,
    p: IVec3,
    corner: IVec3,
    gamma: f32,
) -> LightPair {
    let base = IVec3::new(
        p.x + (corner.x > 0) as i32,
        p.y + (corner.y > 0) as i32,
        p.z + (corner.z > 0) as i32,
    );
    let mut samples = [CornerSample::Ignore; 8];
    for (i, s) in samples.iter_mut().enumerate() {
        let d = IVec3::new((i >> 2) as i32 & 1, (i >> 1) as i32 & 1, i as i32 & 1);
        let n = window.get(base - d);
        if n.is_ignore() {
            continue;
        }
        let f = reg.get(n.content);
        *s = if f.is_light_transparent() {
            CornerSample::Transparent {
                day: n.light(LightBank::Day, f),
                night: n.light(LightBank::Night, f),
                light_source: f.light_source,
            }
        } else {
            CornerSample::Occluder {
                light_source: f.light_source,
            }
        };
    }
    smooth_light_from_samples(&samples, gamma)
}

/// Smooth lights at the eight corners of one node, in `LIGHT_DIRS` order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LightFrame {
    pub day: [u8; 8],
    pub night: [u8; 8],
}

impl LightFrame {
    pub fn capture(window: &VoxelWindow, reg: &ContentRegistry, p: IVec3, gamma: f32) -> Self {
        let mut frame = LightFrame::default();
        for (k, dir) in LIGHT_DIRS.iter().enumerate() {
            let l = smooth_light(window, reg, p, *dir, gamma);
            frame.day[k] = crate::day(l);
            frame.night[k] = crate::night(l);
        }
        frame
    }

    /// Trilinear blend at a node-relative position in world units.
    pub fn blend(&self, pos: Vec3) -> LightPair {
        let unit = |v: f32| (v / BS + 0.5).clamp(-FRAME_OVERSIZE, 1.0 + FRAME_OVERSIZE);
        let (x, y, z) = (unit(pos.x), unit(pos.y), unit(pos.z));
        let (mut d, mut n) = (0.0f32, 0.0f32);
        for k in 0..8 {
            let dx = if k & 4 != 0 { x } else { 1.0 - x };
            let dy = if k & 2 != 0 { y } else { 1.0 - y };
            let dz = if k & 1 != 0 { z } else { 1.0 - z };
            let w = dx * dy * dz;
            d += w * self.day[k] as f32;
            n += w * self.night[k] as f32;
        }
        pack(
            d.round().clamp(0.0, 255.0) as u8,
            n.round().clamp(0.0, 255.0) as u8,
        )
    }
}
