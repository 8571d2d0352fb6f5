use nodemesh_content::{
    CONTENT_AIR, CONTENT_IGNORE, ContentId, MaterialFlags, Node, ParamType, TileSpec,
};
use nodemesh_geom::{BS, IVec3, Vec2, Vec3};
use nodemesh_lighting::{LightPair, decode_light, interior_light, pack};

use super::SpecialGenerator;
use crate::vertex::Vertex;

const LIQUID_LEVEL_MASK: u8 = 0x07;
const LIQUID_LEVEL_MAX: u8 = 7;

/// Surface of a source drawn by the special pass: the top of the highest
/// flowing level.
const SOURCE_SURFACE: f32 = (-0.5 + (LIQUID_LEVEL_MAX as f32 + 0.5) / (LIQUID_LEVEL_MAX as f32 + 1.0)) * BS;

/// Corner height where two air neighbours meet.
const DRAINED_LEVEL: f32 = -0.5 * BS + 0.2;

#[derive(Copy, Clone, Debug)]
struct LiquidNeighbor {
    content: ContentId,
    level: f32,
    is_same_liquid: bool,
    top_is_same_liquid: bool,
}

impl Default for LiquidNeighbor {
    fn default() -> Self {
        Self {
            content: CONTENT_IGNORE,
            level: -0.5 * BS,
            is_same_liquid: false,
            top_is_same_liquid: false,
        }
    }
}

/// Height of a flowing node's surface from its stored level.
pub fn flowing_level(param2: u8, range: u8) -> f32 {
    let range = range.clamp(1, 8);
    let floor = LIQUID_LEVEL_MAX + 1 - range;
    let mut level = param2 & LIQUID_LEVEL_MASK;
    level = if level <= floor { 0 } else { level - floor };
    (-0.5 + (level as f32 + 0.5) / range as f32) * BS
}

// Side faces: direction and the two bottom corners as (x, z) in {0, 1}.
const SIDE_FACES: [(IVec3, [(usize, usize); 2]); 4] = [
    (IVec3::new(1, 0, 0), [(1, 1), (1, 0)]),
    (IVec3::new(-1, 0, 0), [(0, 0), (0, 1)]),
    (IVec3::new(0, 0, 1), [(0, 1), (1, 1)]),
    (IVec3::new(0, 0, -1), [(1, 0), (0, 0)]),
];

// (u, v) of the four side vertices; u picks the corner, v = 1 is the bottom.
const SIDE_UV: [(usize, usize); 4] = [(0, 1), (1, 1), (1, 0), (0, 0)];

// (x, z) corner of each top vertex.
const TOP_CORNERS: [(usize, usize); 4] = [(0, 1), (1, 1), (1, 0), (0, 0)];

impl SpecialGenerator<'_> {
    fn liquid_flat_light(&self, top: Node) -> LightPair {
        let f = self.f;
        if f.light_source != 0 {
            let l = decode_light(f.light_source);
            return pack(l, l);
        }
        let ft = self.reg.get(top.content);
        if ft.param_type == ParamType::Light {
            interior_light(top, ft, 0)
        } else {
            interior_light(self.n, f, 0)
        }
    }

    pub(super) fn draw_liquid(&mut self, flowing: bool) {
        let f = self.f;
        let c_flowing = f.liquid_alternative_flowing;
        let c_source = f.liquid_alternative_source;
        let is_same = |c: ContentId| c == c_flowing || c == c_source;

        let top = self.neighbor(IVec3::new(0, 1, 0));
        let top_is_same_liquid = is_same(top.content);
        let light = self.liquid_flat_light(top);
        let top_tile = self.tiles.special_tile(self.n, 0);

        if !flowing {
            if !top_is_same_liquid {
                self.draw_liquid_top([[SOURCE_SURFACE; 2]; 2], top_tile, light, false);
            }
            return;
        }

        let range = self.reg.get(c_flowing).liquid_range;
        let mut nb = [[LiquidNeighbor::default(); 3]; 3];
        for w in -1..=1i32 {
            for u in -1..=1i32 {
                let d = IVec3::new(u, 0, w);
                let n2 = self.neighbor(d);
                let slot = &mut nb[(w + 1) as usize][(u + 1) as usize];
                slot.content = n2.content;
                if n2.content == CONTENT_IGNORE {
                    continue;
                }
                if n2.content == c_source {
                    slot.is_same_liquid = true;
                    slot.level = 0.5 * BS;
                } else if n2.content == c_flowing {
                    slot.is_same_liquid = true;
                    slot.level = flowing_level(n2.param2, range);
                }
                slot.top_is_same_liquid = is_same(self.neighbor(d + IVec3::new(0, 1, 0)).content);
            }
        }

        // corner_levels[z][x]
        let mut corner_levels = [[0.0f32; 2]; 2];
        for (k, row) in corner_levels.iter_mut().enumerate() {
            for (i, level) in row.iter_mut().enumerate() {
                *level = corner_level(&nb, i, k, c_source, c_flowing);
            }
        }

        let side_tile = self.tiles.special_tile(self.n, 1);
        for (dir, corners) in SIDE_FACES {
            let neighbor = nb[(dir.z + 1) as usize][(dir.x + 1) as usize];
            if neighbor.is_same_liquid && (!top_is_same_liquid || neighbor.top_is_same_liquid) {
                continue;
            }
            if neighbor.content == CONTENT_IGNORE {
                continue;
            }
            let nf = self.reg.get(neighbor.content);
            if nf.solidness == 2 {
                continue;
            }
            let tile = if nf.solidness != 0 || nf.visual_solidness != 0 {
                side_tile.with_flags(MaterialFlags::BACKFACE_CULLING, MaterialFlags::empty())
            } else {
                side_tile
            };
            let mut quad = [Vertex::default(); 4];
            for (v, (u, bottom)) in quad.iter_mut().zip(SIDE_UV) {
                let (cx, cz) = corners[u];
                let level = corner_levels[cz][cx];
                let y = if bottom == 1 {
                    if neighbor.is_same_liquid { level } else { -0.5 * BS }
                } else if !top_is_same_liquid {
                    level
                } else {
                    0.5 * BS
                };
                let pos = Vec3::new((cx as f32 - 0.5) * BS, y, (cz as f32 - 0.5) * BS);
                let uv = tile.texture.map_uv(Vec2::new(u as f32, bottom as f32));
                *v = Vertex::new(pos, Vec3::ZERO, self.color_at(tile.alpha, pos, light), uv);
            }
            self.push_quad(tile, quad);
        }

        if !top_is_same_liquid {
            self.draw_liquid_top(corner_levels, top_tile, light, true);
        }
    }

    fn draw_liquid_top(
        &mut self,
        corner_levels: [[f32; 2]; 2],
        tile: TileSpec,
        light: LightPair,
        flowing: bool,
    ) {
        let angle = if flowing { flow_angle(&corner_levels) } else { 0.0 };
        let centre = Vec2::new(0.5, 0.5);
        let mut quad = [Vertex::default(); 4];
        for (v, (x, z)) in quad.iter_mut().zip(TOP_CORNERS) {
            let pos = Vec3::new(
                (x as f32 - 0.5) * BS,
                corner_levels[z][x],
                (z as f32 - 0.5) * BS,
            );
            let uv = Vec2::new(x as f32, z as f32).rotate_by(angle, centre);
            *v = Vertex::new(
                pos,
                Vec3::ZERO,
                self.color_at(tile.alpha, pos, light),
                tile.texture.map_uv(uv),
            );
        }
        self.push_quad(tile, quad);
    }
}

fn corner_level(
    nb: &[[LiquidNeighbor; 3]; 3],
    i: usize,
    k: usize,
    c_source: ContentId,
    c_flowing: ContentId,
) -> f32 {
    let mut sum = 0.0;
    let mut count = 0;
    let mut air_count = 0;
    for dk in 0..2 {
        for di in 0..2 {
            let n = &nb[k + dk][i + di];
            if n.top_is_same_liquid {
                return 0.5 * BS;
            }
            if n.content == c_source {
                return 0.5 * BS;
            }
            if n.content == c_flowing {
                sum += n.level;
                count += 1;
            } else if n.content == CONTENT_AIR {
                air_count += 1;
                if air_count >= 2 {
                    return DRAINED_LEVEL;
                }
            }
        }
    }
    if count > 0 { sum / count as f32 } else { 0.0 }
}

/// Quarter turn that lines the texture's downward scroll (towards +Z) up
/// with the steepest fall of the surface.
fn flow_angle(c: &[[f32; 2]; 2]) -> f32 {
    // Positive when the surface falls towards +Z / +X.
    let dz = (c[0][0] + c[0][1]) - (c[1][0] + c[1][1]);
    let dx = (c[0][0] + c[1][0]) - (c[0][1] + c[1][1]);
    if dx.abs() > dz.abs() {
        if dx > 0.0 { 90.0 } else { 270.0 }
    } else if dz < 0.0 {
        180.0
    } else {
        0.0
    }
}
