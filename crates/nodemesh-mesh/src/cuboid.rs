use nodemesh_content::TileSpec;
use nodemesh_geom::{Aabb, Face, Vec2, Vec3};
use nodemesh_lighting::{LightPair, day, night, pack};

use crate::collector::MeshCollector;
use crate::vertex::{Color, QUAD_INDICES, Vertex};

/// Whole-texture window for each of the six faces.
pub const FULL_UV: [f32; 24] = [
    0.0, 0.0, 1.0, 1.0, //
    0.0, 0.0, 1.0, 1.0, //
    0.0, 0.0, 1.0, 1.0, //
    0.0, 0.0, 1.0, 1.0, //
    0.0, 0.0, 1.0, 1.0, //
    0.0, 0.0, 1.0, 1.0,
];

// Frame corner (bit 2 = +X, bit 1 = +Y, bit 0 = +Z) of each cuboid vertex.
const CORNER_OF_VERTEX: [usize; 24] = [
    3, 7, 6, 2, //
    0, 4, 5, 1, //
    6, 7, 5, 4, //
    3, 2, 0, 1, //
    7, 3, 1, 5, //
    2, 6, 4, 0,
];

/// Lighting of a cuboid: one value for every face, or one per box corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CuboidLight {
    Flat(LightPair),
    Corners([LightPair; 8]),
}

/// Darkens faces that do not point up so box shapes read in flat light.
pub fn shade(light: LightPair, normal: Vec3) -> LightPair {
    let factor = if normal.y < -0.5 {
        0.447213
    } else if normal.x.abs() > 0.5 {
        0.670820
    } else if normal.z.abs() > 0.5 {
        0.836660
    } else {
        return light;
    };
    let s = |v: u8| (v as f32 * factor).round().clamp(0.0, 255.0) as u8;
    pack(s(day(light)), s(night(light)))
}

/// Emits the six faces of `bx` in `Face::ALL` order (up, down, right, left, back, front).
///
/// `tiles` holds one to six tiles; face `i` uses `tiles[min(i, len - 1)]`.
/// `uv` holds an `(u0, v0, u1, v1)` window per face, mapped through the
/// tile's texture region.
pub fn make_cuboid(
    out: &mut MeshCollector,
    bx: Aabb,
    tiles: &[TileSpec],
    light: CuboidLight,
    uv: &[f32; 24],
    light_source: u8,
) {
    if tiles.is_empty() {
        log::warn!("cuboid without tiles skipped");
        return;
    }
    let (min, max) = (bx.min, bx.max);
    let t = uv;
    let [up, down, right, left, back, front] = Face::ALL.map(Face::normal);
    let raw: [(Vec3, Vec3, f32, f32); 24] = [
        (Vec3::new(min.x, max.y, max.z), up, t[0], t[1]),
        (Vec3::new(max.x, max.y, max.z), up, t[2], t[1]),
        (Vec3::new(max.x, max.y, min.z), up, t[2], t[3]),
        (Vec3::new(min.x, max.y, min.z), up, t[0], t[3]),
        (Vec3::new(min.x, min.y, min.z), down, t[4], t[5]),
        (Vec3::new(max.x, min.y, min.z), down, t[6], t[5]),
        (Vec3::new(max.x, min.y, max.z), down, t[6], t[7]),
        (Vec3::new(min.x, min.y, max.z), down, t[4], t[7]),
        (Vec3::new(max.x, max.y, min.z), right, t[8], t[9]),
        (Vec3::new(max.x, max.y, max.z), right, t[10], t[9]),
        (Vec3::new(max.x, min.y, max.z), right, t[10], t[11]),
        (Vec3::new(max.x, min.y, min.z), right, t[8], t[11]),
        (Vec3::new(min.x, max.y, max.z), left, t[12], t[13]),
        (Vec3::new(min.x, max.y, min.z), left, t[14], t[13]),
        (Vec3::new(min.x, min.y, min.z), left, t[14], t[15]),
        (Vec3::new(min.x, min.y, max.z), left, t[12], t[15]),
        (Vec3::new(max.x, max.y, max.z), back, t[16], t[17]),
        (Vec3::new(min.x, max.y, max.z), back, t[18], t[17]),
        (Vec3::new(min.x, min.y, max.z), back, t[18], t[19]),
        (Vec3::new(max.x, min.y, max.z), back, t[16], t[19]),
        (Vec3::new(min.x, max.y, min.z), front, t[20], t[21]),
        (Vec3::new(max.x, max.y, min.z), front, t[22], t[21]),
        (Vec3::new(max.x, min.y, min.z), front, t[22], t[23]),
        (Vec3::new(min.x, min.y, min.z), front, t[20], t[23]),
    ];
    for face in 0..6 {
        let tile = &tiles[face.min(tiles.len() - 1)];
        let mut quad = [Vertex::default(); 4];
        for (k, v) in quad.iter_mut().enumerate() {
            let j = face * 4 + k;
            let (pos, normal, u, w) = raw[j];
            let mut l = match light {
                CuboidLight::Flat(l) => l,
                CuboidLight::Corners(c) => c[CORNER_OF_VERTEX[j]],
            };
            if light_source == 0 {
                l = shade(l, normal);
            }
            let uv = tile.texture.map_uv(Vec2::new(u, w));
            *v = Vertex::new(pos, normal, Color::from_light(tile.alpha, l), uv);
        }
        out.append(*tile, &quad, &QUAD_INDICES);
    }
}

/// UV windows that project each face of a node-local box onto the texture,
/// so partial boxes show the matching part of a full-node texture.
pub fn projected_uv(bx: Aabb) -> [f32; 24] {
    let u = |v: f32| v / nodemesh_geom::BS + 0.5;
    let (tx1, ty1, tz1) = (u(bx.min.x), u(bx.min.y), u(bx.min.z));
    let (tx2, ty2, tz2) = (u(bx.max.x), u(bx.max.y), u(bx.max.z));
    [
        tx1, 1.0 - tz2, tx2, 1.0 - tz1, // up
        tx1, tz1, tx2, tz2, // down
        tz1, 1.0 - ty2, tz2, 1.0 - ty1, // right
        1.0 - tz2, 1.0 - ty2, 1.0 - tz1, 1.0 - ty1, // left
        1.0 - tx2, 1.0 - ty2, 1.0 - tx1, 1.0 - ty1, // back
        tx1, 1.0 - ty2, tx2, 1.0 - ty1, // front
    ]
}
