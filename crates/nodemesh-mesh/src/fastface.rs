use nodemesh_content::{MaterialFlags, TileSpec};
use nodemesh_geom::{BS, IVec3, Vec2, Vec3};
use nodemesh_lighting::{LightPair, face_light, smooth_light};
use nodemesh_voxel::{MAP_BLOCKSIZE, VoxelWindow};

use crate::options::MeshOptions;
use crate::tile::TileResolver;
use crate::vertex::{Color, Vertex};
use crate::visibility::{FaceOwner, face_contents};

/// One quad produced by the row tiler, before buffer packing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FastFace {
    pub tile: TileSpec,
    pub vertices: [Vertex; 4],
}

/// Corner directions of the face looking along `dir`, in the order
/// bottom-right, bottom-left, top-left, top-right.
pub fn vertex_dirs(dir: IVec3) -> [IVec3; 4] {
    let v = IVec3::new;
    match (dir.x, dir.y, dir.z) {
        (0, 0, 1) => [v(-1, -1, 1), v(1, -1, 1), v(1, 1, 1), v(-1, 1, 1)],
        (0, 0, -1) => [v(1, -1, -1), v(-1, -1, -1), v(-1, 1, -1), v(1, 1, -1)],
        (1, 0, 0) => [v(1, -1, 1), v(1, -1, -1), v(1, 1, -1), v(1, 1, 1)],
        (-1, 0, 0) => [v(-1, -1, -1), v(-1, -1, 1), v(-1, 1, 1), v(-1, 1, -1)],
        (0, 1, 0) => [v(1, 1, -1), v(-1, 1, -1), v(-1, 1, 1), v(1, 1, 1)],
        (0, -1, 0) => [v(1, -1, 1), v(-1, -1, 1), v(-1, -1, -1), v(1, -1, -1)],
        _ => [IVec3::ZERO; 4],
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct TileInfo {
    makes_face: bool,
    // Owning node and the direction it looks through the face.
    p: IVec3,
    dir: IVec3,
    lights: [LightPair; 4],
    tile: TileSpec,
    light_source: u8,
}

impl TileInfo {
    fn continues(&self, next: &TileInfo, translate: IVec3) -> bool {
        next.makes_face == self.makes_face
            && next.p == self.p + translate
            && next.dir == self.dir
            && next.lights == self.lights
            && next.tile == self.tile
            && next.light_source == self.light_source
    }
}

struct FaceScan<'a> {
    window: &'a VoxelWindow,
    tiles: &'a TileResolver<'a>,
    smooth: bool,
    gamma: f32,
}

impl FaceScan<'_> {
    fn tile_info(&self, p: IVec3, face_dir: IVec3) -> TileInfo {
        let reg = self.tiles.registry();
        let n0 = self.window.get(p);
        let n1 = self.window.get(p + face_dir);
        let fc = face_contents(n0, n1, reg);
        let mut info = TileInfo {
            makes_face: false,
            p,
            dir: face_dir,
            lights: [0; 4],
            tile: TileSpec::default(),
            light_source: 0,
        };
        match fc.owner {
            FaceOwner::None => return info,
            FaceOwner::A => {
                info.tile = self.tiles.node_tile(n0, p, face_dir);
                info.light_source = reg.get(n0.content).light_source;
            }
            FaceOwner::B => {
                info.p = p + face_dir;
                info.dir = -face_dir;
                info.tile = self.tiles.node_tile(n1, info.p, info.dir);
                info.light_source = reg.get(n1.content).light_source;
            }
        }
        info.makes_face = true;
        if fc.equivalent {
            info.tile.material_flags.insert(MaterialFlags::BACKFACE_CULLING);
        }
        if self.smooth {
            for (l, corner) in info.lights.iter_mut().zip(vertex_dirs(info.dir)) {
                *l = smooth_light(self.window, reg, info.p, corner, self.gamma);
            }
        } else {
            let l = face_light(
                n0,
                reg.get(n0.content),
                n1,
                reg.get(n1.content),
                info.dir,
            );
            info.lights = [l; 4];
        }
        info
    }

    fn row(&self, start: IVec3, translate: IVec3, face_dir: IVec3, dest: &mut Vec<FastFace>) {
        let mut p = start;
        let mut cur = self.tile_info(p, face_dir);
        let mut count: u16 = 0;
        for j in 0..MAP_BLOCKSIZE {
            let next = (j != MAP_BLOCKSIZE - 1).then(|| self.tile_info(p + translate, face_dir));
            let next_is_different = next.is_none_or(|n| !cur.continues(&n, translate));
            count += 1;
            let tiled = cur.tile.texture.tiled;
            let end_of_texture = tiled != 0 && tiled <= count;
            if next_is_different || end_of_texture {
                if cur.makes_face {
                    let pf = Vec3::from_ivec(cur.p);
                    let centre = pf - Vec3::from_ivec(translate) * (count as f32 * 0.5 - 0.5);
                    let c = count as f32;
                    let scale = Vec3::new(
                        if translate.x != 0 { c } else { 1.0 },
                        if translate.y != 0 { c } else { 1.0 },
                        if translate.z != 0 { c } else { 1.0 },
                    );
                    dest.push(make_fast_face(&cur.tile, cur.lights, centre, cur.dir, scale));
                }
                count = 0;
            }
            if let Some(n) = next {
                cur = n;
            }
            p += translate;
        }
    }
}

fn abs_scale(scale: Vec3) -> f32 {
    let off = |v: f32| !(0.999..=1.001).contains(&v);
    if off(scale.x) {
        scale.x
    } else if off(scale.y) {
        scale.y
    } else if off(scale.z) {
        scale.z
    } else {
        1.0
    }
}

/// Quad centred on `centre` (node units) facing `dir`, stretched by `scale`.
pub fn make_fast_face(
    tile: &TileSpec,
    lights: [LightPair; 4],
    centre: Vec3,
    dir: IVec3,
    scale: Vec3,
) -> FastFace {
    let pos = centre * BS;
    let normal = Vec3::from_ivec(dir);
    let s = abs_scale(scale);
    let t = &tile.texture;
    let (x0, y0, w, h) = (t.x0(), t.y0(), t.width(), t.height());
    let uvs = [
        Vec2::new(x0 + w * s, y0 + h),
        Vec2::new(x0, y0 + h),
        Vec2::new(x0, y0),
        Vec2::new(x0 + w * s, y0),
    ];
    let dirs = vertex_dirs(dir);
    let mut vertices = [Vertex::default(); 4];
    for i in 0..4 {
        let corner = Vec3::from_ivec(dirs[i]).scaled(scale) * (BS / 2.0);
        vertices[i] = Vertex::new(
            corner + pos,
            normal,
            Color::from_light(tile.alpha, lights[i]),
            uvs[i],
        );
    }
    FastFace {
        tile: *tile,
        vertices,
    }
}

/// Merged faces of every ordinary cube boundary owned by the block.
pub fn collect_fast_faces(
    window: &VoxelWindow,
    tiles: &TileResolver<'_>,
    options: &MeshOptions,
) -> Vec<FastFace> {
    let scan = FaceScan {
        window,
        tiles,
        smooth: options.smooth_lighting,
        gamma: options.gamma(),
    };
    let mut faces = Vec::new();
    let n = MAP_BLOCKSIZE;
    // Top faces, rows along X.
    for y in 0..n {
        for z in 0..n {
            scan.row(
                IVec3::new(0, y, z),
                IVec3::new(1, 0, 0),
                IVec3::new(0, 1, 0),
                &mut faces,
            );
        }
    }
    // Right faces, rows along Z.
    for x in 0..n {
        for y in 0..n {
            scan.row(
                IVec3::new(x, y, 0),
                IVec3::new(0, 0, 1),
                IVec3::new(1, 0, 0),
                &mut faces,
            );
        }
    }
    // Back faces, rows along X.
    for z in 0..n {
        for y in 0..n {
            scan.row(
                IVec3::new(0, y, z),
                IVec3::new(1, 0, 0),
                IVec3::new(0, 0, 1),
                &mut faces,
            );
        }
    }
    faces
}
