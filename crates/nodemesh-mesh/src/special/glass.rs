use nodemesh_content::{CONTENT_IGNORE, TileSpec};
use nodemesh_geom::{Aabb, BS, IVec3, Vec2, Vec3};

use super::SpecialGenerator;
use crate::cuboid::shade;
use crate::vertex::Vertex;

// Back, top, right, front, bottom, left.
const SIX_DIRS: [IVec3; 6] = [
    IVec3::new(0, 0, 1),
    IVec3::new(0, 1, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(0, 0, -1),
    IVec3::new(0, -1, 0),
    IVec3::new(-1, 0, 0),
];

// The six face directions followed by the twelve edge neighbours.
const MERGE_DIRS: [IVec3; 18] = [
    IVec3::new(0, 0, 1),
    IVec3::new(0, 1, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(0, 0, -1),
    IVec3::new(0, -1, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(-1, 1, 0),
    IVec3::new(1, 1, 0),
    IVec3::new(0, 1, 1),
    IVec3::new(0, 1, -1),
    IVec3::new(-1, 0, 1),
    IVec3::new(1, 0, 1),
    IVec3::new(-1, 0, -1),
    IVec3::new(1, 0, -1),
    IVec3::new(-1, -1, 0),
    IVec3::new(1, -1, 0),
    IVec3::new(0, -1, 1),
    IVec3::new(0, -1, -1),
];

const CHECK_VERTICAL: [bool; 18] = [
    false, true, false, false, true, false, false, false, false, false, false, false, false, false,
    false, false, false, false,
];
const CHECK_HORIZONTAL: [bool; 18] = [
    true, false, true, true, false, true, false, false, false, false, true, true, true, true, false,
    false, false, false,
];
const CHECK_ALL: [bool; 18] = [true; 18];

// Per frame edge: the two face neighbours and the edge neighbour between them.
const EDGE_NEIGHBORS: [[usize; 3]; 12] = [
    [1, 2, 7],
    [1, 5, 6],
    [4, 2, 15],
    [4, 5, 14],
    [2, 0, 11],
    [2, 3, 13],
    [5, 0, 10],
    [5, 3, 12],
    [0, 1, 8],
    [0, 4, 16],
    [3, 4, 17],
    [3, 1, 9],
];

const A: f32 = BS / 2.0;
// Glass sits just inside the frame.
const G: f32 = A - 0.003;
const B: f32 = 0.876 * (BS / 2.0);

const FRAME_EDGES: [Aabb; 12] = [
    Aabb::from_coords(B, B, -A, A, A, A),
    Aabb::from_coords(-A, B, -A, -B, A, A),
    Aabb::from_coords(B, -A, -A, A, -B, A),
    Aabb::from_coords(-A, -A, -A, -B, -B, A),
    Aabb::from_coords(B, -A, B, A, A, A),
    Aabb::from_coords(B, -A, -A, A, A, -B),
    Aabb::from_coords(-A, -A, B, -B, A, A),
    Aabb::from_coords(-A, -A, -A, -B, A, -B),
    Aabb::from_coords(-A, B, B, A, A, A),
    Aabb::from_coords(-A, -A, B, A, -B, A),
    Aabb::from_coords(-A, -A, -A, A, -B, -B),
    Aabb::from_coords(-A, B, -A, A, A, -B),
];

const GLASS_FACES: [Aabb; 6] = [
    Aabb::from_coords(-G, -G, G, G, G, G),
    Aabb::from_coords(-G, G, -G, G, G, G),
    Aabb::from_coords(G, -G, -G, G, G, G),
    Aabb::from_coords(-G, -G, -G, G, G, -G),
    Aabb::from_coords(-G, -G, -G, G, -G, G),
    Aabb::from_coords(-G, -G, -G, -G, G, G),
];

/// Edges hidden by the merge state of their neighbours. When the edge
/// neighbour merges, both faces must merge; otherwise exactly one must.
pub(crate) fn hidden_edges(nb: &[bool; 18]) -> [bool; 12] {
    let mut hidden = [false; 12];
    for (h, [a, b, e]) in hidden.iter_mut().zip(EDGE_NEIGHBORS) {
        *h = if nb[e] { nb[a] && nb[b] } else { nb[a] ^ nb[b] };
    }
    hidden
}

impl SpecialGenerator<'_> {
    pub(super) fn draw_glasslike(&mut self) {
        let tile = self.tiles.node_tile(self.n, self.p, IVec3::ZERO);
        let f = self.f;
        for dir in SIX_DIRS {
            if self.neighbor(dir).content == self.n.content {
                continue;
            }
            let normal = Vec3::from_ivec(dir);
            let flat = if f.light_source == 0 {
                shade(self.light, normal)
            } else {
                self.light
            };
            let corners = [
                (Vec3::new(-A, -A, A), Vec2::new(1.0, 1.0)),
                (Vec3::new(A, -A, A), Vec2::new(0.0, 1.0)),
                (Vec3::new(A, A, A), Vec2::new(0.0, 0.0)),
                (Vec3::new(-A, A, A), Vec2::new(1.0, 0.0)),
            ];
            let mut quad = [Vertex::default(); 4];
            for (v, (pos, uv)) in quad.iter_mut().zip(corners) {
                // Turn the +Z face onto `dir`.
                let pos = match (dir.x, dir.y, dir.z) {
                    (0, 1, 0) => pos.rotate_yz_by(-90.0),
                    (1, 0, 0) => pos.rotate_xz_by(-90.0),
                    (0, 0, -1) => pos.rotate_xz_by(180.0),
                    (0, -1, 0) => pos.rotate_yz_by(90.0),
                    (-1, 0, 0) => pos.rotate_xz_by(90.0),
                    _ => pos,
                };
                let color = self.color_at(tile.alpha, pos, flat);
                *v = Vertex::new(pos, normal, color, tile.texture.map_uv(uv));
            }
            self.push_quad(tile, quad);
        }
    }

    pub(super) fn draw_glasslike_framed(&mut self) {
        let n = self.n;
        let mut tiles = [TileSpec::default(); 6];
        for (t, dir) in tiles.iter_mut().zip(SIX_DIRS) {
            *t = self.tiles.node_tile(n, self.p, dir);
        }
        // Frame from the top slot, glass from the bottom slot.
        let frame_tile = tiles[1];
        let glass_tile = tiles[4];

        let connected = self.reg.settings.connected_glass;
        let h_merge = connected && n.param2 & 128 == 0;
        let v_merge = connected && n.param2 & 64 == 0;
        let level = n.param2 & 63;

        let mut nb = [false; 18];
        if h_merge || v_merge {
            let check = match (h_merge, v_merge) {
                (false, _) => &CHECK_VERTICAL,
                (_, false) => &CHECK_HORIZONTAL,
                _ => &CHECK_ALL,
            };
            for i in 0..18 {
                if !check[i] {
                    continue;
                }
                let c = self.neighbor(MERGE_DIRS[i]).content;
                nb[i] = c == n.content || c == CONTENT_IGNORE;
            }
        }

        let hidden = hidden_edges(&nb);
        for (bx, hide) in FRAME_EDGES.into_iter().zip(hidden) {
            if !hide {
                self.cuboid(bx, &[frame_tile]);
            }
        }
        for (bx, merged) in GLASS_FACES.into_iter().zip(nb) {
            if !merged {
                self.cuboid(bx, &[glass_tile]);
            }
        }

        // Interior liquid volume, level 0..=63 mapped to -0.5..=0.5.
        let special = self.tiles.special_tile(n, 0);
        if level > 0 && special.texture.id != 0 {
            let vlev = (level as f32 / 63.0) * 2.0 - 1.0;
            let e = |merged: bool| if merged { G } else { B };
            let bx = Aabb::from_coords(
                -e(nb[5]),
                -e(nb[4]),
                -e(nb[3]),
                e(nb[2]),
                e(nb[1]) * vlev,
                e(nb[0]),
            );
            self.cuboid(bx, &[special]);
        }
    }

    pub(super) fn draw_allfaces(&mut self) {
        let tile = self.tiles.node_tile(self.n, self.p, IVec3::ZERO);
        let bx = Aabb::from_coords(-A, -A, -A, A, A, A);
        self.cuboid(bx, &[tile]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolated_frame_shows_every_edge() {
        assert_eq!(hidden_edges(&[false; 18]), [false; 12]);
    }

    #[test]
    fn fully_merged_frame_hides_every_edge() {
        assert_eq!(hidden_edges(&[true; 18]), [true; 12]);
    }

    #[test]
    fn one_neighbour_hides_its_four_edges() {
        let mut nb = [false; 18];
        nb[1] = true; // top
        let hidden = hidden_edges(&nb);
        let count = hidden.iter().filter(|h| **h).count();
        assert_eq!(count, 4);
        assert!(hidden[0] && hidden[1] && hidden[8] && hidden[11]);
    }
}
