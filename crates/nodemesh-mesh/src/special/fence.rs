use nodemesh_content::{DrawType, MaterialFlags};
use nodemesh_geom::{Aabb, BS, IVec3, Vec3};

use super::SpecialGenerator;

const S: f32 = 1.0 / 16.0;

#[rustfmt::skip]
const POST_UV: [f32; 24] = [
    6.0 * S, 6.0 * S, 10.0 * S, 10.0 * S,
    6.0 * S, 6.0 * S, 10.0 * S, 10.0 * S,
    0.0, 0.0, 4.0 * S, 1.0,
    4.0 * S, 0.0, 8.0 * S, 1.0,
    8.0 * S, 0.0, 12.0 * S, 1.0,
    12.0 * S, 0.0, 1.0, 1.0,
];

#[rustfmt::skip]
const X_RAIL_UV: [f32; 24] = [
    0.0, 2.0 * S, 1.0, 4.0 * S,
    0.0, 4.0 * S, 1.0, 6.0 * S,
    6.0 * S, 6.0 * S, 8.0 * S, 8.0 * S,
    10.0 * S, 10.0 * S, 12.0 * S, 12.0 * S,
    0.0, 8.0 * S, 1.0, 10.0 * S,
    0.0, 14.0 * S, 1.0, 1.0,
];

#[rustfmt::skip]
const Z_RAIL_UV: [f32; 24] = [
    3.0 * S, 1.0 * S, 5.0 * S, 5.0 * S,
    4.0 * S, 1.0 * S, 6.0 * S, 5.0 * S,
    0.0, 9.0 * S, 1.0, 11.0 * S,
    0.0, 6.0 * S, 1.0, 8.0 * S,
    6.0 * S, 6.0 * S, 8.0 * S, 8.0 * S,
    10.0 * S, 10.0 * S, 12.0 * S, 12.0 * S,
];

const POST_RAD: f32 = BS / 8.0;
const BAR_RAD: f32 = BS / 16.0;
const BAR_LEN: f32 = BS / 2.0 - POST_RAD;

impl SpecialGenerator<'_> {
    pub(super) fn draw_fencelike(&mut self) {
        let tile = self.tiles.node_tile(self.n, self.p, IVec3::ZERO);
        let tile_nocrack = tile.with_flags(MaterialFlags::empty(), MaterialFlags::CRACK);

        // The post shows the texture turned a quarter.
        let tsrc = self.tiles.texture_source();
        let mut tile_rot = tile;
        tile_rot.texture = tsrc.texture(&(tsrc.texture_name(tile.texture.id) + "^[transformR90"));
        if tile_rot.has(MaterialFlags::CRACK) || tile_rot.is_animated() {
            tile_rot.texture = tsrc.texture_raw(&tile_rot.texture);
        }

        let post = Aabb::from_coords(-POST_RAD, -BS / 2.0, -POST_RAD, POST_RAD, BS / 2.0, POST_RAD);
        self.cuboid_uv(post, &[tile_rot], &POST_UV);

        let (bl, br) = (BAR_LEN, BAR_RAD);
        let bars = [
            (
                IVec3::new(1, 0, 0),
                Aabb::from_coords(
                    -bl + BS / 2.0,
                    -br + BS / 4.0,
                    -br,
                    bl + BS / 2.0,
                    br + BS / 4.0,
                    br,
                ),
                &X_RAIL_UV,
            ),
            (
                IVec3::new(0, 0, 1),
                Aabb::from_coords(
                    -br,
                    -br + BS / 4.0,
                    -bl + BS / 2.0,
                    br,
                    br + BS / 4.0,
                    bl + BS / 2.0,
                ),
                &Z_RAIL_UV,
            ),
        ];
        for (dir, upper, uv) in bars {
            let nf = self.reg.get(self.neighbor(dir).content);
            if nf.drawtype != DrawType::FenceLike {
                continue;
            }
            self.cuboid_uv(upper, &[tile_nocrack], uv);
            let lower = upper.translated(Vec3::new(0.0, -BS / 2.0, 0.0));
            self.cuboid_uv(lower, &[tile_nocrack], uv);
        }
    }
}
