use nodemesh_content::MaterialFlags;
use nodemesh_geom::{BS, Vec2, Vec3};
use nodemesh_lighting::interior_light;

use super::SpecialGenerator;

const BILLBOARD_UV: [Vec2; 4] = [
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 0.0),
];

impl SpecialGenerator<'_> {
    pub(super) fn draw_torchlike(&mut self) {
        let wm = self.n.wallmounted(self.f);
        let slot = match wm {
            1 => 0,
            0 => 1,
            _ => 2,
        };
        let tile = self.tiles.node_tile_n(self.n, self.p, slot).with_flags(
            MaterialFlags::CRACK_OVERLAY,
            MaterialFlags::BACKFACE_CULLING,
        );
        let angle = match wm {
            0 => -45.0,
            1 => 45.0,
            2 => 0.0,
            3 => 180.0,
            4 => 90.0,
            _ => -90.0,
        };
        let s = BS / 2.0 * self.f.visual_scale;
        let corners = [
            Vec3::new(-s, -s, 0.0),
            Vec3::new(s, -s, 0.0),
            Vec3::new(s, s, 0.0),
            Vec3::new(-s, s, 0.0),
        ];
        let light = interior_light(self.n, self.f, 1);
        let quad = self.billboard(&tile, with_uv(corners), light, |p| p.rotate_xz_by(angle));
        self.push_quad(tile, quad);
    }

    pub(super) fn draw_signlike(&mut self) {
        let tile = self.tiles.node_tile_n(self.n, self.p, 0).with_flags(
            MaterialFlags::CRACK_OVERLAY,
            MaterialFlags::BACKFACE_CULLING,
        );
        let d = BS / 16.0;
        let s = BS / 2.0 * self.f.visual_scale;
        // Flat against the +X wall before mounting.
        let x = BS / 2.0 - d;
        let corners = [
            (Vec3::new(x, s, s), Vec2::new(0.0, 0.0)),
            (Vec3::new(x, s, -s), Vec2::new(1.0, 0.0)),
            (Vec3::new(x, -s, -s), Vec2::new(1.0, 1.0)),
            (Vec3::new(x, -s, s), Vec2::new(0.0, 1.0)),
        ];
        let wm = self.n.wallmounted(self.f);
        let place = |p: Vec3| match wm {
            0 => p.rotate_xy_by(90.0),
            1 => p.rotate_xy_by(-90.0),
            2 => p,
            3 => p.rotate_xz_by(180.0),
            4 => p.rotate_xz_by(90.0),
            _ => p.rotate_xz_by(-90.0),
        };
        let light = interior_light(self.n, self.f, 0);
        let quad = self.billboard(&tile, corners, light, place);
        self.push_quad(tile, quad);
    }

    pub(super) fn draw_plantlike(&mut self) {
        let tile = self
            .tiles
            .node_tile_n(self.n, self.p, 0)
            .with_flags(MaterialFlags::CRACK_OVERLAY, MaterialFlags::empty());
        let s = BS / 2.0 * self.f.visual_scale;
        let bottom = -BS / 2.0;
        let corners = [
            Vec3::new(-s, bottom, 0.0),
            Vec3::new(s, bottom, 0.0),
            Vec3::new(s, bottom + 2.0 * s, 0.0),
            Vec3::new(-s, bottom + 2.0 * s, 0.0),
        ];
        let light = interior_light(self.n, self.f, 1);
        for angle in [45.0, -45.0, 135.0, -135.0] {
            let quad = self.billboard(&tile, with_uv(corners), light, |p| p.rotate_xz_by(angle));
            self.push_quad(tile, quad);
        }
    }
}

fn with_uv(corners: [Vec3; 4]) -> [(Vec3, Vec2); 4] {
    let mut out = [(Vec3::ZERO, Vec2::new(0.0, 0.0)); 4];
    for (o, (c, uv)) in out.iter_mut().zip(corners.into_iter().zip(BILLBOARD_UV)) {
        *o = (c, uv);
    }
    out
}
