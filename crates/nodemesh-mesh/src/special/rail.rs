use nodemesh_content::{DrawType, MaterialFlags};
use nodemesh_geom::{BS, IVec3, Vec2, Vec3};
use nodemesh_lighting::interior_light;

use super::SpecialGenerator;

/// Tile slot and rotation picked from the rail's connections.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct RailShape {
    pub slot: usize,
    pub angle: f32,
    pub sloped: bool,
}

/// `x[k]` and `z[k]` are the -/+ neighbour along the axis at heights
/// y-1 (k = 0, 1), y (2, 3) and y+1 (4, 5).
pub(crate) fn rail_shape(x: [bool; 6], z: [bool; 6]) -> RailShape {
    let x_all = [x[0] || x[2] || x[4], x[1] || x[3] || x[5]];
    let z_all = [z[0] || z[2] || z[4], z[1] || z[3] || z[5]];
    let sloped = x[4] || x[5] || z[4] || z[5];
    let straight = (x_all[0] && x_all[1]) || (z_all[0] && z_all[1]);
    let adjacencies = if sloped {
        5
    } else {
        x_all.iter().chain(&z_all).filter(|c| **c).count()
    };

    let mut slot = 0;
    let mut angle = 0.0;
    match adjacencies {
        1 => {
            if x_all[0] || x_all[1] {
                angle = 90.0;
            }
        }
        2 => {
            if !straight {
                slot = 1;
            }
            if x_all[0] && x_all[1] {
                angle = 90.0;
            }
            if z_all[0] && z_all[1] {
                if z[4] {
                    angle = 180.0;
                }
            } else if x_all[0] && z_all[0] {
                angle = 270.0;
            } else if x_all[0] && z_all[1] {
                angle = 180.0;
            } else if x_all[1] && z_all[1] {
                angle = 90.0;
            }
        }
        3 => {
            slot = 2;
            if !x_all[1] {
                angle = 180.0;
            }
            if !z_all[0] {
                angle = 90.0;
            }
            if !z_all[1] {
                angle = 270.0;
            }
        }
        4 => slot = 3,
        5 => {
            if z[4] {
                angle = 180.0;
            }
            if x[4] {
                angle = 90.0;
            }
            if x[5] {
                angle = -90.0;
            }
        }
        _ => {}
    }
    RailShape {
        slot,
        angle,
        sloped,
    }
}

impl SpecialGenerator<'_> {
    fn rail_connects(&self, d: IVec3) -> bool {
        let n2 = self.neighbor(d);
        if n2.content == self.n.content {
            return true;
        }
        let f2 = self.reg.get(n2.content);
        f2.drawtype == DrawType::RailLike
            && self.f.connect_group.is_some()
            && f2.connect_group == self.f.connect_group
    }

    pub(super) fn draw_raillike(&mut self) {
        let mut x = [false; 6];
        let mut z = [false; 6];
        for (level, y) in (-1..=1).enumerate() {
            for (side, o) in [-1, 1].into_iter().enumerate() {
                x[level * 2 + side] = self.rail_connects(IVec3::new(o, y, 0));
                z[level * 2 + side] = self.rail_connects(IVec3::new(0, y, o));
            }
        }
        let shape = rail_shape(x, z);

        let tile = self.tiles.node_tile_n(self.n, self.p, shape.slot).with_flags(
            MaterialFlags::CRACK_OVERLAY,
            MaterialFlags::BACKFACE_CULLING,
        );
        let d = BS / 64.0;
        let s = BS / 2.0;
        let g = if shape.sloped { 1.0 } else { -1.0 };
        let corners = [
            (Vec3::new(-s, -s + d, -s), Vec2::new(0.0, 1.0)),
            (Vec3::new(s, -s + d, -s), Vec2::new(1.0, 1.0)),
            (Vec3::new(s, g * s + d, s), Vec2::new(1.0, 0.0)),
            (Vec3::new(-s, g * s + d, s), Vec2::new(0.0, 0.0)),
        ];
        let light = interior_light(self.n, self.f, 0);
        let angle = shape.angle;
        let quad = self.billboard(&tile, corners, light, |p| p.rotate_xz_by(angle));
        self.push_quad(tile, quad);
    }
}
