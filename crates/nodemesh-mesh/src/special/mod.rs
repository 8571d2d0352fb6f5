//! Geometry for nodes the row tiler does not cover: everything with
//! solidness 0 that is not air-like.

mod billboard;
mod fence;
mod glass;
mod liquid;
mod nodebox;
mod rail;

use nodemesh_content::{CONTENT_AIR, ContentFeatures, ContentRegistry, DrawType, Node, TileSpec};
use nodemesh_geom::{Aabb, BS, IVec3, Vec2, Vec3};
use nodemesh_lighting::{LightFrame, LightPair, interior_light};
use nodemesh_voxel::{MAP_BLOCKSIZE, VoxelWindow};

use crate::collector::MeshCollector;
use crate::cuboid::{CuboidLight, make_cuboid, projected_uv};
use crate::options::MeshOptions;
use crate::tile::TileResolver;
use crate::vertex::{Color, QUAD_INDICES, Vertex};

pub(crate) struct SpecialGenerator<'a> {
    window: &'a VoxelWindow,
    tiles: &'a TileResolver<'a>,
    reg: &'a ContentRegistry,
    smooth: bool,
    gamma: f32,
    out: &'a mut MeshCollector,

    // Node being drawn.
    p: IVec3,
    n: Node,
    f: &'a ContentFeatures,
    origin: Vec3,
    frame: LightFrame,
    light: LightPair,
}

impl<'a> SpecialGenerator<'a> {
    pub(crate) fn new(
        window: &'a VoxelWindow,
        tiles: &'a TileResolver<'a>,
        options: &MeshOptions,
        out: &'a mut MeshCollector,
    ) -> Self {
        let reg = tiles.registry();
        Self {
            window,
            tiles,
            reg,
            smooth: options.smooth_lighting,
            gamma: options.gamma(),
            out,
            p: IVec3::ZERO,
            n: Node::AIR,
            f: reg.get(CONTENT_AIR),
            origin: Vec3::ZERO,
            frame: LightFrame::default(),
            light: 0,
        }
    }

    pub(crate) fn generate(&mut self) {
        for z in 0..MAP_BLOCKSIZE {
            for y in 0..MAP_BLOCKSIZE {
                for x in 0..MAP_BLOCKSIZE {
                    let p = IVec3::new(x, y, z);
                    let n = self.window.get(p);
                    let f = self.reg.get(n.content);
                    if f.solidness != 0 || f.drawtype == DrawType::AirLike {
                        continue;
                    }
                    self.p = p;
                    self.n = n;
                    self.f = f;
                    self.origin = Vec3::from_ivec(p) * BS;
                    if self.smooth {
                        self.frame = LightFrame::capture(self.window, self.reg, p, self.gamma);
                    } else {
                        self.light = interior_light(n, f, 1);
                    }
                    self.draw_node();
                }
            }
        }
    }

    fn draw_node(&mut self) {
        match self.f.drawtype {
            DrawType::Liquid => self.draw_liquid(false),
            DrawType::FlowingLiquid => self.draw_liquid(true),
            DrawType::GlassLike => self.draw_glasslike(),
            DrawType::GlassLikeFramed => self.draw_glasslike_framed(),
            DrawType::AllFaces => self.draw_allfaces(),
            DrawType::TorchLike => self.draw_torchlike(),
            DrawType::SignLike => self.draw_signlike(),
            DrawType::PlantLike => self.draw_plantlike(),
            DrawType::FenceLike => self.draw_fencelike(),
            DrawType::RailLike => self.draw_raillike(),
            DrawType::NodeBox => self.draw_nodebox(),
            other @ (DrawType::Normal | DrawType::AllFacesOptional | DrawType::AirLike) => {
                log::warn!(
                    "drawtype {:?} of '{}' has no special generator; node at {:?} skipped",
                    other,
                    self.f.name,
                    self.p
                );
            }
        }
    }

    #[inline]
    fn neighbor(&self, d: IVec3) -> Node {
        self.window.get(self.p + d)
    }

    /// Vertex colour at a node-local position. `flat` is used without
    /// smooth lighting.
    fn color_at(&self, alpha: u8, local: Vec3, flat: LightPair) -> Color {
        if self.smooth {
            Color::from_light(alpha, self.frame.blend(local))
        } else {
            Color::from_light(alpha, flat)
        }
    }

    /// Quad with zero normals from node-local corners, each turned by
    /// `place` before it is lit.
    fn billboard(
        &self,
        tile: &TileSpec,
        corners: [(Vec3, Vec2); 4],
        flat: LightPair,
        place: impl Fn(Vec3) -> Vec3,
    ) -> [Vertex; 4] {
        corners.map(|(pos, uv)| {
            let pos = place(pos);
            Vertex::new(
                pos,
                Vec3::ZERO,
                self.color_at(tile.alpha, pos, flat),
                tile.texture.map_uv(uv),
            )
        })
    }

    /// Appends one quad given in node-local coordinates.
    fn push_quad(&mut self, tile: TileSpec, local: [Vertex; 4]) {
        let mut v = local;
        for vert in v.iter_mut() {
            vert.pos += self.origin;
        }
        self.out.append(tile, &v, &QUAD_INDICES);
    }

    /// Lit cuboid for a node-local box with textures projected from the
    /// node cube.
    fn cuboid(&mut self, bx: Aabb, tiles: &[TileSpec]) {
        self.cuboid_uv(bx, tiles, &projected_uv(bx));
    }

    /// Lit cuboid with explicit per-face UV windows; in smooth mode the box
    /// corners sample the node's light frame.
    fn cuboid_uv(&mut self, bx: Aabb, tiles: &[TileSpec], uv: &[f32; 24]) {
        let light = if self.smooth {
            let mut corners = [0; 8];
            for (k, c) in corners.iter_mut().enumerate() {
                let pos = Vec3::new(
                    if k & 4 != 0 { bx.max.x } else { bx.min.x },
                    if k & 2 != 0 { bx.max.y } else { bx.min.y },
                    if k & 1 != 0 { bx.max.z } else { bx.min.z },
                );
                *c = self.frame.blend(pos);
            }
            CuboidLight::Corners(corners)
        } else {
            CuboidLight::Flat(self.light)
        };
        let placed = bx.translated(self.origin);
        make_cuboid(self.out, placed, tiles, light, uv, self.f.light_source);
    }
}

/// Runs the special generators over every node of the window's block.
pub fn generate_special(
    window: &VoxelWindow,
    tiles: &TileResolver<'_>,
    options: &MeshOptions,
    out: &mut MeshCollector,
) {
    SpecialGenerator::new(window, tiles, options, out).generate();
}
