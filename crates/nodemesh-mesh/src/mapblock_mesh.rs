use std::sync::Arc;
use std::time::Instant;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use nodemesh_content::{ContentRegistry, MaterialFlags, TextureSource, TileSpec};
use nodemesh_geom::{BS, IVec3, Vec3};
use nodemesh_lighting::final_color_blend;
use nodemesh_voxel::VoxelWindow;

use crate::collector::{MeshBuffer, MeshCollector};
use crate::fastface::{FastFace, collect_fast_faces};
use crate::options::MeshOptions;
use crate::special::generate_special;
use crate::tile::TileResolver;
use crate::vertex::{Color, QUAD_INDICES};

// Used instead of QUAD_INDICES when it gives the smoother light gradient.
const QUAD_INDICES_ALTERNATE: [u16; 6] = [0, 1, 3, 2, 3, 1];

/// Everything one block build reads.
#[derive(Clone, Debug)]
pub struct MeshMakeData {
    pub window: VoxelWindow,
    /// Cracked node, block-relative.
    pub crack_pos: Option<IVec3>,
    pub options: MeshOptions,
}

impl MeshMakeData {
    pub fn new(window: VoxelWindow, options: MeshOptions) -> Self {
        Self {
            window,
            crack_pos: None,
            options,
        }
    }

    /// Marks the node at `world_pos` as cracked. A negative level clears it.
    pub fn set_crack(&mut self, crack_level: i32, world_pos: IVec3) {
        self.crack_pos = (crack_level >= 0).then(|| world_pos - self.window.origin());
    }
}

#[derive(Clone, Debug)]
struct CrackBuffer {
    buffer: usize,
    base_name: String,
}

#[derive(Clone, Debug)]
struct AnimatedBuffer {
    buffer: usize,
    // Texture the frames are cut from; the cracked copy once a crack applies.
    tile: TileSpec,
    frame: i32,
    offset: i32,
}

#[derive(Copy, Clone, Debug)]
struct DayNightVertex {
    index: u32,
    day: u8,
    night: u8,
}

/// The finished geometry of one block plus what is needed to animate it.
pub struct MapBlockMesh {
    buffers: Vec<MeshBuffer>,
    origin: Vec3,
    tsrc: Arc<dyn TextureSource>,
    crack_buffers: Vec<CrackBuffer>,
    last_crack: i32,
    animated: Vec<AnimatedBuffer>,
    daynight: Vec<(usize, Vec<DayNightVertex>)>,
    last_daynight_ratio: Option<u32>,
    desync: bool,
}

impl MapBlockMesh {
    pub fn build(
        data: &MeshMakeData,
        reg: &ContentRegistry,
        tsrc: Arc<dyn TextureSource>,
    ) -> MapBlockMesh {
        let t0 = Instant::now();
        let window = &data.window;
        let options = &data.options;
        let tiles = TileResolver::new(reg, tsrc.as_ref(), data.crack_pos);

        let faces = collect_fast_faces(window, &tiles, options);
        let t_faces = t0.elapsed();

        let mut collector = MeshCollector::new(options.index_overflow);
        for face in &faces {
            collector.append(face.tile, &face.vertices, face_indices(face));
        }

        generate_special(window, &tiles, options, &mut collector);
        let dropped = collector.textureless_appends();
        if dropped > 0 {
            log::debug!("{dropped} primitives without texture dropped");
        }
        let t_special = t0.elapsed();
        let wrapped = collector.wrapped_appends();

        let origin = Vec3::from_ivec(window.origin()) * BS;
        let mut mesh = MapBlockMesh {
            buffers: collector.into_buffers(),
            origin,
            tsrc,
            crack_buffers: Vec::new(),
            last_crack: -1,
            animated: Vec::new(),
            daynight: Vec::new(),
            last_daynight_ratio: None,
            desync: options.desync_animation,
        };
        mesh.assemble(window.block_pos(), options.daynight_ratio());

        let total = t0.elapsed();
        log::debug!(
            "block {:?}: {} fast faces, {} buffers, {} vertices{}",
            window.block_pos(),
            faces.len(),
            mesh.buffers.len(),
            mesh.vertex_count(),
            if wrapped > 0 { " (indices wrapped)" } else { "" }
        );
        log::info!(
            target: "perf",
            "ms faces={} special={} total={} mapblock_mesh block={:?}",
            t_faces.as_millis(),
            (t_special - t_faces).as_millis(),
            total.as_millis(),
            window.block_pos()
        );
        mesh
    }

    fn assemble(&mut self, block_pos: IVec3, ratio: u32) {
        let tsrc = Arc::clone(&self.tsrc);
        let offset = if self.desync {
            animation_offset(block_pos)
        } else {
            0
        };
        for (i, buf) in self.buffers.iter_mut().enumerate() {
            let mut tile = buf.tile;
            if tile.has(MaterialFlags::CRACK) {
                let base_name = crack_base_name(tsrc.as_ref(), &tile);
                tile.texture = tsrc.texture(&format!("{base_name}0"));
                buf.texture = tile.texture;
                self.crack_buffers.push(CrackBuffer {
                    buffer: i,
                    base_name,
                });
            }
            if tile.is_animated() {
                buf.texture = tsrc.texture(&frame_name(tsrc.as_ref(), &tile, 0));
                self.animated.push(AnimatedBuffer {
                    buffer: i,
                    tile,
                    frame: 0,
                    offset,
                });
            }

            let mut recorded = Vec::new();
            for (j, v) in buf.vertices.iter_mut().enumerate() {
                let (day, night) = (v.color.day(), v.color.night());
                let (r, g, b) = final_color_blend(day, night, ratio);
                v.color = Color::new(v.color.a, r, g, b);
                if day != night {
                    recorded.push(DayNightVertex {
                        index: j as u32,
                        day,
                        night,
                    });
                }
            }
            if !recorded.is_empty() {
                self.daynight.push((i, recorded));
            }
        }
    }

    #[inline]
    pub fn buffers(&self) -> &[MeshBuffer] {
        &self.buffers
    }

    /// World-space position of the block's first node.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Whether `animate` can change anything.
    #[inline]
    pub fn has_animation(&self) -> bool {
        !self.crack_buffers.is_empty() || !self.animated.is_empty() || !self.daynight.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.buffers.iter().map(|b| b.vertices.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.buffers.iter().map(MeshBuffer::triangle_count).sum()
    }

    /// Updates crack stage, animation frames and day/night colours.
    /// Far-away blocks keep their current animation frame. Returns false
    /// when the mesh has nothing to animate.
    pub fn animate(&mut self, faraway: bool, time_s: f32, crack: i32, daynight_ratio: u32) -> bool {
        if !self.has_animation() {
            return false;
        }
        let tsrc = Arc::clone(&self.tsrc);

        if crack != self.last_crack {
            for cb in &self.crack_buffers {
                let texture = tsrc.texture(&format!("{}{}", cb.base_name, crack));
                self.buffers[cb.buffer].texture = texture;
                if let Some(anim) = self.animated.iter_mut().find(|a| a.buffer == cb.buffer) {
                    anim.tile.texture = texture;
                    anim.frame = -1;
                }
            }
            self.last_crack = crack;
        }

        for anim in &mut self.animated {
            if faraway && anim.frame >= 0 {
                continue;
            }
            let frame = current_frame(&anim.tile, time_s, anim.offset);
            if frame == anim.frame {
                continue;
            }
            anim.frame = frame;
            self.buffers[anim.buffer].texture =
                tsrc.texture(&frame_name(tsrc.as_ref(), &anim.tile, frame));
        }

        if self.last_daynight_ratio != Some(daynight_ratio) {
            for (i, verts) in &self.daynight {
                let buf = &mut self.buffers[*i];
                for dv in verts {
                    if let Some(v) = buf.vertices.get_mut(dv.index as usize) {
                        let (r, g, b) = final_color_blend(dv.day, dv.night, daynight_ratio);
                        v.color = Color::new(v.color.a, r, g, b);
                    }
                }
            }
            self.last_daynight_ratio = Some(daynight_ratio);
        }
        true
    }
}

fn face_indices(face: &FastFace) -> &'static [u16; 6] {
    let v = &face.vertices;
    if v[0].color.day() != v[2].color.day() || v[1].color.day() == v[3].color.day() {
        &QUAD_INDICES_ALTERNATE
    } else {
        &QUAD_INDICES
    }
}

fn crack_base_name(tsrc: &dyn TextureSource, tile: &TileSpec) -> String {
    let mut name = tsrc.texture_name(tile.texture.id);
    name.push_str("^[crack");
    if tile.has(MaterialFlags::CRACK_OVERLAY) {
        name.push('o');
    }
    let tiled = tile.texture.tiled;
    if tiled > 1 {
        name.push_str(&format!(":{tiled}"));
    }
    name.push_str(&format!(":{}:", tile.animation_frame_count));
    name
}

fn frame_name(tsrc: &dyn TextureSource, tile: &TileSpec, frame: i32) -> String {
    format!(
        "{}^[verticalframe:{}:{}",
        tsrc.texture_name(tile.texture.id),
        tile.animation_frame_count,
        frame
    )
}

fn current_frame(tile: &TileSpec, time_s: f32, offset: i32) -> i32 {
    let length = tile.animation_frame_length_ms.max(1) as f64;
    let count = tile.animation_frame_count.max(1) as i64;
    let t = (time_s as f64 * 1000.0 / length).floor() as i64 + offset as i64;
    t.rem_euclid(count) as i32
}

/// Per-block animation phase so neighbouring blocks do not flip frames in
/// lockstep.
fn animation_offset(block_pos: IVec3) -> i32 {
    let mut noise = FastNoiseLite::with_seed(0);
    noise.set_noise_type(Some(NoiseType::Value));
    noise.set_frequency(Some(1.0));
    let n = noise.get_noise_3d(block_pos.x as f32, block_pos.y as f32, block_pos.z as f32);
    (100_000.0 * (2.0 + n.clamp(-1.0, 1.0))) as i32
}
