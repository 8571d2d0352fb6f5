use hashbrown::HashMap;
use nodemesh_content::{TextureRef, TileSpec};

use crate::options::IndexOverflow;
use crate::vertex::Vertex;

const MAX_BUFFER_VERTICES: usize = u16::MAX as usize + 1;

/// Geometry sharing one material.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshBuffer {
    pub tile: TileSpec,
    /// Texture currently bound; animation and cracking swap it.
    pub texture: TextureRef,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshBuffer {
    fn new(tile: TileSpec) -> Self {
        Self {
            tile,
            texture: tile.texture,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Packs emitted primitives into one buffer per distinct tile, in order of
/// first appearance. Primitives whose tile has no texture (id 0) are dropped.
pub struct MeshCollector {
    buffers: Vec<MeshBuffer>,
    // Buffer currently receiving geometry for each tile.
    index: HashMap<TileSpec, usize>,
    overflow: IndexOverflow,
    wrapped: usize,
    textureless: usize,
}

impl MeshCollector {
    pub fn new(overflow: IndexOverflow) -> Self {
        Self {
            buffers: Vec::new(),
            index: HashMap::new(),
            overflow,
            wrapped: 0,
            textureless: 0,
        }
    }

    fn open(&mut self, tile: TileSpec) -> usize {
        let i = self.buffers.len();
        self.buffers.push(MeshBuffer::new(tile));
        self.index.insert(tile, i);
        i
    }

    pub fn append(&mut self, tile: TileSpec, vertices: &[Vertex], indices: &[u16]) {
        if vertices.is_empty() {
            return;
        }
        if tile.texture.id == 0 {
            self.textureless += 1;
            return;
        }
        let mut i = match self.index.get(&tile) {
            Some(&i) => i,
            None => self.open(tile),
        };
        let prior = self.buffers[i].vertices.len();
        if prior + vertices.len() > MAX_BUFFER_VERTICES {
            match self.overflow {
                IndexOverflow::Split if prior > 0 => i = self.open(tile),
                IndexOverflow::Split => {}
                IndexOverflow::Append => {
                    if self.wrapped == 0 {
                        log::warn!(
                            "mesh buffer passed {} vertices; indices wrap (texture id {})",
                            MAX_BUFFER_VERTICES,
                            tile.texture.id
                        );
                    }
                    self.wrapped += 1;
                }
            }
        }
        let buf = &mut self.buffers[i];
        let base = buf.vertices.len() as u32;
        buf.vertices.extend_from_slice(vertices);
        buf.indices
            .extend(indices.iter().map(|&j| (base + j as u32) as u16));
    }

    #[inline]
    pub fn buffers(&self) -> &[MeshBuffer] {
        &self.buffers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Appends dropped because their tile had no texture.
    #[inline]
    pub fn textureless_appends(&self) -> usize {
        self.textureless
    }

    /// Appends that went past the index range under `IndexOverflow::Append`.
    #[inline]
    pub fn wrapped_appends(&self) -> usize {
        self.wrapped
    }

    pub fn into_buffers(self) -> Vec<MeshBuffer> {
        self.buffers
    }
}
