//! Node sources and the read-only window a block is meshed from.
#![forbid(unsafe_code)]

use hashbrown::HashMap;
use nodemesh_content::{CONTENT_AIR, LIGHT_MAX, Node};
use nodemesh_geom::IVec3;

/// Nodes along each edge of a block.
pub const MAP_BLOCKSIZE: i32 = 16;
/// Extra layers captured around the block on every side.
pub const HALO: i32 = 2;
/// Window edge length; block-relative coordinates `-HALO..MAP_BLOCKSIZE + HALO`.
pub const WINDOW_EXTENT: i32 = MAP_BLOCKSIZE + 2 * HALO;

/// World-space node lookup. Unloaded positions read as `Node::IGNORE`.
pub trait NodeSource {
    fn get_node(&self, p: IVec3) -> Node;
}

impl<F: Fn(IVec3) -> Node> NodeSource for F {
    fn get_node(&self, p: IVec3) -> Node {
        self(p)
    }
}

/// First world node of a block.
#[inline]
pub fn block_origin(block_pos: IVec3) -> IVec3 {
    block_pos * MAP_BLOCKSIZE
}

/// Block containing a world node position.
#[inline]
pub fn block_of(p: IVec3) -> IVec3 {
    IVec3::new(
        p.x.div_euclid(MAP_BLOCKSIZE),
        p.y.div_euclid(MAP_BLOCKSIZE),
        p.z.div_euclid(MAP_BLOCKSIZE),
    )
}

/// Snapshot of one block and its halo, addressed in block-relative
/// coordinates. Reads outside the window return `Node::IGNORE`.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelWindow {
    block_pos: IVec3,
    nodes: Vec<Node>,
}

impl VoxelWindow {
    #[inline]
    fn idx(p: IVec3) -> Option<usize> {
        let range = -HALO..MAP_BLOCKSIZE + HALO;
        if !(range.contains(&p.x) && range.contains(&p.y) && range.contains(&p.z)) {
            return None;
        }
        let (x, y, z) = ((p.x + HALO) as usize, (p.y + HALO) as usize, (p.z + HALO) as usize);
        let e = WINDOW_EXTENT as usize;
        Some((y * e + z) * e + x)
    }

    /// Builds a window by calling `f` for every block-relative position.
    pub fn from_fn(block_pos: IVec3, mut f: impl FnMut(IVec3) -> Node) -> Self {
        let e = WINDOW_EXTENT as usize;
        let mut nodes = vec![Node::IGNORE; e * e * e];
        for y in -HALO..MAP_BLOCKSIZE + HALO {
            for z in -HALO..MAP_BLOCKSIZE + HALO {
                for x in -HALO..MAP_BLOCKSIZE + HALO {
                    let p = IVec3::new(x, y, z);
                    if let Some(i) = Self::idx(p) {
                        nodes[i] = f(p);
                    }
                }
            }
        }
        Self { block_pos, nodes }
    }

    pub fn filled(block_pos: IVec3, node: Node) -> Self {
        Self::from_fn(block_pos, |_| node)
    }

    /// Copies the block at `block_pos` and its halo out of `src`.
    pub fn capture(src: &dyn NodeSource, block_pos: IVec3) -> Self {
        let origin = block_origin(block_pos);
        Self::from_fn(block_pos, |p| src.get_node(origin + p))
    }

    /// Preview window: `node` at (1,1,1) in air lit by full day light.
    pub fn single_node(node: Node) -> Self {
        let mut w = Self::filled(IVec3::ZERO, Node::with_light(CONTENT_AIR, LIGHT_MAX, 0));
        w.set(IVec3::ONE, node);
        w
    }

    #[inline]
    pub fn block_pos(&self) -> IVec3 {
        self.block_pos
    }

    /// First world node of the captured block.
    #[inline]
    pub fn origin(&self) -> IVec3 {
        block_origin(self.block_pos)
    }

    #[inline]
    pub fn get(&self, p: IVec3) -> Node {
        match Self::idx(p) {
            Some(i) => self.nodes[i],
            None => Node::IGNORE,
        }
    }

    /// Overwrites one position; returns false outside the window.
    pub fn set(&mut self, p: IVec3, node: Node) -> bool {
        match Self::idx(p) {
            Some(i) => {
                self.nodes[i] = node;
                true
            }
            None => false,
        }
    }

    /// Whether any node of the block proper (not the halo) matches `pred`.
    pub fn any_in_block(&self, mut pred: impl FnMut(Node) -> bool) -> bool {
        (0..MAP_BLOCKSIZE).any(|y| {
            (0..MAP_BLOCKSIZE).any(|z| {
                (0..MAP_BLOCKSIZE).any(|x| pred(self.get(IVec3::new(x, y, z))))
            })
        })
    }
}

/// Sparse in-memory world. Positions inside `bounds` that were never set
/// read as `background`; everything else reads as ignore.
#[derive(Clone, Debug)]
pub struct NodeMap {
    nodes: HashMap<IVec3, Node>,
    background: Node,
    bounds: Option<(IVec3, IVec3)>,
}

impl Default for NodeMap {
    fn default() -> Self {
        Self::new(Node::with_light(CONTENT_AIR, LIGHT_MAX, 0))
    }
}

impl NodeMap {
    pub fn new(background: Node) -> Self {
        Self {
            nodes: HashMap::new(),
            background,
            bounds: None,
        }
    }

    /// Limits the loaded area to the inclusive box `min..=max`.
    pub fn with_bounds(mut self, min: IVec3, max: IVec3) -> Self {
        self.bounds = Some((min, max));
        self
    }

    pub fn set(&mut self, p: IVec3, node: Node) {
        self.nodes.insert(p, node);
    }

    /// Sets every position in the inclusive box `a..=b`.
    pub fn fill(&mut self, a: IVec3, b: IVec3, node: Node) {
        let (min, max) = (
            IVec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            IVec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        );
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    self.nodes.insert(IVec3::new(x, y, z), node);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Blocks holding at least one explicitly set node, sorted.
    pub fn touched_blocks(&self) -> Vec<IVec3> {
        let mut out: Vec<IVec3> = self.nodes.keys().map(|&p| block_of(p)).collect();
        out.sort();
        out.dedup();
        out
    }

    #[inline]
    fn loaded(&self, p: IVec3) -> bool {
        match self.bounds {
            None => true,
            Some((min, max)) => {
                p.x >= min.x && p.y >= min.y && p.z >= min.z && p.x <= max.x && p.y <= max.y && p.z <= max.z
            }
        }
    }
}

impl NodeSource for NodeMap {
    fn get_node(&self, p: IVec3) -> Node {
        if !self.loaded(p) {
            return Node::IGNORE;
        }
        self.nodes.get(&p).copied().unwrap_or(self.background)
    }
}
