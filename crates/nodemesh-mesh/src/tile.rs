use nodemesh_content::{ContentRegistry, MaterialFlags, Node, TextureSource, TileSpec};
use nodemesh_geom::IVec3;

// Rows: facedir 0..4. Columns: (dx + 2dy + 3dz) & 7, i.e. 0, +X, +Y, +Z, -, -Z, -Y, -X.
const DIR_TO_SLOT: [[u8; 8]; 4] = [
    [0, 2, 0, 4, 0, 5, 1, 3],
    [0, 4, 0, 3, 0, 2, 1, 5],
    [0, 3, 0, 5, 0, 4, 1, 2],
    [0, 5, 0, 2, 0, 3, 1, 4],
];

/// Tile slot (top, bottom, right, left, back, front) that faces `dir` for a
/// node turned by `facedir`.
#[inline]
pub fn slot_for(facedir: u8, dir: IVec3) -> usize {
    let dir_i = ((dir.x + 2 * dir.y + 3 * dir.z) & 7) as usize;
    DIR_TO_SLOT[(facedir & 3) as usize][dir_i] as usize
}

enum TopRotation {
    None,
    Rename(&'static str),
    Flip,
}

fn top_rotation(slot: usize, facedir: u8) -> TopRotation {
    match (slot, facedir & 3) {
        (0 | 1, 2) => TopRotation::Flip,
        (0, 1) | (1, 3) => TopRotation::Rename("^[transformR270"),
        (0, 3) | (1, 1) => TopRotation::Rename("^[transformR90"),
        _ => TopRotation::None,
    }
}

/// Resolves the material of one node face, applying rotation, the crack
/// overlay and animation texture substitution.
pub struct TileResolver<'a> {
    reg: &'a ContentRegistry,
    tsrc: &'a dyn TextureSource,
    crack_pos: Option<IVec3>,
}

impl<'a> TileResolver<'a> {
    pub fn new(
        reg: &'a ContentRegistry,
        tsrc: &'a dyn TextureSource,
        crack_pos: Option<IVec3>,
    ) -> Self {
        Self {
            reg,
            tsrc,
            crack_pos,
        }
    }

    #[inline]
    pub fn registry(&self) -> &'a ContentRegistry {
        self.reg
    }

    #[inline]
    pub fn texture_source(&self) -> &'a dyn TextureSource {
        self.tsrc
    }

    fn needs_raw(tile: &TileSpec) -> bool {
        tile.has(MaterialFlags::CRACK) || tile.has(MaterialFlags::ANIMATION_VERTICAL_FRAMES)
    }

    /// Tile `slot` of `node` at block-relative `pos`.
    pub fn node_tile_n(&self, node: Node, pos: IVec3, slot: usize) -> TileSpec {
        let f = self.reg.get(node.content);
        let mut tile = f.tiles[slot.min(5)];
        if self.crack_pos == Some(pos) {
            tile.material_flags.insert(MaterialFlags::CRACK);
        }
        if Self::needs_raw(&tile) {
            tile.texture = self.tsrc.texture_raw(&tile.texture);
        }
        tile
    }

    /// Tile of the face of `node` looking along `dir` (a unit axis or zero).
    pub fn node_tile(&self, node: Node, pos: IVec3, dir: IVec3) -> TileSpec {
        let f = self.reg.get(node.content);
        let facedir = node.facedir(f);
        let slot = slot_for(facedir, dir);
        let mut tile = self.node_tile_n(node, pos, slot);
        match top_rotation(slot, facedir) {
            TopRotation::None => {}
            TopRotation::Flip => tile.texture = tile.texture.flipped(),
            TopRotation::Rename(suffix) => {
                let name = self.tsrc.texture_name(tile.texture.id) + suffix;
                tile.texture = self.tsrc.texture(&name);
                if Self::needs_raw(&tile) {
                    tile.texture = self.tsrc.texture_raw(&tile.texture);
                }
            }
        }
        tile
    }

    /// Special tile `i` of `node`; special tiles never carry the crack.
    pub fn special_tile(&self, node: Node, i: usize) -> TileSpec {
        let mut tile = self.reg.get(node.content).special_tiles[i.min(1)];
        if tile.has(MaterialFlags::ANIMATION_VERTICAL_FRAMES) {
            tile.texture = self.tsrc.texture_raw(&tile.texture);
        }
        tile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrotated_slots_follow_face_order() {
        assert_eq!(slot_for(0, IVec3::new(0, 1, 0)), 0);
        assert_eq!(slot_for(0, IVec3::new(0, -1, 0)), 1);
        assert_eq!(slot_for(0, IVec3::new(1, 0, 0)), 2);
        assert_eq!(slot_for(0, IVec3::new(-1, 0, 0)), 3);
        assert_eq!(slot_for(0, IVec3::new(0, 0, 1)), 4);
        assert_eq!(slot_for(0, IVec3::new(0, 0, -1)), 5);
        assert_eq!(slot_for(0, IVec3::ZERO), 0);
    }

    #[test]
    fn facedir_turns_side_slots_only() {
        for fd in 0..4 {
            assert_eq!(slot_for(fd, IVec3::new(0, 1, 0)), 0);
            assert_eq!(slot_for(fd, IVec3::new(0, -1, 0)), 1);
            let mut sides: Vec<usize> = [(1, 0), (-1, 0), (0, 1), (0, -1)]
                .iter()
                .map(|&(x, z)| slot_for(fd, IVec3::new(x, 0, z)))
                .collect();
            sides.sort();
            assert_eq!(sides, vec![2, 3, 4, 5]);
        }
        // A half turn shows the back tile on the front.
        assert_eq!(slot_for(2, IVec3::new(0, 0, -1)), 4);
    }
}
