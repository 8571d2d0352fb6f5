use nodemesh_content::{CONTENT_AIR, LIGHT_MAX, Node};
use nodemesh_geom::IVec3;
use nodemesh_voxel::{HALO, MAP_BLOCKSIZE, NodeMap, NodeSource, VoxelWindow, block_of, block_origin};
use proptest::prelude::*;

fn rel() -> impl Strategy<Value = i32> {
    -HALO..MAP_BLOCKSIZE + HALO
}

fn any_coord() -> impl Strategy<Value = i32> {
    -40i32..40
}

fn block_coord() -> impl Strategy<Value = i32> {
    -1000i32..1000
}

fn marker(p: IVec3) -> Node {
    Node::with_params((p.x & 0x3f) as u16, (p.y & 0xff) as u8, (p.z & 0xff) as u8)
}

proptest! {
    // Capture copies world nodes at origin + relative position
    #[test]
    fn capture_reads_world_offsets(bx in block_coord(), by in block_coord(), bz in block_coord(),
                                   x in rel(), y in rel(), z in rel()) {
        let bp = IVec3::new(bx, by, bz);
        let w = VoxelWindow::capture(&marker, bp);
        let p = IVec3::new(x, y, z);
        prop_assert_eq!(w.get(p), marker(block_origin(bp) + p));
        prop_assert_eq!(w.origin(), block_origin(bp));
    }

    // Anything outside the halo is ignore
    #[test]
    fn outside_reads_ignore(x in any_coord(), y in any_coord(), z in any_coord()) {
        let w = VoxelWindow::filled(IVec3::ZERO, Node::new(7));
        let p = IVec3::new(x, y, z);
        let inside = [x, y, z].iter().all(|c| (-HALO..MAP_BLOCKSIZE + HALO).contains(c));
        if inside {
            prop_assert_eq!(w.get(p).content, 7);
        } else {
            prop_assert!(w.get(p).is_ignore());
        }
    }

    // block_of inverts block_origin for every node of the block
    #[test]
    fn block_of_matches_origin(bx in block_coord(), by in block_coord(), bz in block_coord(),
                               x in 0..MAP_BLOCKSIZE, y in 0..MAP_BLOCKSIZE, z in 0..MAP_BLOCKSIZE) {
        let bp = IVec3::new(bx, by, bz);
        prop_assert_eq!(block_of(block_origin(bp) + IVec3::new(x, y, z)), bp);
    }
}

#[test]
fn single_node_preview() {
    let w = VoxelWindow::single_node(Node::new(3));
    assert_eq!(w.get(IVec3::ONE).content, 3);
    let air = w.get(IVec3::ZERO);
    assert_eq!(air.content, CONTENT_AIR);
    assert_eq!(air.param1, LIGHT_MAX);
    assert!(w.get(IVec3::new(-3, 0, 0)).is_ignore());
    assert!(w.any_in_block(|n| n.content == 3));
    assert!(!w.any_in_block(|n| n.content == 4));
}

#[test]
fn set_rejects_out_of_window() {
    let mut w = VoxelWindow::filled(IVec3::ZERO, Node::AIR);
    assert!(w.set(IVec3::new(17, 17, 17), Node::new(1)));
    assert!(!w.set(IVec3::new(18, 0, 0), Node::new(1)));
    assert_eq!(w.get(IVec3::new(17, 17, 17)).content, 1);
}

#[test]
fn node_map_bounds_and_background() {
    let mut m = NodeMap::default().with_bounds(IVec3::new(-16, -16, -16), IVec3::new(31, 31, 31));
    m.fill(IVec3::new(2, 0, 0), IVec3::new(0, 0, 1), Node::new(1));
    assert_eq!(m.len(), 6);
    assert_eq!(m.get_node(IVec3::new(1, 0, 1)).content, 1);
    assert_eq!(m.get_node(IVec3::new(5, 5, 5)).content, CONTENT_AIR);
    assert!(m.get_node(IVec3::new(32, 0, 0)).is_ignore());
    m.set(IVec3::new(-1, 0, 0), Node::new(2));
    assert_eq!(m.touched_blocks(), vec![IVec3::new(-1, 0, 0), IVec3::ZERO]);
}
