use nodemesh_content::{
    CONTENT_AIR, CONTENT_IGNORE, ContentId, ContentRegistry, LIGHT_MAX, NameTextureSource, Node,
};
use nodemesh_geom::{BS, IVec3};
use nodemesh_mesh::{FaceOwner, MeshOptions, TileResolver, collect_fast_faces, face_contents};
use nodemesh_voxel::{MAP_BLOCKSIZE, VoxelWindow};
use proptest::prelude::*;

const CONTENT: &str = r#"
[[nodes]]
name = "stone"
tiles = ["stone.png"]

[[nodes]]
name = "dirt"
tiles = ["dirt.png"]

[[nodes]]
name = "water_source"
drawtype = "liquid"
liquid_type = "source"
param_type = "light"
liquid_alternative_flowing = "water_flowing"
liquid_alternative_source = "water_source"
tiles = ["water.png"]
special_tiles = ["water.png"]

[[nodes]]
name = "water_flowing"
drawtype = "flowingliquid"
liquid_type = "flowing"
param_type = "light"
liquid_alternative_flowing = "water_flowing"
liquid_alternative_source = "water_source"
tiles = ["water.png"]
special_tiles = ["water.png", "water.png"]

[[nodes]]
name = "glass"
drawtype = "glasslike"
param_type = "light"
tiles = ["glass.png"]

[[nodes]]
name = "torch"
drawtype = "torchlike"
param_type = "light"
tiles = ["torch.png"]
"#;

fn registry() -> (ContentRegistry, NameTextureSource) {
    let ts = NameTextureSource::new();
    let reg = ContentRegistry::from_toml_str(CONTENT, &ts).unwrap();
    (reg, ts)
}

fn content_ids(reg: &ContentRegistry) -> Vec<ContentId> {
    let mut ids: Vec<ContentId> = ["stone", "dirt", "water_source", "water_flowing", "glass", "torch"]
        .iter()
        .map(|n| reg.id_by_name(n).unwrap())
        .collect();
    ids.push(CONTENT_AIR);
    ids.push(CONTENT_IGNORE);
    ids
}

fn block_index(p: IVec3) -> usize {
    let n = MAP_BLOCKSIZE;
    ((p.y * n + p.z) * n + p.x) as usize
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    // Merged quads cover exactly the area of the unit faces they replace
    #[test]
    fn tiling_conserves_face_area(cells in proptest::collection::vec(any::<bool>(), 4096), smooth in any::<bool>()) {
        let (reg, ts) = registry();
        let stone = Node::new(reg.id_by_name("stone").unwrap());
        let air = Node::with_light(CONTENT_AIR, LIGHT_MAX, 3);
        let in_block = |p: IVec3| (0..MAP_BLOCKSIZE).contains(&p.x)
            && (0..MAP_BLOCKSIZE).contains(&p.y)
            && (0..MAP_BLOCKSIZE).contains(&p.z);
        let solid = |p: IVec3| in_block(p) && cells[block_index(p)];
        let window = VoxelWindow::from_fn(IVec3::ZERO, |p| if solid(p) { stone } else { air });

        let mut expected = 0usize;
        for z in 0..MAP_BLOCKSIZE {
            for y in 0..MAP_BLOCKSIZE {
                for x in 0..MAP_BLOCKSIZE {
                    let p = IVec3::new(x, y, z);
                    for d in [IVec3::new(1, 0, 0), IVec3::new(0, 1, 0), IVec3::new(0, 0, 1)] {
                        if solid(p) != solid(p + d) {
                            expected += 1;
                        }
                    }
                }
            }
        }

        let mut options = MeshOptions::default();
        options.smooth_lighting = smooth;
        let tiles = TileResolver::new(&reg, &ts, None);
        let faces = collect_fast_faces(&window, &tiles, &options);
        let area: f32 = faces
            .iter()
            .map(|f| {
                let v = &f.vertices;
                let a = v[0].pos - v[1].pos;
                let b = v[1].pos - v[2].pos;
                a.length() * b.length()
            })
            .sum();
        let units = area / (BS * BS);
        prop_assert!((units - expected as f32).abs() < 0.01 * expected.max(1) as f32);
        prop_assert!(faces.len() <= expected);
    }

    // Swapping the two nodes swaps the owner and keeps the culling flag
    #[test]
    fn visibility_is_symmetric(i in 0usize..8, j in 0usize..8) {
        let (reg, _) = registry();
        let ids = content_ids(&reg);
        let a = Node::new(ids[i]);
        let b = Node::new(ids[j]);
        let ab = face_contents(a, b, &reg);
        let ba = face_contents(b, a, &reg);
        prop_assert_eq!(ab.owner, ba.owner.swapped());
        prop_assert_eq!(ab.equivalent, ba.equivalent);
        if a.content == b.content || a.is_ignore() || b.is_ignore() {
            prop_assert_eq!(ab.owner, FaceOwner::None);
        }
    }
}

#[test]
fn liquid_owns_faces_against_glass() {
    let (reg, _) = registry();
    let water = Node::new(reg.id_by_name("water_source").unwrap());
    let glass = Node::new(reg.id_by_name("glass").unwrap());
    let fc = face_contents(water, glass, &reg);
    assert_eq!(fc.owner, FaceOwner::A);
    assert!(fc.equivalent);
}

#[test]
fn same_liquid_never_makes_a_face() {
    let (reg, _) = registry();
    let src = Node::new(reg.id_by_name("water_source").unwrap());
    let flowing = Node::new(reg.id_by_name("water_flowing").unwrap());
    assert!(!face_contents(src, flowing, &reg).makes_face());
}

#[test]
fn solid_owns_faces_against_air() {
    let (reg, _) = registry();
    let stone = Node::new(reg.id_by_name("stone").unwrap());
    let fc = face_contents(Node::AIR, stone, &reg);
    assert_eq!(fc.owner, FaceOwner::B);
    assert!(!fc.equivalent);
}
