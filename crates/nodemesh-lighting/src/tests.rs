use super::*;
use nodemesh_content::{CONTENT_AIR, ContentRegistry, NameTextureSource};
use nodemesh_geom::Vec3;
use nodemesh_voxel::VoxelWindow;

fn registry() -> ContentRegistry {
    let ts = NameTextureSource::new();
    ContentRegistry::from_toml_str(
        r#"
        [[nodes]]
        name = "stone"
        id = 1
        tiles = ["stone.png"]

        [[nodes]]
        name = "lamp"
        id = 2
        light_source = 13
        tiles = ["lamp.png"]
        "#,
        &ts,
    )
    .expect("registry")
}

#[test]
fn decode_and_diminish() {
    assert_eq!(decode_light(0), 8);
    assert_eq!(decode_light(LIGHT_MAX), 255);
    assert_eq!(decode_light(LIGHT_SUN), 255);
    assert_eq!(diminish_light(0), 0);
    assert_eq!(diminish_light(LIGHT_SUN), LIGHT_MAX - 1);
    assert_eq!(diminish_light(LIGHT_MAX), LIGHT_MAX - 1);
    assert_eq!(diminish_light(5), 4);
    assert_eq!(undiminish_light(LIGHT_SUN), LIGHT_SUN);
    assert_eq!(undiminish_light(3), 4);
}

#[test]
fn interior_light_steps() {
    let reg = registry();
    let air = reg.get(CONTENT_AIR);
    let n = Node::with_light(CONTENT_AIR, 10, 3);
    assert_eq!(interior_light(n, air, 0), pack(decode_light(10), decode_light(3)));
    assert_eq!(interior_light(n, air, 1), pack(decode_light(11), decode_light(4)));
    assert_eq!(interior_light(n, air, -2), pack(decode_light(8), decode_light(1)));
}

#[test]
fn face_light_dims_by_axis() {
    let reg = registry();
    let air = reg.get(CONTENT_AIR);
    let stone = reg.get(1);
    let s = Node::new(1);
    let a = Node::with_light(CONTENT_AIR, LIGHT_SUN, 0);
    let top = face_light(s, stone, a, air, IVec3::new(0, 1, 0));
    assert_eq!(day(top), 255);
    assert_eq!(night(top), decode_light(0));
    let side_x = face_light(s, stone, a, air, IVec3::new(-1, 0, 0));
    assert_eq!(day(side_x), decode_light(12));
    let bottom = face_light(s, stone, a, air, IVec3::new(0, -1, 0));
    assert_eq!(day(bottom), decode_light(12));
    let side_z = face_light(s, stone, a, air, IVec3::new(0, 0, 1));
    assert_eq!(day(side_z), decode_light(13));
    // A light source boosts both banks.
    let lamp = face_light(Node::new(2), reg.get(2), a, air, IVec3::new(0, 1, 0));
    assert_eq!(night(lamp), decode_light(13));
}

#[test]
fn smooth_light_in_open_air_is_uniform() {
    let reg = registry();
    let w = VoxelWindow::filled(IVec3::ZERO, Node::with_light(CONTENT_AIR, 12, 2));
    for dir in LIGHT_DIRS {
        let l = smooth_light(&w, &reg, IVec3::new(4, 4, 4), dir, DEFAULT_AO_GAMMA);
        assert_eq!(l, pack(decode_light(12), decode_light(2)));
    }
}

#[test]
fn smooth_light_darkens_enclosed_corners() {
    let reg = registry();
    let mut w = VoxelWindow::filled(IVec3::ZERO, Node::with_light(CONTENT_AIR, LIGHT_MAX, 0));
    // Five stones around the (-,-,-) corner of (5,5,5); three air remain.
    for p in [(4, 4, 4), (4, 4, 5), (4, 5, 4), (5, 4, 4), (4, 5, 5)] {
        w.set(p.into(), Node::new(1));
    }
    let l = smooth_light(&w, &reg, IVec3::new(5, 5, 5), IVec3::new(-1, -1, -1), 2.2);
    let expect = (255.0f32 * 0.75f32.powf(1.0 / 2.2)).round() as u8;
    assert_eq!(day(l), expect);
    // Night average equals decode(0), which the source check keeps as is.
    assert_eq!(night(l), 8);
}

#[test]
fn smooth_light_near_ignore_and_sources() {
    let reg = registry();
    let w = VoxelWindow::filled(IVec3::ZERO, Node::IGNORE);
    let l = smooth_light(&w, &reg, IVec3::ZERO, IVec3::ONE, DEFAULT_AO_GAMMA);
    assert_eq!(l, pack(255, 255));

    let mut w = VoxelWindow::filled(IVec3::ZERO, Node::with_light(CONTENT_AIR, 0, 0));
    w.set(IVec3::new(3, 3, 3), Node::new(2));
    let l = smooth_light(&w, &reg, IVec3::new(3, 3, 3), IVec3::ONE, DEFAULT_AO_GAMMA);
    assert_eq!(l, pack(decode_light(13), decode_light(13)));
}

#[test]
fn frame_blend_hits_corners_and_centre() {
    let mut frame = LightFrame::default();
    for k in 0..8 {
        frame.day[k] = (k * 30) as u8;
        frame.night[k] = 100;
    }
    let h = nodemesh_geom::BS / 2.0;
    for (k, dir) in LIGHT_DIRS.iter().enumerate() {
        let pos = Vec3::new(dir.x as f32 * h, dir.y as f32 * h, dir.z as f32 * h);
        let l = frame.blend(pos);
        assert_eq!(day(l), (k * 30) as u8);
        assert_eq!(night(l), 100);
    }
    let centre = frame.blend(Vec3::ZERO);
    assert_eq!(day(centre), 105);
}
