use nodemesh_content::config::{ContentConfig, NodeDef};
use nodemesh_content::{
    CONTENT_AIR, CONTENT_IGNORE, ContentRegistry, DrawType, LightBank, MaterialFlags,
    MaterialType, NameTextureSource, Node, NodeBox, TextureSource,
};
use proptest::prelude::*;

const CONTENT: &str = r#"
[[nodes]]
name = "default:stone"
tiles = ["default_stone.png"]

[[nodes]]
name = "default:water_source"
drawtype = "liquid"
liquid_type = "source"
param_type = "light"
alpha = 160
liquid_alternative_flowing = "default:water_flowing"
liquid_alternative_source = "default:water_source"
tiles = ["default_water.png"]
special_tiles = ["default_water.png"]

[[nodes]]
name = "default:water_flowing"
drawtype = "flowingliquid"
liquid_type = "flowing"
param_type = "light"
param_type_2 = "flowingliquid"
alpha = 160
liquid_range = 4
liquid_alternative_flowing = "default:water_flowing"
liquid_alternative_source = "default:water_source"
tiles = ["default_water.png"]
special_tiles = [
    { name = "default_water.png", backface_culling = false },
    { name = "default_water_flowing_animated.png", backface_culling = false, animation = { frames = 16, length = 0.8 } },
]

[[nodes]]
name = "default:leaves"
drawtype = "allfaces_optional"
param_type = "light"
tiles = ["default_leaves.png"]
special_tiles = ["default_leaves_simple.png"]

[[nodes]]
name = "default:torch"
drawtype = "torchlike"
param_type = "light"
param_type_2 = "wallmounted"
light_source = 20
tiles = ["torch_floor.png", "torch_ceiling.png", "torch.png"]

[[nodes]]
name = "stairs:slab"
drawtype = "nodebox"
param_type = "light"
param_type_2 = "facedir"
node_box = { type = "fixed", fixed = [[-0.5, -0.5, -0.5, 0.5, 0.0, 0.5]] }
tiles = ["default_wood.png"]
"#;

fn load(extra: &str) -> (ContentRegistry, NameTextureSource) {
    let ts = NameTextureSource::new();
    let reg = ContentRegistry::from_toml_str(&format!("{extra}\n{CONTENT}"), &ts).expect("registry");
    (reg, ts)
}

#[test]
fn builtins_and_fallback() {
    let (reg, _) = load("");
    assert_eq!(reg.get(CONTENT_AIR).drawtype, DrawType::AirLike);
    assert_eq!(reg.get(CONTENT_AIR).solidness, 0);
    assert_eq!(reg.get(CONTENT_IGNORE).name, "ignore");
    let unknown = reg.get(999);
    assert_eq!(unknown.name, "unknown");
    assert_eq!(unknown.solidness, 2);
    assert!(!reg.is_registered(999));
    // Auto ids skip nothing below the reserved range for six nodes.
    assert_eq!(reg.id_by_name("default:stone"), Some(0));
    assert_eq!(reg.len(), 8);
}

#[test]
fn drawtype_compilation() {
    let (reg, _) = load("");
    let stone = reg.get(reg.id_by_name("default:stone").unwrap());
    assert_eq!(stone.solidness, 2);
    assert_eq!(stone.tiles[0].material_type, MaterialType::Opaque);
    assert!(stone.tiles[5].has(MaterialFlags::BACKFACE_CULLING));

    let src = reg.get(reg.id_by_name("default:water_source").unwrap());
    assert_eq!(src.solidness, 1);
    assert_eq!(src.tiles[0].material_type, MaterialType::LiquidTransparent);

    let flowing = reg.get(reg.id_by_name("default:water_flowing").unwrap());
    assert_eq!(flowing.solidness, 0);
    assert_eq!(flowing.liquid_range, 4);
    assert!(flowing.same_liquid(src));
    assert!(!flowing.special_tiles[1].has(MaterialFlags::BACKFACE_CULLING));
    assert!(flowing.special_tiles[1].is_animated());
    assert_eq!(flowing.special_tiles[1].animation_frame_count, 16);
    assert_eq!(flowing.special_tiles[1].animation_frame_length_ms, 50);

    let leaves = reg.get(reg.id_by_name("default:leaves").unwrap());
    assert_eq!(leaves.drawtype, DrawType::AllFaces);
    assert_eq!((leaves.solidness, leaves.visual_solidness), (0, 1));

    let torch = reg.get(reg.id_by_name("default:torch").unwrap());
    assert_eq!(torch.light_source, 14);
    assert_eq!(torch.solidness, 0);
    assert!(torch.light_propagates);

    let slab = reg.get(reg.id_by_name("stairs:slab").unwrap());
    match &slab.node_box {
        NodeBox::Fixed(boxes) => {
            assert_eq!(boxes.len(), 1);
            assert_eq!(boxes[0].max.y, 0.0);
            assert_eq!(boxes[0].min.x, -5.0);
        }
        other => panic!("unexpected node box {other:?}"),
    }
}

#[test]
fn texture_settings_change_compilation() {
    let (reg, ts) = load("[textures]\nopaque_water = true\nleaves_style = \"simple\"");
    let src = reg.get(reg.id_by_name("default:water_source").unwrap());
    assert_eq!(src.alpha, 255);
    assert_eq!(src.tiles[0].material_type, MaterialType::LiquidOpaque);
    let leaves = reg.get(reg.id_by_name("default:leaves").unwrap());
    assert_eq!(leaves.drawtype, DrawType::GlassLike);
    assert_eq!(ts.texture_name(leaves.tiles[3].texture.id), "default_leaves_simple.png");

    let (reg, ts) = load("[textures]\nleaves_style = \"opaque\"");
    let leaves = reg.get(reg.id_by_name("default:leaves").unwrap());
    assert_eq!(leaves.drawtype, DrawType::Normal);
    assert_eq!(leaves.solidness, 2);
    assert_eq!(ts.texture_name(leaves.tiles[0].texture.id), "default_leaves.png^[noalpha");
}

#[test]
fn short_tile_lists_repeat_the_last_entry() {
    let (reg, ts) = load("");
    let torch = reg.get(reg.id_by_name("default:torch").unwrap());
    let names: Vec<String> = torch
        .tiles
        .iter()
        .map(|t| ts.texture_name(t.texture.id))
        .collect();
    assert_eq!(
        names,
        ["torch_floor.png", "torch_ceiling.png", "torch.png", "torch.png", "torch.png", "torch.png"]
    );
}

#[test]
fn overrides_win() {
    let cfg: ContentConfig = toml::from_str(
        r#"
        [[nodes]]
        name = "test:glass"
        drawtype = "glasslike"
        solidness = 2
        "#,
    )
    .unwrap();
    let ts = NameTextureSource::new();
    let reg = ContentRegistry::from_config(cfg, &ts).unwrap();
    let glass = reg.get(reg.id_by_name("test:glass").unwrap());
    assert_eq!(glass.solidness, 2);
    assert_eq!(glass.visual_solidness, 1);
}

#[test]
fn setup_errors_are_reported() {
    let ts = NameTextureSource::new();
    let dup = ContentConfig {
        nodes: vec![
            NodeDef {
                name: "a".into(),
                ..NodeDef::default()
            },
            NodeDef {
                name: "a".into(),
                ..NodeDef::default()
            },
        ],
        ..ContentConfig::default()
    };
    assert!(ContentRegistry::from_config(dup, &ts).is_err());

    let reserved = ContentConfig {
        nodes: vec![NodeDef {
            name: "a".into(),
            id: Some(CONTENT_AIR),
            ..NodeDef::default()
        }],
        ..ContentConfig::default()
    };
    assert!(ContentRegistry::from_config(reserved, &ts).is_err());

    let dangling = "[[nodes]]\nname = \"w\"\ndrawtype = \"liquid\"\nliquid_type = \"source\"\nliquid_alternative_flowing = \"nope\"";
    assert!(ContentRegistry::from_toml_str(dangling, &ts).is_err());
    assert!(ContentRegistry::from_toml_str("[[nodes]]\nname = 3", &ts).is_err());
}

#[test]
fn explicit_ids_are_not_reused() {
    let ts = NameTextureSource::new();
    let reg = ContentRegistry::from_toml_str(
        "[[nodes]]\nname = \"a\"\n[[nodes]]\nname = \"b\"\nid = 0\n",
        &ts,
    )
    .unwrap();
    assert_eq!(reg.id_by_name("b"), Some(0));
    assert_eq!(reg.id_by_name("a"), Some(1));
}

proptest! {
    // Light reads respect param type and light source
    #[test]
    fn node_light_banks(day in 0u8..16, night in 0u8..16) {
        let (reg, _) = load("");
        let air = reg.get(CONTENT_AIR);
        let n = Node::with_light(CONTENT_AIR, day, night);
        prop_assert_eq!(n.light(LightBank::Day, air), day);
        prop_assert_eq!(n.light(LightBank::Night, air), night);

        let stone = reg.get(reg.id_by_name("default:stone").unwrap());
        let s = Node::with_light(0, day, night);
        prop_assert_eq!(s.light(LightBank::Day, stone), 0);

        let torch_id = reg.id_by_name("default:torch").unwrap();
        let t = Node::with_light(torch_id, day, night);
        prop_assert_eq!(t.light(LightBank::Night, reg.get(torch_id)), night.max(14));
    }

    #[test]
    fn rotation_params_are_masked(p2 in any::<u8>()) {
        let (reg, _) = load("");
        let slab_id = reg.id_by_name("stairs:slab").unwrap();
        let torch_id = reg.id_by_name("default:torch").unwrap();
        let slab = Node::with_params(slab_id, 0, p2);
        prop_assert!(slab.facedir(reg.get(slab_id)) < 4);
        prop_assert_eq!(slab.wallmounted(reg.get(slab_id)), 0);
        let torch = Node::with_params(torch_id, 0, p2);
        prop_assert!(torch.wallmounted(reg.get(torch_id)) <= 5);
        prop_assert_eq!(torch.facedir(reg.get(torch_id)), 0);
    }
}
