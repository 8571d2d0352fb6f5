use serde::Deserialize;

use crate::features::{DrawType, LiquidType, ParamType, ParamType2};

// --- Content file ---

#[derive(Deserialize, Default, Clone, Debug)]
#[serde(default)]
pub struct ContentConfig {
    pub textures: TextureSettings,
    pub nodes: Vec<NodeDef>,
}

#[derive(Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeavesStyle {
    #[default]
    Fancy,
    Simple,
    Opaque,
}

/// Client-side texture options that change how some drawtypes compile.
#[derive(Deserialize, Copy, Clone, Debug, Default)]
#[serde(default)]
pub struct TextureSettings {
    pub opaque_water: bool,
    pub leaves_style: LeavesStyle,
    pub connected_glass: bool,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct NodeDef {
    pub name: String,
    pub id: Option<u16>,
    pub drawtype: DrawType,
    pub tiles: Vec<TileDef>,
    pub special_tiles: Vec<TileDef>,
    pub param_type: ParamType,
    pub param_type_2: ParamType2,
    pub liquid_type: LiquidType,
    pub liquid_alternative_flowing: Option<String>,
    pub liquid_alternative_source: Option<String>,
    pub liquid_range: Option<u8>,
    pub light_source: u8,
    pub light_propagates: Option<bool>,
    pub node_box: Option<NodeBoxDef>,
    pub visual_scale: Option<f32>,
    pub alpha: Option<u8>,
    pub connect_group: Option<String>,
    pub solidness: Option<u8>,
    pub visual_solidness: Option<u8>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum TileDef {
    // Simple: tiles = ["default_stone.png"]
    Name(String),
    // Detailed: { name = "default_water.png", backface_culling = false, animation = { frames = 16, length = 2.0 } }
    Detail {
        name: String,
        #[serde(default)]
        backface_culling: Option<bool>,
        #[serde(default)]
        animation: Option<AnimationDef>,
    },
}

impl TileDef {
    pub fn name(&self) -> &str {
        match self {
            TileDef::Name(n) => n,
            TileDef::Detail { name, .. } => name,
        }
    }

    pub fn backface_culling(&self) -> bool {
        match self {
            TileDef::Name(_) => true,
            TileDef::Detail {
                backface_culling, ..
            } => backface_culling.unwrap_or(true),
        }
    }

    pub fn animation(&self) -> Option<AnimationDef> {
        match self {
            TileDef::Name(_) => None,
            TileDef::Detail { animation, .. } => *animation,
        }
    }
}

/// Vertical-frame animation: `frames` stacked images played over `length`
/// seconds.
#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub struct AnimationDef {
    pub frames: u16,
    pub length: f32,
}

impl AnimationDef {
    pub fn frame_length_ms(&self) -> u32 {
        if self.frames == 0 {
            return 0;
        }
        (self.length * 1000.0 / self.frames as f32).max(0.0) as u32
    }
}

/// Boxes in node units, `[x1, y1, z1, x2, y2, z2]` with the node spanning
/// -0.5..0.5.
#[derive(Deserialize, Clone, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeBoxDef {
    Regular,
    Fixed {
        fixed: Vec<[f32; 6]>,
    },
    #[serde(rename = "wallmounted")]
    WallMounted {
        #[serde(default = "default_wall_top")]
        wall_top: [f32; 6],
        #[serde(default = "default_wall_bottom")]
        wall_bottom: [f32; 6],
        #[serde(default = "default_wall_side")]
        wall_side: [f32; 6],
    },
}

fn default_wall_top() -> [f32; 6] {
    [-0.5, 0.5 - 1.0 / 16.0, -0.5, 0.5, 0.5, 0.5]
}

fn default_wall_bottom() -> [f32; 6] {
    [-0.5, -0.5, -0.5, 0.5, -0.5 + 1.0 / 16.0, 0.5]
}

fn default_wall_side() -> [f32; 6] {
    [-0.5, -0.5, -0.5, -0.5 + 1.0 / 16.0, 0.5, 0.5]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tiles_in_both_forms() {
        let cfg: ContentConfig = toml::from_str(
            r#"
            [textures]
            leaves_style = "simple"

            [[nodes]]
            name = "default:water_flowing"
            drawtype = "flowingliquid"
            liquid_type = "flowing"
            param_type = "light"
            param_type_2 = "flowingliquid"
            tiles = ["default_water.png"]
            special_tiles = [
                { name = "default_water_flowing_animated.png", backface_culling = false, animation = { frames = 16, length = 0.8 } },
                "default_water_flowing_animated.png",
            ]
            "#,
        )
        .expect("content config");
        assert_eq!(cfg.textures.leaves_style, LeavesStyle::Simple);
        let n = &cfg.nodes[0];
        assert_eq!(n.drawtype, DrawType::FlowingLiquid);
        assert_eq!(n.param_type_2, ParamType2::FlowingLiquid);
        assert_eq!(n.special_tiles.len(), 2);
        assert!(!n.special_tiles[0].backface_culling());
        assert!(n.special_tiles[1].backface_culling());
        assert_eq!(n.special_tiles[0].animation().map(|a| a.frame_length_ms()), Some(50));
    }

    #[test]
    fn parses_node_boxes() {
        let cfg: ContentConfig = toml::from_str(
            r#"
            [[nodes]]
            name = "stairs:slab"
            drawtype = "nodebox"
            node_box = { type = "fixed", fixed = [[-0.5, -0.5, -0.5, 0.5, 0.0, 0.5]] }

            [[nodes]]
            name = "default:ladder"
            drawtype = "nodebox"
            node_box = { type = "wallmounted" }
            "#,
        )
        .expect("content config");
        match cfg.nodes[0].node_box.as_ref() {
            Some(NodeBoxDef::Fixed { fixed }) => assert_eq!(fixed.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
        match cfg.nodes[1].node_box.as_ref() {
            Some(NodeBoxDef::WallMounted { wall_side, .. }) => {
                assert_eq!(wall_side[3], -0.5 + 1.0 / 16.0)
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
